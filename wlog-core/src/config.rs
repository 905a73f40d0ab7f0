use crate::records::DEFAULT_MIN_COLUMN_WIDTH;
use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Client used when none is given on the command line.
    pub client: Option<String>,
    /// Project used when none is given on the command line.
    pub project: Option<String>,
    /// Directory where exported files are written. Default is the current directory.
    pub export_dir: PathBuf,
    /// Narrowest width hint for exported columns. Default is 15.
    pub min_column_width: usize,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    client: Option<String>,
    project: Option<String>,
    export_dir: Option<PathBuf>,
    min_column_width: Option<usize>,
}

impl Config {
    /// Load config from disk (first XDG path, then native) and apply defaults.
    /// A file that cannot be read or parsed is reported and ignored.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|e| {
            warn!("ignoring config file: {e:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        Self {
            client: non_blank(file_config.client),
            project: non_blank(file_config.project),
            export_dir: file_config
                .export_dir
                .unwrap_or_else(|| PathBuf::from(".")),
            min_column_width: file_config
                .min_column_width
                .unwrap_or(DEFAULT_MIN_COLUMN_WIDTH),
        }
    }

    /// Where a config file is looked for, in priority order.
    pub fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("wlog").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("wlog").join("config.toml");
            if !v.contains(&native) {
                v.push(native);
            }
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            debug!(path = %path.display(), "loading config");
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_config(FileConfig::default())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
