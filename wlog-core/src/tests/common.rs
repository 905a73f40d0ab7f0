use crate::Config;
use crate::records::DEFAULT_MIN_COLUMN_WIDTH;
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(export_dir: PathBuf) -> Config {
    Config {
        client: None,
        project: None,
        export_dir,
        min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
    }
}
