mod cli_mode;
mod export_mode;
mod path_mode;
mod read_mode;

pub use cli_mode::CliModeResult;
pub use export_mode::export_mode;
pub use path_mode::path_mode;
pub use read_mode::{load_import, read_mode};
