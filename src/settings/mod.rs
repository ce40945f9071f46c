//! Persisted application settings stored as TOML in the `.prognos` folder.

mod errors;
mod io;
mod types;

pub use errors::ConfigError;
pub use io::{config_path, load_from_path, load_or_default, save_to_path};
pub use types::{AppSettings, FormSettings, PipelineSettings, WindowSettings};

/// File name of the settings file inside the app root.
pub const CONFIG_FILE_NAME: &str = "config.toml";
