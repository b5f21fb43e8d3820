pub mod config;
pub mod embed;
pub mod level;
pub mod preview;
pub mod sound;
pub mod task;

use questlayer_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Load the config from `--config-file` or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

pub fn save_config(config: &Config, path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(path) => config.save_to(path),
        None => config.save(),
    }
}

pub fn config_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::path(),
    }
}
