use clap::Subcommand;
use questlayer_core::Config;
use std::path::Path;

use super::{config_path, load_config, save_config};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "theme", "engine.quest_countdown_secs")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(file)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config(file)?;
            config.set(&key, &value)?;
            save_config(&config, file)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = load_config(file)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            save_config(&Config::default(), file)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", config_path(file)?.display());
        }
    }
    Ok(())
}
