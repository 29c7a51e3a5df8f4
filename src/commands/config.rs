//! Config commands

use anyhow::Result;
use formsmith::config::AppConfig;

use super::print_json;
use crate::ConfigCommands;

pub fn handle(action: ConfigCommands, config: &AppConfig) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            print_json(config)?;
            println!("Form store: {}", config.data_file().display());
        }
        ConfigCommands::Init => {
            config.save()?;
            println!("Configuration saved");
        }
    }
    Ok(())
}
