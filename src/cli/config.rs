//! Config command handler
//!
//! View and modify configuration settings.

use crate::cli::GlobalArgs;
use crate::config::{mask, Config};
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "api_keys.google")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs, global: &GlobalArgs) -> Result<()> {
    let path = match &global.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    if args.path {
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save_to(&path)?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load_from(&path)?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            print!("{}", render_all(&config));
        }

        // Key only: show that value
        (Some(key), None) => match config.get(key) {
            Some(value) if Config::is_secret_key(key) => println!("{}", mask(&value)),
            Some(value) => println!("{}", value),
            None => {
                let keys = Config::available_keys()
                    .iter()
                    .map(|k| format!("  {}", k))
                    .collect::<Vec<_>>()
                    .join("\n");
                return Err(Error::Config(format!(
                    "Unknown config key: {}\n\nAvailable keys:\n{}",
                    key, keys
                )));
            }
        },

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save_to(&path)?;
            if Config::is_secret_key(key) {
                println!("{} = {}", key, mask(value));
            } else {
                println!("{} = {}", key, value);
            }
        }

        // Value without key: not valid
        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// All configuration values, grouped by section, with keys masked
fn render_all(config: &Config) -> String {
    let mut output = String::new();
    let mut section = "";

    for key in Config::available_keys() {
        let (name, field) = key.split_once('.').unwrap_or(("", key));
        if name != section {
            if !section.is_empty() {
                output.push('\n');
            }
            output.push_str(&format!("[{}]\n", name));
            section = name;
        }

        let value = config.get(key).unwrap_or_default();
        let shown = if Config::is_secret_key(key) {
            mask(&value).to_string()
        } else if value.parse::<f64>().is_ok() {
            value
        } else {
            format!("\"{}\"", value)
        };
        output.push_str(&format!("{} = {}\n", field, shown));
    }

    output
}
