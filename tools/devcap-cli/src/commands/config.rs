//! Show or write the effective configuration.

use devcap_common::config::{config_file_path, AppConfig};

/// Print the configuration as JSON. With `write`, save it to the config file,
/// command-line overrides included.
pub fn run(config: &AppConfig, write: bool) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);

    if write {
        let path = config.save()?;
        eprintln!("Configuration written to {}", path.display());
    } else {
        eprintln!("Config file: {}", config_file_path().display());
    }
    Ok(())
}
