//! List capture devices.

use devcap_capture_engine::DeviceRegistry;
use devcap_common::config::AppConfig;

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let devices = DeviceRegistry::from_config(config).list_devices().await;

    if devices.is_empty() {
        println!("No capture devices found.");
        return Ok(());
    }

    for (position, device) in devices.iter().enumerate() {
        let kind = device
            .kind()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("{position:>3}: {device} ({kind})");
    }

    Ok(())
}
