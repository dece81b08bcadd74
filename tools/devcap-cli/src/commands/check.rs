//! Check that the media tool is usable.

use devcap_capture_engine::{DeviceRegistry, FfmpegTool, MediaTool};
use devcap_common::config::{config_file_path, AppConfig};

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("devcap System Check");
    println!("{}", "=".repeat(50));

    println!("Config file: {}", config_file_path().display());
    let tool = FfmpegTool::new(&config.tool);
    println!("Input format: {}", tool.input_format());

    match tool.version().await {
        Ok(version) => println!("[OK] Media tool: {version}"),
        Err(e) => {
            println!("[FAIL] Media tool {}: {e}", tool.binary().display());
            println!();
            println!("Install ffmpeg or point --ffmpeg at the binary.");
            return Ok(());
        }
    }

    let devices = DeviceRegistry::from_config(config).list_devices().await;
    if devices.is_empty() {
        println!("[WARN] No capture devices reported");
    } else {
        println!("[OK] Capture devices detected: {}", devices.len());
    }

    println!();
    println!("devcap is ready.");

    Ok(())
}
