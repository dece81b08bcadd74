//! Subcommand implementations.

pub mod check;
pub mod config;
pub mod info;
pub mod list;
pub mod picture;
pub mod video;

use devcap_capture_engine::{Device, DeviceRegistry};
use devcap_common::config::AppConfig;

/// Enumerate devices and pick the one at `position`, with capabilities detected.
pub async fn select_device(config: &AppConfig, position: usize) -> anyhow::Result<Device> {
    let devices = DeviceRegistry::from_config(config).list_devices().await;
    let found = devices.len();

    let mut device = devices.into_iter().nth(position).ok_or_else(|| {
        anyhow::anyhow!(
            "No device at position {position} ({found} found). Run `devcap list` or `devcap check`."
        )
    })?;

    device.detect_features().await;
    Ok(device)
}
