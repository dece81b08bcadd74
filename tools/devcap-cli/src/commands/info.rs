//! Show a device's detected capabilities.

use serde::Serialize;

use devcap_common::config::AppConfig;
use devcap_device_model::{Capabilities, DeviceKind};

use crate::render::{modes_table, pixel_formats_table};

#[derive(Serialize)]
struct DeviceReport<'a> {
    index: &'a str,
    name: &'a str,
    kind: Option<DeviceKind>,
    capabilities: &'a Capabilities,
}

pub async fn run(config: &AppConfig, position: usize, json: bool) -> anyhow::Result<()> {
    let device = super::select_device(config, position).await?;

    if json {
        let report = DeviceReport {
            index: device.index(),
            name: device.name(),
            kind: device.kind(),
            capabilities: device.capabilities(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Name : {}", device.name());
    println!(
        "Type : {}",
        device
            .kind()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );
    println!("Index: {}", device.index());
    println!();

    print!("{}", modes_table(device.modes()));
    print!("{}", pixel_formats_table(device.pixel_formats()));

    Ok(())
}
