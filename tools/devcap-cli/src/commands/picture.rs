//! Take a still picture.

use std::path::PathBuf;

use devcap_capture_engine::PictureOptions;
use devcap_common::config::AppConfig;
use devcap_device_model::Resolution;

pub async fn run(
    config: &AppConfig,
    position: usize,
    output: Option<PathBuf>,
    resolution: Option<Resolution>,
    pixel_format: Option<String>,
) -> anyhow::Result<()> {
    let device = super::select_device(config, position).await?;

    let options = PictureOptions {
        output,
        resolution,
        pixel_format,
    };

    let path = device.take_picture(options).await?;
    println!("File created: {}", path.display());

    Ok(())
}
