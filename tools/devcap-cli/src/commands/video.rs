//! Record a video.

use std::io::Write;
use std::path::PathBuf;

use devcap_capture_engine::{CaptureProgress, ProgressCallback, VideoOptions};
use devcap_common::config::AppConfig;
use devcap_device_model::Resolution;

use crate::render::progress_lines;

pub async fn run(
    config: &AppConfig,
    position: usize,
    output: Option<PathBuf>,
    duration_secs: Option<u64>,
    resolution: Option<Resolution>,
    fps: Option<f64>,
    pixel_format: Option<String>,
) -> anyhow::Result<()> {
    let device = super::select_device(config, position).await?;

    let options = VideoOptions {
        output,
        duration_secs,
        resolution,
        fps,
        pixel_format,
    };

    let progress_cb: ProgressCallback = Box::new(|p: CaptureProgress| {
        let mut stdout = std::io::stdout().lock();
        if p.elapsed_secs > 1 {
            // Move back over the two lines drawn by the previous tick.
            let _ = write!(stdout, "\x1b[2A");
        }
        let _ = write!(stdout, "{}", progress_lines(&p));
        let _ = stdout.flush();
    });

    let path = device.take_video(options, Some(progress_cb)).await?;
    println!("File created: {}", path.display());

    Ok(())
}
