//! Still and video capture against a detected device.
//!
//! A capture first settles on a mode (requested or defaulted) and validates
//! it against the device's detected modes; an unsupported mode fails before
//! the media tool is ever started. Video captures then run the tool, a
//! one-second progress ticker and the completion deadline side by side on
//! the calling task.

use std::path::{Path, PathBuf};
use std::time::Duration;

use devcap_common::error::{DevcapError, DevcapResult};
use devcap_device_model::{Capabilities, Resolution};

use crate::command::{frame_count, ToolCommand};
use crate::device::Device;

const TICK: Duration = Duration::from_secs(1);

/// Callback invoked on every progress tick of a video capture.
pub type ProgressCallback = Box<dyn Fn(CaptureProgress) + Send + Sync>;

/// Progress report for a running video capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureProgress {
    /// Whole seconds recorded so far.
    pub elapsed_secs: u64,
    /// Requested recording length.
    pub duration_secs: u64,
    /// Completion as a rounded percentage, capped at 100.
    pub percent: u32,
    /// Human-readable description of the capture.
    pub label: String,
}

impl CaptureProgress {
    pub fn new(elapsed_secs: u64, duration_secs: u64, label: impl Into<String>) -> Self {
        let mut progress = Self {
            elapsed_secs,
            duration_secs,
            percent: 0,
            label: label.into(),
        };
        progress.percent = (progress.fraction() * 100.0).round() as u32;
        progress
    }

    /// Completion in `[0.0, 1.0]`.
    pub fn fraction(&self) -> f64 {
        if self.duration_secs == 0 {
            return 1.0;
        }
        (self.elapsed_secs as f64 / self.duration_secs as f64).min(1.0)
    }
}

/// Parameters for [`Device::take_picture`]. Unset fields use defaults.
#[derive(Debug, Clone, Default)]
pub struct PictureOptions {
    pub output: Option<PathBuf>,
    pub resolution: Option<Resolution>,
    pub pixel_format: Option<String>,
}

impl PictureOptions {
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn pixel_format(mut self, pixel_format: impl Into<String>) -> Self {
        self.pixel_format = Some(pixel_format.into());
        self
    }
}

/// Parameters for [`Device::take_video`]. Unset fields use defaults.
#[derive(Debug, Clone, Default)]
pub struct VideoOptions {
    pub output: Option<PathBuf>,
    pub duration_secs: Option<u64>,
    pub resolution: Option<Resolution>,
    pub fps: Option<f64>,
    pub pixel_format: Option<String>,
}

impl VideoOptions {
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn duration_secs(mut self, duration_secs: u64) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }

    pub fn pixel_format(mut self, pixel_format: impl Into<String>) -> Self {
        self.pixel_format = Some(pixel_format.into());
        self
    }
}

/// A validated capture configuration.
#[derive(Debug, Clone, PartialEq)]
struct CapturePlan {
    resolution: Resolution,
    framerate: f64,
    pixel_format: Option<String>,
    output: PathBuf,
}

/// Settle on a resolution and framerate and check them against `caps`.
///
/// The resolution defaults to the widest detected mode. The framerate
/// defaults to the highest maximum among modes of that resolution.
fn resolve_mode(
    caps: &Capabilities,
    resolution: Option<Resolution>,
    fps: Option<f64>,
) -> DevcapResult<(Resolution, f64)> {
    let Some(resolution) = resolution.or_else(|| caps.default_mode().map(|m| m.resolution()))
    else {
        // Nothing detected and nothing requested: there is no mode to name.
        return Err(DevcapError::mode_not_supported(0, 0, fps.unwrap_or(0.0)));
    };

    let framerate = fps.or_else(|| {
        caps.modes()
            .iter()
            .filter(|m| m.resolution() == resolution)
            .map(|m| m.fps_max())
            .reduce(f64::max)
    });

    match framerate {
        Some(framerate) if caps.test_mode(resolution.width, resolution.height, framerate) => {
            Ok((resolution, framerate))
        }
        _ => Err(DevcapError::mode_not_supported(
            resolution.width,
            resolution.height,
            framerate.unwrap_or(0.0),
        )),
    }
}

fn absolute_output(output: &Path) -> DevcapResult<PathBuf> {
    if output.is_absolute() {
        return Ok(output.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(output))
}

impl Device {
    fn plan_capture(
        &self,
        output: Option<PathBuf>,
        default_output: &Path,
        resolution: Option<Resolution>,
        fps: Option<f64>,
        pixel_format: Option<String>,
    ) -> DevcapResult<CapturePlan> {
        let caps = self.capabilities();
        let (resolution, framerate) = resolve_mode(caps, resolution, fps)?;
        let pixel_format =
            pixel_format.or_else(|| caps.default_pixel_format().map(str::to_string));
        let output = absolute_output(output.as_deref().unwrap_or(default_output))?;

        Ok(CapturePlan {
            resolution,
            framerate,
            pixel_format,
            output,
        })
    }

    /// Grab a single frame and return the absolute path of the written file.
    ///
    /// Fails with `ModeNotSupported` before running anything when the
    /// resolution and framerate match no detected mode.
    pub async fn take_picture(&self, options: PictureOptions) -> DevcapResult<PathBuf> {
        let plan = self.plan_capture(
            options.output,
            &self.defaults.picture_output,
            options.resolution,
            None,
            options.pixel_format,
        )?;

        tracing::info!(
            index = %self.index(),
            resolution = %plan.resolution,
            framerate = plan.framerate,
            pixel_format = ?plan.pixel_format,
            output = %plan.output.display(),
            "Taking picture"
        );

        let args = ToolCommand::Picture {
            index: self.index().to_string(),
            resolution: plan.resolution,
            framerate: plan.framerate,
            pixel_format: plan.pixel_format,
            output: plan.output.clone(),
        }
        .to_args(self.tool.input_format());

        self.tool.capture(&args).await?;
        Ok(plan.output)
    }

    /// Record a video and return the absolute path of the written file.
    ///
    /// Resolves once the recording duration plus the grace period has
    /// elapsed and the media tool has exited. `progress` is called once per
    /// recorded second. Fails with `ModeNotSupported` before running
    /// anything, with the tool's own error if it fails, or with
    /// `CaptureTimedOut` if it is still running well past the duration.
    pub async fn take_video(
        &self,
        options: VideoOptions,
        progress: Option<ProgressCallback>,
    ) -> DevcapResult<PathBuf> {
        let plan = self.plan_capture(
            options.output,
            &self.defaults.video_output,
            options.resolution,
            options.fps,
            options.pixel_format,
        )?;
        let duration_secs = options
            .duration_secs
            .unwrap_or(self.defaults.video_duration_secs);
        let frames = frame_count(duration_secs, plan.framerate);

        let label = format!(
            "Recording {} ({} @ {}fps) for {} seconds",
            self.name(),
            plan.resolution,
            plan.framerate,
            duration_secs
        );
        tracing::info!(
            index = %self.index(),
            resolution = %plan.resolution,
            framerate = plan.framerate,
            frames,
            duration_secs,
            output = %plan.output.display(),
            "Starting video capture"
        );

        let args = ToolCommand::Video {
            index: self.index().to_string(),
            resolution: plan.resolution,
            framerate: plan.framerate,
            pixel_format: plan.pixel_format,
            frames,
            output: plan.output.clone(),
        }
        .to_args(self.tool.input_format());

        let recording = Duration::from_secs(duration_secs);
        let grace = recording + self.defaults.grace_period();
        let deadline = grace + self.defaults.completion_slack();

        let capture = self.tool.capture(&args);
        let ticker = async {
            drive_progress(duration_secs, &label, progress.as_ref()).await;
            Ok::<(), DevcapError>(())
        };
        let settle = async {
            tokio::time::sleep(grace).await;
            Ok::<(), DevcapError>(())
        };

        match tokio::time::timeout(deadline, async { tokio::try_join!(capture, ticker, settle) })
            .await
        {
            Ok(Ok(_)) => {
                tracing::info!(output = %plan.output.display(), "Video capture finished");
                Ok(plan.output)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Video capture failed");
                Err(e)
            }
            Err(_) => {
                tracing::warn!(
                    waited_secs = deadline.as_secs(),
                    "Video capture still running past its deadline"
                );
                Err(DevcapError::CaptureTimedOut {
                    waited_secs: deadline.as_secs(),
                })
            }
        }
    }
}

/// Tick once per second until `duration_secs` ticks have fired.
async fn drive_progress(duration_secs: u64, label: &str, progress: Option<&ProgressCallback>) {
    if duration_secs == 0 {
        return;
    }

    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + TICK, TICK);
    let mut elapsed_secs = 0;
    while elapsed_secs < duration_secs {
        interval.tick().await;
        elapsed_secs += 1;
        tracing::trace!(elapsed_secs, duration_secs, "Capture progress");
        if let Some(cb) = progress {
            cb(CaptureProgress::new(elapsed_secs, duration_secs, label));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use devcap_common::config::CaptureDefaults;
    use devcap_device_model::{DeviceKind, DeviceRecord};
    use tokio::time::Instant;

    use super::*;
    use crate::backend::scripted::ScriptedTool;

    const MODES: &str = "\
[avfoundation @ 0x7fe0c8d04a40]   1920x1080@[1.000000 30.000000]fps
[avfoundation @ 0x7fe0c8d04a40]   1280x720@[1.000000 30.000000]fps
[avfoundation @ 0x7fe0c8d04a40]   1280x720@[1.000000 60.000000]fps
[avfoundation @ 0x7fe0c8d04a40]   640x480@[1.000000 30.000000]fps";

    const FORMATS: &str = "\
[avfoundation @ 0x7fa1d2e04a00]   uyvy422
[avfoundation @ 0x7fa1d2e04a00]   nv12";

    async fn camera(tool: ScriptedTool) -> (Device, ScriptedTool) {
        let tool = tool.reply(MODES).reply(FORMATS);
        let mut device = Device::new(
            DeviceRecord::new("0", "FaceTime HD Camera", Some(DeviceKind::Video)),
            Arc::new(tool.clone()),
            CaptureDefaults::default(),
        );
        device.detect_features().await;
        (device, tool)
    }

    fn recorded_ticks() -> (Arc<Mutex<Vec<u64>>>, ProgressCallback) {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ticks);
        let cb: ProgressCallback = Box::new(move |p: CaptureProgress| {
            sink.lock().unwrap().push(p.elapsed_secs);
        });
        (ticks, cb)
    }

    #[tokio::test]
    async fn picture_defaults_to_widest_mode_and_first_format() {
        let (cam, tool) = camera(ScriptedTool::new()).await;

        let path = cam.take_picture(PictureOptions::default()).await.unwrap();

        assert!(path.is_absolute());
        assert!(path.ends_with("output.jpg"));
        let captures = tool.captures.lock().unwrap();
        assert_eq!(captures.len(), 1);
        let args = captures[0].join(" ");
        assert!(args.contains("-framerate 30 -video_size 1920x1080"));
        assert!(args.contains("-pixel_format uyvy422 -i 0 -vframes 1"));
    }

    #[tokio::test]
    async fn picture_uses_highest_rate_of_requested_resolution() {
        let (cam, tool) = camera(ScriptedTool::new()).await;

        cam.take_picture(
            PictureOptions::default()
                .resolution(Resolution::new(1280, 720))
                .pixel_format("nv12")
                .output("/tmp/still.jpg"),
        )
        .await
        .unwrap();

        let args = tool.captures.lock().unwrap()[0].join(" ");
        assert!(args.contains("-framerate 60 -video_size 1280x720 -pixel_format nv12"));
        assert!(args.ends_with("/tmp/still.jpg"));
    }

    #[tokio::test]
    async fn unsupported_picture_never_invokes_the_tool() {
        let (cam, tool) = camera(ScriptedTool::new()).await;

        let err = cam
            .take_picture(PictureOptions::default().resolution(Resolution::new(800, 600)))
            .await
            .unwrap_err();

        assert!(err.is_mode_not_supported());
        assert_eq!(tool.capture_count(), 0);
    }

    #[tokio::test]
    async fn capture_without_detected_modes_is_unsupported() {
        let tool = ScriptedTool::new();
        let cam = Device::new(
            DeviceRecord::new("0", "Camera", Some(DeviceKind::Video)),
            Arc::new(tool.clone()),
            CaptureDefaults::default(),
        );

        let picture = cam.take_picture(PictureOptions::default()).await;
        let video = cam.take_video(VideoOptions::default(), None).await;

        assert!(picture.unwrap_err().is_mode_not_supported());
        assert!(video.unwrap_err().is_mode_not_supported());
        assert_eq!(tool.capture_count(), 0);
    }

    #[tokio::test]
    async fn unsupported_error_names_the_requested_mode() {
        let cam = Device::new(
            DeviceRecord::new("0", "Camera", Some(DeviceKind::Video)),
            Arc::new(ScriptedTool::new()),
            CaptureDefaults::default(),
        );

        let err = cam
            .take_video(
                VideoOptions::default()
                    .resolution(Resolution::new(1280, 720))
                    .fps(30.0),
                None,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DevcapError::ModeNotSupported { width: 1280, height: 720, framerate } if framerate == 30.0
        ));
        assert_eq!(err.to_string(), "Mode not supported: 1280x720 @ 30fps");
    }

    #[tokio::test(start_paused = true)]
    async fn video_resolves_after_duration_plus_grace() {
        let (cam, tool) = camera(ScriptedTool::new()).await;
        let (ticks, cb) = recorded_ticks();
        let start = Instant::now();

        let path = cam
            .take_video(
                VideoOptions::default()
                    .duration_secs(10)
                    .resolution(Resolution::new(1920, 1080))
                    .fps(30.0),
                Some(cb),
            )
            .await
            .unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(11), "resolved after {elapsed:?}");
        assert!(elapsed < Duration::from_millis(11_100), "resolved after {elapsed:?}");
        assert!(path.ends_with("output.avi"));
        assert_eq!(*ticks.lock().unwrap(), (1..=10).collect::<Vec<u64>>());

        let args = tool.captures.lock().unwrap()[0].join(" ");
        assert!(args.contains("-i 0:none -vframes 300"));
    }

    #[tokio::test(start_paused = true)]
    async fn video_waits_for_a_slow_tool() {
        let (cam, _tool) =
            camera(ScriptedTool::new().with_capture_delay(Duration::from_secs(8))).await;
        let start = Instant::now();

        cam.take_video(VideoOptions::default().duration_secs(2), None)
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn video_times_out_when_tool_hangs() {
        let (cam, _tool) =
            camera(ScriptedTool::new().with_capture_delay(Duration::from_secs(1000))).await;
        let start = Instant::now();

        let err = cam
            .take_video(VideoOptions::default().duration_secs(3), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DevcapError::CaptureTimedOut { waited_secs: 14 }));
        assert!(start.elapsed() < Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_capture_is_reported_without_waiting() {
        let (cam, _tool) = camera(ScriptedTool::new().failing_captures()).await;
        let start = Instant::now();

        let err = cam
            .take_video(VideoOptions::default().duration_secs(10), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DevcapError::CaptureFailed { .. }));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn unsupported_video_starts_nothing() {
        let (cam, tool) = camera(ScriptedTool::new()).await;
        let (ticks, cb) = recorded_ticks();

        let err = cam
            .take_video(
                VideoOptions::default()
                    .resolution(Resolution::new(1920, 1080))
                    .fps(60.0),
                Some(cb),
            )
            .await
            .unwrap_err();

        assert!(err.is_mode_not_supported());
        assert_eq!(tool.capture_count(), 0);
        assert!(ticks.lock().unwrap().is_empty());
    }

    #[test]
    fn progress_percent_is_rounded_and_capped() {
        assert_eq!(CaptureProgress::new(1, 3, "").percent, 33);
        assert_eq!(CaptureProgress::new(2, 3, "").percent, 67);
        assert_eq!(CaptureProgress::new(4, 3, "").percent, 100);
        assert_eq!(CaptureProgress::new(0, 0, "").percent, 100);
    }
}
