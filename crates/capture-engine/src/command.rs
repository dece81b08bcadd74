//! Argument construction for media tool invocations.
//!
//! Each [`ToolCommand`] renders to the argv for one invocation; nothing here
//! spawns processes.

use std::path::PathBuf;

use devcap_device_model::{Mode, Resolution};

/// One invocation of the media tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCommand {
    /// Enumerate capture devices.
    ListDevices,
    /// Open a device without hints so the tool lists its supported modes.
    ProbeModes { index: String },
    /// Open a device in a known-good mode so the tool lists its pixel formats.
    ProbePixelFormats { index: String, mode: Mode },
    /// Grab a single frame.
    Picture {
        index: String,
        resolution: Resolution,
        framerate: f64,
        pixel_format: Option<String>,
        output: PathBuf,
    },
    /// Record `frames` frames of video without audio.
    Video {
        index: String,
        resolution: Resolution,
        framerate: f64,
        pixel_format: Option<String>,
        frames: u64,
        output: PathBuf,
    },
}

impl ToolCommand {
    /// Render the argument list for the given input format.
    pub fn to_args(&self, input_format: &str) -> Vec<String> {
        let mut args = vec!["-hide_banner".to_string()];

        match self {
            Self::ListDevices => {
                push_input_format(&mut args, input_format);
                args.extend(["-list_devices", "true", "-i", ""].map(String::from));
            }
            Self::ProbeModes { index } => {
                push_input_format(&mut args, input_format);
                args.extend(["-i".to_string(), index.clone()]);
            }
            Self::ProbePixelFormats { index, mode } => {
                args.push("-y".to_string());
                push_input_format(&mut args, input_format);
                push_size_and_rate(&mut args, mode.resolution(), mode.fps_max());
                args.extend(["-i".to_string(), index.clone()]);
            }
            Self::Picture {
                index,
                resolution,
                framerate,
                pixel_format,
                output,
            } => {
                args.push("-y".to_string());
                push_input_format(&mut args, input_format);
                push_size_and_rate(&mut args, *resolution, *framerate);
                push_pixel_format(&mut args, pixel_format.as_deref());
                args.extend(["-i".to_string(), index.clone()]);
                args.extend(["-vframes".to_string(), "1".to_string()]);
                args.push(output.to_string_lossy().into_owned());
            }
            Self::Video {
                index,
                resolution,
                framerate,
                pixel_format,
                frames,
                output,
            } => {
                args.push("-y".to_string());
                push_input_format(&mut args, input_format);
                push_size_and_rate(&mut args, *resolution, *framerate);
                push_pixel_format(&mut args, pixel_format.as_deref());
                // `<video>:none` opens the video device without an audio input.
                args.extend(["-i".to_string(), format!("{index}:none")]);
                args.extend(["-vframes".to_string(), frames.to_string()]);
                args.push(output.to_string_lossy().into_owned());
            }
        }

        args
    }
}

/// Frames needed for `duration_secs` of video at `fps`, rounded to the nearest frame.
pub fn frame_count(duration_secs: u64, fps: f64) -> u64 {
    (duration_secs as f64 * fps).round().max(0.0) as u64
}

fn push_input_format(args: &mut Vec<String>, input_format: &str) {
    args.extend(["-f".to_string(), input_format.to_string()]);
}

fn push_size_and_rate(args: &mut Vec<String>, resolution: Resolution, framerate: f64) {
    args.extend([
        "-framerate".to_string(),
        framerate.to_string(),
        "-video_size".to_string(),
        resolution.to_string(),
    ]);
}

fn push_pixel_format(args: &mut Vec<String>, pixel_format: Option<&str>) {
    if let Some(pf) = pixel_format {
        args.extend(["-pixel_format".to_string(), pf.to_string()]);
    }
}
