//! Enumerated capture devices and capability detection.

use std::fmt;
use std::sync::Arc;

use devcap_common::config::CaptureDefaults;
use devcap_device_model::{Capabilities, DeviceKind, DeviceRecord, Mode};
use devcap_probe_parser::{parse_modes, parse_pixel_formats, sort_modes};

use crate::backend::MediaTool;
use crate::command::ToolCommand;

/// One capture device reported by the media tool.
///
/// Identity is fixed at enumeration. Capabilities start empty and are only
/// replaced by [`Device::detect_features`].
pub struct Device {
    record: DeviceRecord,
    capabilities: Capabilities,
    pub(crate) tool: Arc<dyn MediaTool>,
    pub(crate) defaults: CaptureDefaults,
}

impl Device {
    pub fn new(record: DeviceRecord, tool: Arc<dyn MediaTool>, defaults: CaptureDefaults) -> Self {
        Self {
            record,
            capabilities: Capabilities::default(),
            tool,
            defaults,
        }
    }

    /// Identifier passed back to the media tool, verbatim.
    pub fn index(&self) -> &str {
        &self.record.index
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn kind(&self) -> Option<DeviceKind> {
        self.record.kind
    }

    /// Detected modes, ascending by width. Empty until detection finds some.
    pub fn modes(&self) -> &[Mode] {
        self.capabilities.modes()
    }

    /// Detected pixel formats in listing order.
    pub fn pixel_formats(&self) -> &[String] {
        self.capabilities.pixel_formats()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Probe the device for its modes, then for its pixel formats.
    ///
    /// Only video devices are probed. Re-running replaces earlier results.
    /// Finding no modes is not an error: the device is left without
    /// capabilities and every mode check fails.
    pub async fn detect_features(&mut self) {
        if !self.record.is_video() {
            tracing::debug!(
                index = %self.record.index,
                kind = ?self.record.kind,
                "Skipping capability probe for non-video device"
            );
            return;
        }

        let detected = Capabilities::new(self.detect_modes().await, Vec::new());
        let Some(probe_mode) = detected.probe_mode().cloned() else {
            tracing::warn!(
                index = %self.record.index,
                name = %self.record.name,
                "No supported modes detected"
            );
            self.capabilities = Capabilities::default();
            return;
        };

        let pixel_formats = self.detect_pixel_formats(probe_mode).await;

        tracing::info!(
            index = %self.record.index,
            modes = detected.modes().len(),
            pixel_formats = pixel_formats.len(),
            "Device capabilities detected"
        );
        self.capabilities = detected.with_pixel_formats(pixel_formats);
    }

    async fn detect_modes(&self) -> Vec<Mode> {
        let args = ToolCommand::ProbeModes {
            index: self.record.index.clone(),
        }
        .to_args(self.tool.input_format());
        let text = self.tool.probe(&args).await;

        let mut modes = parse_modes(&text);
        sort_modes(&mut modes);
        modes
    }

    async fn detect_pixel_formats(&self, mode: Mode) -> Vec<String> {
        let args = ToolCommand::ProbePixelFormats {
            index: self.record.index.clone(),
            mode,
        }
        .to_args(self.tool.input_format());
        let text = self.tool.probe(&args).await;

        parse_pixel_formats(&text)
    }

    /// Whether some detected mode has this size and accepts `framerate`.
    pub fn test_mode(&self, width: u32, height: u32, framerate: f64) -> bool {
        self.capabilities.test_mode(width, height, framerate)
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("record", &self.record)
            .field("capabilities", &self.capabilities)
            .field("tool", &self.tool.name())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}
