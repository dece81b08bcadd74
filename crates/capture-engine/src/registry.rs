//! Device enumeration.

use std::sync::Arc;

use devcap_common::config::{AppConfig, CaptureDefaults};
use devcap_probe_parser::parse_device_list;

use crate::backend::{FfmpegTool, MediaTool};
use crate::command::ToolCommand;
use crate::device::Device;

/// Enumerates devices through a media tool.
#[derive(Clone)]
pub struct DeviceRegistry {
    tool: Arc<dyn MediaTool>,
    defaults: CaptureDefaults,
}

impl DeviceRegistry {
    pub fn new(tool: Arc<dyn MediaTool>, defaults: CaptureDefaults) -> Self {
        Self { tool, defaults }
    }

    /// Registry backed by the configured ffmpeg binary.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(FfmpegTool::new(&config.tool)),
            config.capture.clone(),
        )
    }

    /// List devices in the order the tool reports them.
    ///
    /// Runs the tool once. An unavailable tool or unparsable output gives an
    /// empty list.
    pub async fn list_devices(&self) -> Vec<Device> {
        let args = ToolCommand::ListDevices.to_args(self.tool.input_format());
        let text = self.tool.probe(&args).await;

        let devices: Vec<Device> = parse_device_list(&text)
            .into_iter()
            .map(|record| Device::new(record, Arc::clone(&self.tool), self.defaults.clone()))
            .collect();

        tracing::info!(
            tool = self.tool.name(),
            devices = devices.len(),
            "Device enumeration finished"
        );
        devices
    }
}

/// List devices using the configured ffmpeg binary.
pub async fn list_devices(config: &AppConfig) -> Vec<Device> {
    DeviceRegistry::from_config(config).list_devices().await
}
