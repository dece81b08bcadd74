//! devcap Capture Engine
//!
//! Discovers capture devices, detects what they support, and runs still and
//! video captures, all by driving an external media tool (ffmpeg) and
//! reading its diagnostic output.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ DeviceRegistry ──list_devices──▶ Vec<Device> │
//! │                                    │         │
//! │              detect_features ◀─────┤         │
//! │              take_picture    ◀─────┤         │
//! │              take_video      ◀─────┘         │
//! │                    │                         │
//! │                    ▼                         │
//! │  ToolCommand ──argv──▶ MediaTool (ffmpeg)    │
//! │                    │                         │
//! │                    ▼                         │
//! │        stderr text ──▶ devcap-probe-parser   │
//! └──────────────────────────────────────────────┘
//! ```

pub mod backend;
pub mod command;
pub mod device;
pub mod registry;
pub mod session;

pub use backend::{FfmpegTool, MediaTool};
pub use command::ToolCommand;
pub use device::Device;
pub use registry::{list_devices, DeviceRegistry};
pub use session::*;
