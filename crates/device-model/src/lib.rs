//! devcap Device Model
//!
//! Defines the data contracts shared by the parser, the capture engine and
//! the CLI:
//! - **Resolution / Mode:** one supported capture configuration (frame size
//!   plus framerate range)
//! - **DeviceRecord:** one entry of the media tool's device listing
//! - **Capabilities:** the modes and pixel formats detected for a device,
//!   with mode validation and default selection
//!
//! Device indices are opaque strings; some platforms use non-numeric ids.

pub mod capabilities;
pub mod device;
pub mod mode;

pub use capabilities::*;
pub use device::*;
pub use mode::*;
