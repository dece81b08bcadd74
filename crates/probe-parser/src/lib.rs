//! devcap Probe Parser
//!
//! Turns the free-form diagnostic text the media tool prints on stderr into
//! structured data:
//! - **Device listing:** `[index] name` entries grouped by video/audio section
//! - **Modes:** `<w>x<h>@[<min> <max>]fps` occurrences, several per line allowed
//! - **Pixel formats:** tool-tagged lines, after dropping noise lines
//!
//! This crate is pure computation — no I/O, no process handling. Every parser
//! accepts arbitrary text and returns an empty result when nothing matches.

pub mod listing;
pub mod modes;
pub mod pixel_formats;

pub use listing::parse_device_list;
pub use modes::{parse_modes, sort_modes};
pub use pixel_formats::parse_pixel_formats;
