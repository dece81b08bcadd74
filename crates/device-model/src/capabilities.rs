//! Detected capabilities of a video device.

use serde::Serialize;

use crate::mode::Mode;

/// Modes and pixel formats detected for one device.
///
/// `modes` is kept in the order the caller supplied (ascending by width
/// after detection); `pixel_formats` keeps the listing order, duplicates
/// included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Capabilities {
    modes: Vec<Mode>,
    pixel_formats: Vec<String>,
}

impl Capabilities {
    pub fn new(modes: Vec<Mode>, pixel_formats: Vec<String>) -> Self {
        Self {
            modes,
            pixel_formats,
        }
    }

    /// Same modes, with `pixel_formats` replacing the stored ones.
    pub fn with_pixel_formats(mut self, pixel_formats: Vec<String>) -> Self {
        self.pixel_formats = pixel_formats;
        self
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn pixel_formats(&self) -> &[String] {
        &self.pixel_formats
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty() && self.pixel_formats.is_empty()
    }

    /// True iff some stored mode has this exact size and a framerate range
    /// containing `framerate`. Always false when no modes are stored.
    pub fn test_mode(&self, width: u32, height: u32, framerate: f64) -> bool {
        self.modes
            .iter()
            .any(|mode| mode.accepts(width, height, framerate))
    }

    /// Default capture mode: the last (widest) stored mode.
    pub fn default_mode(&self) -> Option<&Mode> {
        self.modes.last()
    }

    /// Mode used to probe pixel formats: the first (narrowest) stored mode.
    pub fn probe_mode(&self) -> Option<&Mode> {
        self.modes.first()
    }

    /// Default pixel format: the first one listed.
    pub fn default_pixel_format(&self) -> Option<&str> {
        self.pixel_formats.first().map(String::as_str)
    }
}
