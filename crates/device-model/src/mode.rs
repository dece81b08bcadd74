//! Resolution and capture mode values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors produced while building model values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid resolution {0:?}, expected <width>x<height>")]
    InvalidResolution(String),

    #[error("Invalid framerate range {min}..{max}")]
    InvalidFramerate { min: f64, max: f64 },
}

impl FromStr for Resolution {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidResolution(s.to_string());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = w.parse().map_err(|_| invalid())?;
        let height: u32 = h.parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

/// One supported capture configuration: a resolution and the framerate
/// range the device accepts at that resolution.
///
/// Immutable once built; `min <= max` and both are strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mode {
    resolution: Resolution,
    framerate_min: f64,
    framerate_max: f64,
}

impl Mode {
    pub fn new(
        resolution: Resolution,
        framerate_min: f64,
        framerate_max: f64,
    ) -> Result<Self, ModelError> {
        let valid = framerate_min.is_finite()
            && framerate_max.is_finite()
            && framerate_min > 0.0
            && framerate_min <= framerate_max;
        if !valid {
            return Err(ModelError::InvalidFramerate {
                min: framerate_min,
                max: framerate_max,
            });
        }
        Ok(Self {
            resolution,
            framerate_min,
            framerate_max,
        })
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn width(&self) -> u32 {
        self.resolution.width
    }

    pub fn height(&self) -> u32 {
        self.resolution.height
    }

    pub fn fps_min(&self) -> f64 {
        self.framerate_min
    }

    pub fn fps_max(&self) -> f64 {
        self.framerate_max
    }

    /// Framerate range as displayed in tables, e.g. `1 - 30`.
    pub fn framerate(&self) -> String {
        format!("{} - {}", self.framerate_min, self.framerate_max)
    }

    /// Whether this mode accepts the given size and framerate.
    pub fn accepts(&self, width: u32, height: u32, framerate: f64) -> bool {
        self.resolution.width == width
            && self.resolution.height == height
            && self.framerate_min <= framerate
            && framerate <= self.framerate_max
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.resolution, self.framerate())
    }
}
