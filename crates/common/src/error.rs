//! Error types shared across devcap crates.

/// Top-level error type for devcap operations.
#[derive(Debug, thiserror::Error)]
pub enum DevcapError {
    /// The requested resolution/framerate matches no detected mode.
    #[error("Mode not supported: {width}x{height} @ {framerate}fps")]
    ModeNotSupported {
        width: u32,
        height: u32,
        framerate: f64,
    },

    #[error("Media tool error: {message}")]
    Tool { message: String },

    #[error("Capture failed ({status}): {diagnostics}")]
    CaptureFailed { status: String, diagnostics: String },

    #[error("Capture did not finish within {waited_secs}s")]
    CaptureTimedOut { waited_secs: u64 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using DevcapError.
pub type DevcapResult<T> = Result<T, DevcapError>;

impl DevcapError {
    pub fn mode_not_supported(width: u32, height: u32, framerate: f64) -> Self {
        Self::ModeNotSupported {
            width,
            height,
            framerate,
        }
    }

    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool {
            message: msg.into(),
        }
    }

    pub fn capture_failed(status: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self::CaptureFailed {
            status: status.into(),
            diagnostics: diagnostics.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the caller can recover by choosing another mode.
    pub fn is_mode_not_supported(&self) -> bool {
        matches!(self, Self::ModeNotSupported { .. })
    }
}
