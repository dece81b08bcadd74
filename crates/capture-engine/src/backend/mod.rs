//! The media tool seam.
//!
//! Everything the engine learns about devices comes from running an external
//! media tool and reading what it prints. [`MediaTool`] is that capability;
//! [`FfmpegTool`] is the production implementation.

use devcap_common::error::DevcapResult;

pub mod ffmpeg;

pub use ffmpeg::FfmpegTool;

#[cfg(test)]
pub(crate) mod scripted;

/// Input format used when a tool does not say otherwise.
pub const DEFAULT_INPUT_FORMAT: &str = "avfoundation";

/// Abstract interface over one invocation of the external media tool.
#[async_trait::async_trait]
pub trait MediaTool: Send + Sync {
    /// Run a capability probe and return the diagnostic text it printed.
    ///
    /// The tool reports capabilities as errors, so the exit status is
    /// ignored. A tool that cannot be started yields empty text.
    async fn probe(&self, args: &[String]) -> String;

    /// Run a capture invocation to completion.
    async fn capture(&self, args: &[String]) -> DevcapResult<()>;

    /// Capture subsystem passed to the tool as its input format.
    fn input_format(&self) -> &str {
        DEFAULT_INPUT_FORMAT
    }

    /// Tool name for logging.
    fn name(&self) -> &str;
}
