//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DevcapError, DevcapResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// External media tool settings.
    pub tool: ToolConfig,

    /// Default capture parameters.
    pub capture: CaptureDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// How the external media tool is invoked.
///
/// The input format is always `avfoundation`; the listing and probe parsers
/// only understand its diagnostic text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Binary name or path.
    pub binary: PathBuf,
}

/// Default capture parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureDefaults {
    /// Output file for still captures.
    pub picture_output: PathBuf,

    /// Output file for video captures.
    pub video_output: PathBuf,

    /// Video length in whole seconds.
    pub video_duration_secs: u64,

    /// Extra wait after the recording duration before a video is considered done.
    pub grace_period_ms: u64,

    /// How long past the grace period a video capture may keep running before
    /// it is reported as timed out.
    pub completion_slack_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "devcap_capture_engine=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
        }
    }
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            picture_output: PathBuf::from("output.jpg"),
            video_output: PathBuf::from("output.avi"),
            video_duration_secs: 1,
            grace_period_ms: 1000,
            completion_slack_secs: 10,
        }
    }
}

impl CaptureDefaults {
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    pub fn completion_slack(&self) -> Duration {
        Duration::from_secs(self.completion_slack_secs)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from `path`.
    ///
    /// A missing file gives the defaults. A file that exists but cannot be
    /// read or parsed is a `Config` error.
    pub fn load_from(path: &Path) -> DevcapResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            DevcapError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            DevcapError::config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Load config from the standard location, falling back to defaults
    /// when the file is broken.
    ///
    /// The problem is handed back instead of logged so the caller can report
    /// it once logging is initialised.
    pub fn load_or_default() -> (Self, Option<DevcapError>) {
        Self::load_or_default_from(&config_file_path())
    }

    pub fn load_or_default_from(path: &Path) -> (Self, Option<DevcapError>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Save config to the standard location.
    pub fn save(&self) -> DevcapResult<PathBuf> {
        let path = config_file_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write config as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> DevcapResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("devcap").join("config.json")
}
