use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use devcap_common::config::ToolConfig;
use devcap_common::error::{DevcapError, DevcapResult};

use crate::backend::MediaTool;

/// Number of trailing diagnostic lines kept in capture errors.
const DIAGNOSTIC_TAIL_LINES: usize = 12;

/// Runs the `ffmpeg` binary as a child process.
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    binary: PathBuf,
}

impl FfmpegTool {
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            binary: config.binary.clone(),
        }
    }

    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// First line of `-version` output, or an error when the binary cannot run.
    pub async fn version(&self) -> DevcapResult<String> {
        let output = self
            .command(&["-version".to_string()])
            .output()
            .await
            .map_err(|e| {
                DevcapError::tool(format!("Failed to start {}: {e}", self.binary.display()))
            })?;

        if !output.status.success() {
            return Err(DevcapError::tool(format!(
                "{} -version exited with {}",
                self.binary.display(),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

impl Default for FfmpegTool {
    fn default() -> Self {
        Self::new(&ToolConfig::default())
    }
}

#[async_trait::async_trait]
impl MediaTool for FfmpegTool {
    async fn probe(&self, args: &[String]) -> String {
        tracing::debug!(binary = %self.binary.display(), ?args, "Running probe");
        match self.command(args).output().await {
            Ok(output) => {
                tracing::debug!(
                    status = %output.status,
                    stderr_bytes = output.stderr.len(),
                    "Probe finished"
                );
                String::from_utf8_lossy(&output.stderr).into_owned()
            }
            Err(e) => {
                tracing::warn!(
                    binary = %self.binary.display(),
                    error = %e,
                    "Failed to start media tool; treating probe as empty"
                );
                String::new()
            }
        }
    }

    async fn capture(&self, args: &[String]) -> DevcapResult<()> {
        tracing::debug!(binary = %self.binary.display(), ?args, "Running capture");
        let child = self.command(args).spawn().map_err(|e| {
            DevcapError::tool(format!("Failed to start {}: {e}", self.binary.display()))
        })?;

        tracing::info!(pid = child.id(), "Capture process started");

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| DevcapError::tool(format!("Failed to wait on capture: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DevcapError::capture_failed(
                output.status.to_string(),
                diagnostic_tail(&stderr, DIAGNOSTIC_TAIL_LINES),
            ));
        }

        tracing::info!("Capture process finished");
        Ok(())
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

/// Last `max_lines` non-empty lines of diagnostic text, joined.
fn diagnostic_tail(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}
