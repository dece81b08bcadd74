//! Scripted media tool for tests: canned probe text, recorded invocations.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use devcap_common::error::{DevcapError, DevcapResult};

use crate::backend::MediaTool;

#[derive(Clone, Default)]
pub(crate) struct ScriptedTool {
    probe_replies: Arc<Mutex<VecDeque<String>>>,
    pub probes: Arc<Mutex<Vec<Vec<String>>>>,
    pub captures: Arc<Mutex<Vec<Vec<String>>>>,
    capture_delay: Duration,
    capture_fails: bool,
}

impl ScriptedTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the diagnostic text returned by the next probe.
    pub fn reply(self, text: &str) -> Self {
        self.probe_replies
            .lock()
            .unwrap()
            .push_back(text.to_string());
        self
    }

    pub fn with_capture_delay(mut self, delay: Duration) -> Self {
        self.capture_delay = delay;
        self
    }

    pub fn failing_captures(mut self) -> Self {
        self.capture_fails = true;
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probes.lock().unwrap().len()
    }

    pub fn capture_count(&self) -> usize {
        self.captures.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl MediaTool for ScriptedTool {
    async fn probe(&self, args: &[String]) -> String {
        self.probes.lock().unwrap().push(args.to_vec());
        self.probe_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default()
    }

    async fn capture(&self, args: &[String]) -> DevcapResult<()> {
        self.captures.lock().unwrap().push(args.to_vec());
        tokio::time::sleep(self.capture_delay).await;
        if self.capture_fails {
            return Err(DevcapError::capture_failed(
                "exit status: 1",
                "0: Input/output error",
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
