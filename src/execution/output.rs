//! Output view buffer

use super::{ExecutionResponse, GatewayError};

/// Marker appended to the pending line on every wait tick.
pub const WAIT_MARKER: char = '.';

/// Lines shown in the output pane.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    lines: Vec<String>,
}

impl OutputLog {
    pub fn new() -> Self {
        OutputLog { lines: Vec::new() }
    }

    /// Append text, one entry per line; a trailing newline adds nothing.
    pub fn push(&mut self, text: &str) {
        let mut parts: Vec<&str> = text.split('\n').collect();
        if parts.last().is_some_and(|s| s.is_empty()) {
            parts.pop();
        }
        self.lines.extend(parts.into_iter().map(str::to_string));
    }

    /// Start the placeholder line for a new run.
    pub fn begin_run(&mut self) {
        self.lines.push("▶ running".to_string());
    }

    /// Extend the last line with one wait marker.
    pub fn append_marker(&mut self) {
        match self.lines.last_mut() {
            Some(last) => last.push(WAIT_MARKER),
            None => self.lines.push(WAIT_MARKER.to_string()),
        }
    }

    /// Show a gateway result verbatim.
    pub fn record(&mut self, result: &Result<ExecutionResponse, GatewayError>) {
        match result {
            Ok(ExecutionResponse::Success { output }) if output.is_empty() => {
                self.push("(no output)")
            }
            Ok(ExecutionResponse::Success { output }) => self.push(output),
            Ok(ExecutionResponse::Failure { error }) => self.push(error),
            Err(err) => self.push(&format!("error: {}", err)),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
