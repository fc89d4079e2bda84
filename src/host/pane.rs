// Console output pane
#![allow(dead_code)]

use crate::runner::ReportSink;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Text pane backed by any writer; stdout for the binary
pub struct ConsolePane<W: Write + Send> {
    name: String,
    writer: Mutex<W>,
}

impl ConsolePane<std::io::Stdout> {
    pub fn stdout(name: impl Into<String>) -> Self {
        Self::new(name, std::io::stdout())
    }
}

impl ConsolePane<std::io::Stderr> {
    pub fn stderr(name: impl Into<String>) -> Self {
        Self::new(name, std::io::stderr())
    }
}

impl<W: Write + Send> ConsolePane<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> ReportSink for ConsolePane<W> {
    async fn write_line(&self, text: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(writer, "{text}") {
            warn!(pane = %self.name, error = %e, "failed to write to pane");
        }
    }

    async fn activate(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writer.flush() {
            warn!(pane = %self.name, error = %e, "failed to flush pane");
        }
        debug!(pane = %self.name, "pane activated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lines_end_with_newline() {
        let pane = ConsolePane::new("test", Vec::new());
        pane.write_line("first").await;
        pane.write_line("").await;
        pane.activate().await;

        let text = String::from_utf8(pane.into_inner()).unwrap();
        assert_eq!(text, "first\n\n");
    }
}
