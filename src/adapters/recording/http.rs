//! Captures HTTP exchanges that pass through the interception layer.

use tracing::warn;

use crate::ports::http::{CallDescriptor, HttpRequest, HttpResponse, RecordedLine};

/// Buffers recorded lines between `start` and `drain`.
#[derive(Debug, Default)]
pub struct ExchangeRecorder {
    recording: bool,
    lines: Vec<RecordedLine>,
}

impl ExchangeRecorder {
    /// Creates an idle recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts capturing.
    pub fn start(&mut self) {
        self.recording = true;
    }

    /// Returns `true` while capturing.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Captures a completed exchange. Ignored while idle.
    pub fn record_exchange(&mut self, request: &HttpRequest, response: &HttpResponse) {
        if !self.recording {
            return;
        }
        match CallDescriptor::from_exchange(request, response) {
            Ok(descriptor) => self.lines.push(RecordedLine::Exchange(descriptor)),
            Err(e) => {
                warn!(url = %request.url, error = %e, "exchange could not be recorded");
                self.note(format!("unrecordable {} {}: {e}", request.method, request.url));
            }
        }
    }

    /// Captures a diagnostic line. Ignored while idle.
    pub fn note(&mut self, message: impl Into<String>) {
        if self.recording {
            self.lines.push(RecordedLine::Note(message.into()));
        }
    }

    /// Stops capturing and returns everything captured, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<RecordedLine> {
        self.recording = false;
        std::mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn response() -> HttpResponse {
        HttpResponse { status: 200, headers: BTreeMap::new(), body: "ok".into() }
    }

    #[test]
    fn idle_recorder_captures_nothing() {
        let mut recorder = ExchangeRecorder::new();
        recorder.record_exchange(&HttpRequest::new("GET", "http://h/a"), &response());
        recorder.note("ignored");
        assert!(recorder.drain().is_empty());
    }

    #[test]
    fn drain_returns_lines_and_resets() {
        let mut recorder = ExchangeRecorder::new();
        recorder.start();
        recorder.record_exchange(&HttpRequest::new("GET", "http://h/a"), &response());
        recorder.record_exchange(&HttpRequest::new("GET", "relative"), &response());
        recorder.note("upstream reset");

        let lines = recorder.drain();
        assert_eq!(lines.len(), 3);
        assert!(matches!(&lines[0], RecordedLine::Exchange(d) if d.path == "/a"));
        assert!(matches!(&lines[1], RecordedLine::Note(n) if n.contains("unrecordable")));
        assert!(!recorder.is_recording());
        assert!(recorder.drain().is_empty());
    }
}
