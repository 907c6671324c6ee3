//! Recording display title sink for testing.

use std::sync::Mutex;

use crate::detail::DisplayTitleSink;

/// Records every label it receives.
#[derive(Debug, Default)]
pub struct RecordingTitleSink {
    labels: Mutex<Vec<String>>,
}

impl RecordingTitleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All labels received, oldest first.
    pub fn labels(&self) -> Vec<String> {
        self.labels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The most recent label.
    pub fn current(&self) -> Option<String> {
        self.labels().pop()
    }
}

impl DisplayTitleSink for RecordingTitleSink {
    fn set_label(&self, label: &str) {
        self.labels
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(label.to_string());
    }
}
