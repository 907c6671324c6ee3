//! Window title sink for terminals that understand OSC 0.

use std::io::{self, Write};

use popcorn_core::DisplayTitleSink;
use tracing::debug;

/// Writes the display label to the terminal window title.
pub struct TerminalTitle;

impl DisplayTitleSink for TerminalTitle {
    fn set_label(&self, label: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = write!(stdout, "\x1b]0;{}\x07", label).and_then(|_| stdout.flush()) {
            debug!("Failed to set terminal title: {}", e);
        }
    }
}
