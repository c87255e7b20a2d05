//! System clipboard for the duplicate workflow.

use planning_core::duplicate::{Clipboard, ClipboardError};
use tracing::debug;

/// Clipboard backed by the desktop session, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| {
                debug!(error = %e, "System clipboard unavailable");
                ClipboardError(e.to_string())
            })?,
        };

        let written = clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError(e.to_string()));
        self.inner = Some(clipboard);
        written
    }
}
