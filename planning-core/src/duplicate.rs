//! Duplicate workflow: clipboard export of a selected event.

use thiserror::Error;

use crate::event::{Event, TIME_FORMAT};
use crate::reference::Directory;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not copy to clipboard: {0}")]
pub struct ClipboardError(pub String);

/// Destination for the text summary of a duplicated event.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// A clipboard that keeps the last written text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Human-readable multi-line summary of an event.
///
/// Assignee and client names are resolved through `directory` when known and
/// fall back to their identifiers.
pub fn clipboard_summary(event: &Event, directory: &Directory) -> String {
    let mut lines = vec![
        event.title(),
        format!("Date: {}", event.date().format("%A %d %B %Y")),
        format!(
            "Time: {} - {}",
            event.start.format(TIME_FORMAT),
            event.end.format(TIME_FORMAT)
        ),
    ];

    if !event.service.is_empty() {
        lines.push(format!("Service: {}", event.service));
    }

    if let Some(id) = &event.assignee_id {
        let name = directory
            .assignee(id)
            .map(|a| a.to_string())
            .unwrap_or_else(|| format!("#{}", id));
        lines.push(format!("Assignee: {}", name));
    }

    if let Some(id) = &event.client_id {
        let name = directory
            .client(id)
            .map(|c| c.to_string())
            .unwrap_or_else(|| format!("#{}", id));
        lines.push(format!("Client: {}", name));
    }

    if let Some(mode) = event.billing_mode {
        lines.push(format!("Billing: {}", mode));
    }
    if let Some(rate) = event.hourly_rate {
        lines.push(format!("Hourly rate: {:.2} €", rate));
    }
    if let Some(fee) = event.flat_fee {
        lines.push(format!("Flat fee: {:.2} €", fee));
    }

    lines.join("\n")
}
