//! Terminal rendering for planning types.
//!
//! Extension traits that add colored output to planning-core types using
//! owo_colors.

use owo_colors::OwoColorize;
use planning_core::controller::{Notice, NoticeLevel};
use planning_core::event::{Event, EventType};
use planning_core::reference::{Assignee, Client, Directory};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Notice {
    fn render(&self) -> String {
        match self.level {
            NoticeLevel::Success => format!("{} {}", "✓".green(), self.message),
            NoticeLevel::Info => self.message.dimmed().to_string(),
            NoticeLevel::Error => format!("{} {}", "✗".red(), self.message.red()),
        }
    }
}

/// Split an `#rrggbb` colour into its components.
fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

impl Render for EventType {
    fn render(&self) -> String {
        let label = match rgb(self.color()) {
            Some((r, g, b)) => self.label().truecolor(r, g, b).to_string(),
            None => self.label().to_string(),
        };
        let billing = if self.is_billable() {
            format!(" {}", "(billable)".dimmed())
        } else {
            String::new()
        };

        format!("{} {}{}", self.icon(), label, billing)
    }
}

impl Render for Assignee {
    fn render(&self) -> String {
        format!("{} {}", format!("#{}", self.id).dimmed(), self)
    }
}

impl Render for Client {
    fn render(&self) -> String {
        format!("{} {}", format!("#{}", self.id).dimmed(), self)
    }
}

/// One agenda line: time range, type icon, title and who it involves.
pub fn render_event(event: &Event, directory: &Directory) -> String {
    let time = format!(
        "{}-{}",
        event.start.format("%H:%M"),
        event.end.format("%H:%M")
    );

    let mut people = Vec::new();
    if let Some(id) = &event.assignee_id {
        people.push(
            directory
                .assignee(id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| format!("#{}", id)),
        );
    }
    if let Some(id) = &event.client_id {
        people.push(
            directory
                .client(id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("#{}", id)),
        );
    }

    let id = event
        .id
        .as_ref()
        .map(|id| format!("#{}", id))
        .unwrap_or_default();

    let title = match rgb(event.event_type.color()) {
        Some((r, g, b)) => event.title().truecolor(r, g, b).to_string(),
        None => event.title(),
    };

    format!(
        "  {} {} {} {} {}",
        time,
        event.event_type.icon(),
        title,
        format!("[{}]", people.join(" · ")).dimmed(),
        id.dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(rgb("#16a085"), Some((0x16, 0xa0, 0x85)));
        assert_eq!(rgb("16a085"), None);
        assert_eq!(rgb("#fff"), None);
    }
}
