use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use owo_colors::OwoColorize;

use crate::commands::{self, Filters};
use crate::render::render_event;

/// Days shown when no end date is given.
const DEFAULT_SPAN_DAYS: u64 = 7;

pub async fn run(filters: &Filters, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    let session = commands::open(filters).await?;

    let from = from.unwrap_or_else(|| Local::now().date_naive());
    let to = to.unwrap_or_else(|| from + Days::new(DEFAULT_SPAN_DAYS - 1));

    let mut events: Vec<_> = session
        .visible_events()
        .into_iter()
        .filter(|e| e.date() >= from && e.date() <= to)
        .collect();
    events.sort_by_key(|e| e.start);

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group events by day
    let mut current_date = None;

    for event in &events {
        let date = event.date();
        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(date).bold());
            current_date = Some(date);
        }

        println!("{}", render_event(event, session.directory()));
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate) -> String {
    let today = Local::now().date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
