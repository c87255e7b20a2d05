//! Reference data listings.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::{self, Filters};
use crate::render::Render;

pub async fn assignees() -> Result<()> {
    let session = commands::open(&Filters::default()).await?;
    print_all(&session.directory().assignees, "No employees found");
    Ok(())
}

pub async fn clients() -> Result<()> {
    let session = commands::open(&Filters::default()).await?;
    print_all(&session.directory().clients, "No clients found");
    Ok(())
}

pub async fn types() -> Result<()> {
    let session = commands::open(&Filters::default()).await?;
    print_all(session.event_types(), "No event types found");
    Ok(())
}

fn print_all<T: Render>(items: &[T], empty: &str) {
    if items.is_empty() {
        println!("{}", empty.dimmed());
    }
    for item in items {
        println!("  {}", item.render());
    }
}
