use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use planning_core::controller::Message;
use planning_core::id::EventId;
use planning_core::menu::MenuAction;

use crate::commands::{self, Filters};
use crate::render::render_event;

pub async fn run(filters: &Filters, id: EventId, force: bool) -> Result<()> {
    let mut session = commands::open(filters).await?;
    let event = commands::require_event(&session, &id)?;

    commands::select(&mut session, &id).await?;
    session.dispatch(Message::Menu(MenuAction::Delete)).await;

    println!("{}", event.date().format("%a %b %-d").bold());
    println!("{}", render_event(&event, session.directory()));

    let confirmed = force
        || Confirm::new()
            .with_prompt("Delete this event?")
            .default(false)
            .interact()?;

    let notices = session.dispatch(Message::ConfirmDelete(confirmed)).await;
    if !confirmed {
        println!("{}", "Nothing deleted".dimmed());
    }
    commands::finish(notices)
}
