//! Move and resize, replayed as pointer gestures on the calendar grid.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use owo_colors::OwoColorize;
use planning_core::controller::{GridPoint, Handle, Message, Notice, Target};
use planning_core::id::EventId;

use crate::commands::{self, Filters, Session};

pub async fn run_move(
    filters: &Filters,
    id: EventId,
    date: Option<NaiveDate>,
    start: Option<NaiveTime>,
) -> Result<()> {
    let mut session = commands::open(filters).await?;
    let event = commands::require_event(&session, &id)?;

    // Grabbing the block at its start makes the drop cell the new start.
    let grab = GridPoint::new(event.date(), event.start.time());
    let drop = GridPoint::new(
        date.unwrap_or(event.date()),
        start.unwrap_or(event.start.time()),
    );

    let notices = gesture(&mut session, &id, Handle::Body, grab, drop).await;
    report(notices)
}

pub async fn run_resize(
    filters: &Filters,
    id: EventId,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> Result<()> {
    if start.is_none() && end.is_none() {
        anyhow::bail!("Nothing to resize: pass --start and/or --end");
    }

    let mut session = commands::open(filters).await?;
    let mut notices = Vec::new();

    if let Some(start) = start {
        let event = commands::require_event(&session, &id)?;
        let grab = GridPoint::new(event.date(), event.start.time());
        let drop = GridPoint::new(event.date(), start);
        notices.extend(gesture(&mut session, &id, Handle::StartEdge, grab, drop).await);
    }

    if let Some(end) = end {
        let event = commands::require_event(&session, &id)?;
        let slot = session.options().slot;

        // The end edge lands at the end of the hovered cell.
        let cell_of = |time: NaiveTime| {
            let at = event.date().and_time(time) - slot;
            (at.date() == event.date()).then(|| GridPoint::new(at.date(), at.time()))
        };
        let grab = cell_of(event.end.time()).unwrap_or(GridPoint::new(event.date(), event.start.time()));
        let drop = cell_of(end)
            .with_context(|| format!("End time {} is before the first slot of the day", end))?;

        notices.extend(gesture(&mut session, &id, Handle::EndEdge, grab, drop).await);
    }

    report(notices)
}

async fn gesture(
    session: &mut Session,
    id: &EventId,
    handle: Handle,
    grab: GridPoint,
    drop: GridPoint,
) -> Vec<Notice> {
    session
        .dispatch(Message::PointerDown {
            target: Target::Event {
                id: id.clone(),
                handle,
            },
            point: grab,
        })
        .await;
    session
        .dispatch(Message::PointerDrag { point: drop })
        .await;
    session.dispatch(Message::PointerUp { point: drop }).await
}

fn report(notices: Vec<Notice>) -> Result<()> {
    if notices.is_empty() {
        println!("{}", "Nothing to change".dimmed());
        return Ok(());
    }
    commands::finish(notices)
}
