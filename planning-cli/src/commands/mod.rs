pub mod delete;
pub mod duplicate;
pub mod events;
pub mod lists;
pub mod new;
pub mod reschedule;

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate, NaiveTime};
use planning_core::controller::{Controller, ControllerOptions, Message, Notice};
use planning_core::id::{AssigneeId, ClientId, EventId};
use planning_core::menu::Point;
use planning_core::store::HttpStore;
use planning_core::{Event, PlanningConfig};

use crate::clipboard::SystemClipboard;
use crate::render::Render;
use crate::utils::tui;

pub type Session = Controller<HttpStore>;

/// Active filters given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub assignee: Option<String>,
    pub client: Option<String>,
}

/// Load config, connect to the API and fetch the planning.
pub async fn open(filters: &Filters) -> Result<Session> {
    let config = PlanningConfig::load().context("Could not load planning configuration")?;
    let store = HttpStore::new(&config)?;

    let mut session = Controller::new(
        store,
        Box::new(SystemClipboard::new()),
        ControllerOptions::from(&config),
    );

    if let Some(assignee) = &filters.assignee {
        session.set_assignee_filter(Some(AssigneeId::new(assignee)));
    }
    if let Some(client) = &filters.client {
        session.set_client_filter(Some(ClientId::new(client)));
    }

    let spinner = tui::create_spinner(format!("Loading planning from {}", config.api_url));
    let notices = session.load().await;
    spinner.finish_and_clear();

    finish(notices)?;
    Ok(session)
}

/// Print notices; the first error becomes the command's error.
pub fn finish(notices: Vec<Notice>) -> Result<()> {
    let mut first_error = None;

    for notice in notices {
        if notice.is_error() {
            eprintln!("{}", notice.render());
            first_error.get_or_insert(notice.message);
        } else {
            println!("{}", notice.render());
        }
    }

    match first_error {
        Some(message) => anyhow::bail!(message),
        None => Ok(()),
    }
}

/// Look up a cached event, failing with a readable message.
pub fn require_event(session: &Session, id: &EventId) -> Result<Event> {
    session
        .find_event(id)
        .cloned()
        .with_context(|| format!("No event with id {}", id))
}

/// Open the context menu of an event, the way a right-click would.
pub async fn select(session: &mut Session, id: &EventId) -> Result<()> {
    require_event(session, id)?;
    session
        .dispatch(Message::RightClick {
            event: id.clone(),
            position: Point::default(),
        })
        .await;
    Ok(())
}

/// Parse a date given as `YYYY-MM-DD`, `today` or `tomorrow`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    match input.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => today
            .checked_add_days(Days::new(1))
            .context("Date out of range"),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", input)),
    }
}

/// Parse a time of day given as `HH:MM`.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .with_context(|| format!("Invalid time '{}', expected HH:MM", input))
}
