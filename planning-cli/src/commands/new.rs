use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use dialoguer::{Input, Select};
use planning_core::controller::Message;
use planning_core::draft::{Draft, Repeat};
use planning_core::event::{BillingMode, EventType};
use planning_core::id::{AssigneeId, ClientId};

use crate::commands::{self, Filters, Session};
use crate::render::Render;

/// Options of a new planning entry; anything left out is prompted for.
#[derive(Debug)]
pub struct NewEvent {
    pub subject: Option<String>,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub event_type: Option<String>,
    pub client: Option<String>,
    pub service: Option<String>,
    pub billing: Option<String>,
    pub hourly_rate: Option<f64>,
    pub flat_fee: Option<f64>,
    pub repetitions: u32,
    pub weekly: bool,
}

pub async fn run(filters: &Filters, args: NewEvent) -> Result<()> {
    let mut session = commands::open(filters).await?;

    let subject = match args.subject {
        Some(subject) => subject,
        None => Input::<String>::new()
            .with_prompt("  Subject")
            .interact_text()?,
    };

    let event_type = match args.event_type {
        Some(label) => EventType::from(label),
        None => prompt_event_type(&session)?,
    };

    let client_id = match args.client {
        Some(client) => ClientId::new(client),
        None => prompt_client(&session)?,
    };

    // Without an assignee filter the employee has to be picked explicitly.
    let assignee_id = match session.filter().assignee {
        Some(_) => None,
        None => Some(prompt_assignee(&session)?),
    };

    let billing_mode = match args.billing.as_deref() {
        Some(label) => Some(
            BillingMode::from_label(label)
                .with_context(|| format!("Unknown billing mode '{}'", label))?,
        ),
        None => None,
    };

    let draft = Draft {
        event_type: Some(event_type),
        subject: Some(subject),
        service: args.service,
        assignee_id,
        client_id: Some(client_id),
        billing_mode,
        hourly_rate: args.hourly_rate,
        flat_fee: args.flat_fee,
        repetitions: args.repetitions,
        repeat: if args.weekly {
            Repeat::Weekly
        } else {
            Repeat::SameSlot
        },
        ..Draft::from_slot(args.date, args.start, args.end)
    };

    session.dispatch(Message::OpenForm).await;
    let notices = session.dispatch(Message::SubmitForm(draft)).await;
    commands::finish(notices)
}

fn prompt_event_type(session: &Session) -> Result<EventType> {
    let types = session.event_types();
    let items: Vec<String> = types.iter().map(|t| t.render()).collect();

    let index = Select::new()
        .with_prompt("  Type")
        .items(&items)
        .default(0)
        .interact()?;

    types.get(index).cloned().context("No event type selected")
}

fn prompt_assignee(session: &Session) -> Result<AssigneeId> {
    let assignees = &session.directory().assignees;
    if assignees.is_empty() {
        anyhow::bail!("No employees available; pass --assignee <id>");
    }

    let items: Vec<String> = assignees.iter().map(|a| a.to_string()).collect();
    let index = Select::new()
        .with_prompt("  Employee")
        .items(&items)
        .default(0)
        .interact()?;

    assignees
        .get(index)
        .map(|a| a.id.clone())
        .context("No employee selected")
}

fn prompt_client(session: &Session) -> Result<ClientId> {
    let clients = &session.directory().clients;
    if clients.is_empty() {
        anyhow::bail!("No clients available; pass --client <id>");
    }

    let items: Vec<String> = clients.iter().map(|c| c.to_string()).collect();
    let index = Select::new()
        .with_prompt("  Client")
        .items(&items)
        .default(0)
        .interact()?;

    clients
        .get(index)
        .map(|c| c.id.clone())
        .context("No client selected")
}
