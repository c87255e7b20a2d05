mod clipboard;
mod commands;
mod render;
mod utils;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use planning_core::id::EventId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Filters;
use crate::commands::duplicate::CopyTarget;
use crate::commands::new::NewEvent;

#[derive(Parser)]
#[command(name = "planning")]
#[command(about = "Browse and edit the team planning from the terminal")]
struct Cli {
    #[command(flatten)]
    filters: FilterArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Only show events of this employee (also the default assignee of new events)
    #[arg(short, long, global = true)]
    assignee: Option<String>,

    /// Only show events for this client
    #[arg(short, long, global = true)]
    client: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, grouped by day
    Events {
        /// First day to show (YYYY-MM-DD, "today" or "tomorrow")
        #[arg(long, value_parser = commands::parse_date)]
        from: Option<NaiveDate>,

        /// Last day to show (YYYY-MM-DD)
        #[arg(long, value_parser = commands::parse_date)]
        to: Option<NaiveDate>,
    },
    /// List employees
    Assignees,
    /// List clients
    Clients,
    /// List event types
    Types,
    /// Create an event
    New {
        /// Subject (prompted for when omitted)
        subject: Option<String>,

        #[arg(short, long, value_parser = commands::parse_date)]
        date: NaiveDate,

        /// Start time (HH:MM)
        #[arg(short, long, value_parser = commands::parse_time)]
        start: NaiveTime,

        /// End time (HH:MM)
        #[arg(short, long, value_parser = commands::parse_time)]
        end: NaiveTime,

        /// Event type label, e.g. "Intervention" or "Réunion"
        #[arg(short = 't', long = "type")]
        event_type: Option<String>,

        /// Client of the event (prompted for when omitted)
        #[arg(long = "for")]
        for_client: Option<String>,

        #[arg(long)]
        service: Option<String>,

        /// "Comptabilisé" or "Non Comptabilisé"
        #[arg(long)]
        billing: Option<String>,

        #[arg(long)]
        hourly_rate: Option<f64>,

        #[arg(long)]
        flat_fee: Option<f64>,

        #[command(flatten)]
        repeat: RepeatArgs,
    },
    /// Move an event to another day and/or start time
    Move {
        id: String,

        #[arg(short, long, value_parser = commands::parse_date)]
        date: Option<NaiveDate>,

        /// New start time (HH:MM); the duration is kept
        #[arg(short, long, value_parser = commands::parse_time)]
        start: Option<NaiveTime>,
    },
    /// Change the start and/or end time of an event
    Resize {
        id: String,

        #[arg(short, long, value_parser = commands::parse_time)]
        start: Option<NaiveTime>,

        #[arg(short, long, value_parser = commands::parse_time)]
        end: Option<NaiveTime>,
    },
    /// Copy an event's details to the clipboard and create a copy of it
    Duplicate {
        id: String,

        #[arg(short, long, value_parser = commands::parse_date)]
        date: Option<NaiveDate>,

        #[arg(short, long, value_parser = commands::parse_time)]
        start: Option<NaiveTime>,

        #[command(flatten)]
        repeat: RepeatArgs,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args)]
struct RepeatArgs {
    /// Number of events to create
    #[arg(short = 'n', long, default_value_t = 1)]
    repeat: u32,

    /// Place repeated events one week apart instead of on the same slot
    #[arg(long)]
    weekly: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planning=warn,planning_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let filters = Filters {
        assignee: cli.filters.assignee,
        client: cli.filters.client,
    };

    match cli.command {
        Commands::Events { from, to } => commands::events::run(&filters, from, to).await,
        Commands::Assignees => commands::lists::assignees().await,
        Commands::Clients => commands::lists::clients().await,
        Commands::Types => commands::lists::types().await,
        Commands::New {
            subject,
            date,
            start,
            end,
            event_type,
            for_client,
            service,
            billing,
            hourly_rate,
            flat_fee,
            repeat,
        } => {
            let args = NewEvent {
                subject,
                date,
                start,
                end,
                event_type,
                client: for_client.or_else(|| filters.client.clone()),
                service,
                billing,
                hourly_rate,
                flat_fee,
                repetitions: repeat.repeat,
                weekly: repeat.weekly,
            };
            commands::new::run(&filters, args).await
        }
        Commands::Move { id, date, start } => {
            commands::reschedule::run_move(&filters, EventId::new(id), date, start).await
        }
        Commands::Resize { id, start, end } => {
            commands::reschedule::run_resize(&filters, EventId::new(id), start, end).await
        }
        Commands::Duplicate {
            id,
            date,
            start,
            repeat,
        } => {
            let target = CopyTarget {
                date,
                start,
                repetitions: repeat.repeat,
                weekly: repeat.weekly,
            };
            commands::duplicate::run(&filters, EventId::new(id), target).await
        }
        Commands::Delete { id, force } => {
            commands::delete::run(&filters, EventId::new(id), force).await
        }
    }
}
