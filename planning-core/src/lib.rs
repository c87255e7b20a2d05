//! Scheduling calendar core.
//!
//! Records come from an [`store::EventStore`], are turned into calendar-ready
//! [`event::Event`]s by [`normalize`], narrowed by [`filter`], and edited
//! through the [`controller::Controller`] state machine.

pub mod config;
pub mod controller;
pub mod draft;
pub mod duplicate;
pub mod error;
pub mod event;
pub mod filter;
pub mod id;
pub mod menu;
pub mod normalize;
pub mod reference;
pub mod store;

pub use config::PlanningConfig;
pub use controller::{Controller, ControllerOptions, Message, Notice};
pub use error::{PlanningError, PlanningResult};
pub use event::{Event, EventType, RawEvent};
