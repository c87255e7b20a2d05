//! Event store adapters.
//!
//! The calendar never owns persistence: every read and write goes through an
//! `EventStore`. `HttpStore` talks to the planning API, `MemoryStore` keeps
//! records in process (offline use and tests).

mod http;
mod memory;
pub mod protocol;

pub use http::HttpStore;
pub use memory::{MemoryStore, StoreCall};

use std::future::Future;

use crate::error::PlanningResult;
use crate::event::{EventFields, EventType, RawEvent};
use crate::id::EventId;
use crate::reference::{Assignee, Client};

/// Remote collaborator holding the planning records and their reference data.
pub trait EventStore {
    /// Every record visible to the current session.
    fn list_events(&self) -> impl Future<Output = PlanningResult<Vec<RawEvent>>> + Send;

    /// Persist one new record and return it with its store-assigned identifier.
    fn create_event(
        &self,
        fields: &EventFields,
    ) -> impl Future<Output = PlanningResult<RawEvent>> + Send;

    /// Replace the listed fields of an existing record.
    fn update_event(
        &self,
        id: &EventId,
        fields: &EventFields,
    ) -> impl Future<Output = PlanningResult<RawEvent>> + Send;

    fn delete_event(&self, id: &EventId) -> impl Future<Output = PlanningResult<()>> + Send;

    fn list_assignees(&self) -> impl Future<Output = PlanningResult<Vec<Assignee>>> + Send;

    fn list_clients(&self) -> impl Future<Output = PlanningResult<Vec<Client>>> + Send;

    /// Event types offered by the store.
    fn list_event_types(&self) -> impl Future<Output = PlanningResult<Vec<EventType>>> + Send;
}
