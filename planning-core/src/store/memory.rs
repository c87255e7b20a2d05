//! In-process event store.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{PlanningError, PlanningResult};
use crate::event::{EventFields, EventType, RawEvent};
use crate::id::EventId;
use crate::reference::{Assignee, Client};
use crate::store::EventStore;

/// A call received by a `MemoryStore`, kept in order of arrival.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    List,
    Create(EventFields),
    Update(EventId, EventFields),
    Delete(EventId),
}

/// Event store backed by process memory.
///
/// Identifiers are assigned sequentially after the highest numeric identifier
/// already present. Taking the store offline makes every call fail the way an
/// unreachable API would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<RawEvent>>,
    assignees: Vec<Assignee>,
    clients: Vec<Client>,
    calls: Mutex<Vec<StoreCall>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new(records: Vec<RawEvent>) -> Self {
        MemoryStore {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn with_directory(mut self, assignees: Vec<Assignee>, clients: Vec<Client>) -> Self {
        self.assignees = assignees;
        self.clients = clients;
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Snapshot of the stored records.
    pub fn records(&self) -> Vec<RawEvent> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Calls that would have changed the store.
    pub fn mutations(&self) -> Vec<StoreCall> {
        self.calls()
            .into_iter()
            .filter(|c| *c != StoreCall::List)
            .collect()
    }

    fn record(&self, call: StoreCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn ensure_online(&self) -> PlanningResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(PlanningError::Api {
                status: 503,
                message: "Planning store is offline".to_string(),
            });
        }
        Ok(())
    }

    fn with_records<T>(&self, f: impl FnOnce(&mut Vec<RawEvent>) -> PlanningResult<T>) -> PlanningResult<T> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| PlanningError::Validation("Memory store lock poisoned".to_string()))?;
        f(&mut records)
    }

    fn next_id(records: &[RawEvent]) -> EventId {
        let highest = records
            .iter()
            .filter_map(|r| r.id.as_ref())
            .filter_map(|id| id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        EventId::from(highest + 1)
    }

    fn apply_create(&self, fields: &EventFields) -> PlanningResult<RawEvent> {
        self.record(StoreCall::Create(fields.clone()));
        self.ensure_online()?;

        self.with_records(|records| {
            let created = fields.to_raw(Some(Self::next_id(records)));
            records.push(created.clone());
            Ok(created)
        })
    }

    fn apply_update(&self, id: &EventId, fields: &EventFields) -> PlanningResult<RawEvent> {
        self.record(StoreCall::Update(id.clone(), fields.clone()));
        self.ensure_online()?;

        self.with_records(|records| {
            let record = records
                .iter_mut()
                .find(|r| r.id.as_ref() == Some(id))
                .ok_or_else(|| PlanningError::NotFound(id.to_string()))?;
            *record = fields.to_raw(Some(id.clone()));
            Ok(record.clone())
        })
    }

    fn apply_delete(&self, id: &EventId) -> PlanningResult<()> {
        self.record(StoreCall::Delete(id.clone()));
        self.ensure_online()?;

        self.with_records(|records| {
            let before = records.len();
            records.retain(|r| r.id.as_ref() != Some(id));
            if records.len() == before {
                return Err(PlanningError::NotFound(id.to_string()));
            }
            Ok(())
        })
    }

    fn apply_list(&self) -> PlanningResult<Vec<RawEvent>> {
        self.record(StoreCall::List);
        self.ensure_online()?;
        self.with_records(|records| Ok(records.clone()))
    }
}

impl EventStore for MemoryStore {
    async fn list_events(&self) -> PlanningResult<Vec<RawEvent>> {
        self.apply_list()
    }

    async fn create_event(&self, fields: &EventFields) -> PlanningResult<RawEvent> {
        self.apply_create(fields)
    }

    async fn update_event(&self, id: &EventId, fields: &EventFields) -> PlanningResult<RawEvent> {
        self.apply_update(id, fields)
    }

    async fn delete_event(&self, id: &EventId) -> PlanningResult<()> {
        self.apply_delete(id)
    }

    async fn list_assignees(&self) -> PlanningResult<Vec<Assignee>> {
        self.ensure_online()?;
        Ok(self.assignees.clone())
    }

    async fn list_clients(&self) -> PlanningResult<Vec<Client>> {
        self.ensure_online()?;
        Ok(self.clients.clone())
    }

    async fn list_event_types(&self) -> PlanningResult<Vec<EventType>> {
        self.ensure_online()?;
        Ok(EventType::BUILTIN.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn fields(subject: &str) -> EventFields {
        EventFields {
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            event_type: EventType::Meeting,
            subject: subject.to_string(),
            service: String::new(),
            assignee_id: Some(1.into()),
            client_id: Some(1.into()),
            billing_mode: None,
            hourly_rate: None,
            flat_fee: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = MemoryStore::new(vec![RawEvent {
            id: Some(EventId::from(7)),
            ..Default::default()
        }]);

        let first = store.create_event(&fields("a")).await.unwrap();
        let second = store.create_event(&fields("b")).await.unwrap();

        assert_eq!(first.id, Some(EventId::from(8)));
        assert_eq!(second.id, Some(EventId::from(9)));
        assert_eq!(store.records().len(), 3);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids_fail() {
        let store = MemoryStore::default();
        let id = EventId::from(1);

        assert!(matches!(
            store.update_event(&id, &fields("a")).await,
            Err(PlanningError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_event(&id).await,
            Err(PlanningError::NotFound(_))
        ));
        assert_eq!(store.mutations().len(), 2);
    }

    #[tokio::test]
    async fn offline_store_rejects_calls_but_records_them() {
        let store = MemoryStore::default();
        store.set_offline(true);

        assert!(store.list_events().await.is_err());
        assert!(store.create_event(&fields("a")).await.is_err());
        assert!(store.records().is_empty());
        assert_eq!(store.calls().len(), 2);
    }
}
