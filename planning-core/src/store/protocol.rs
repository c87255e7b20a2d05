//! Typed requests of the planning HTTP API.
//!
//! Each request type names its endpoint and its response type, so
//! `HttpStore::call` stays type-safe at compile time.

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::event::{EventFields, EventType, RawEvent};
use crate::id::EventId;
use crate::reference::{Assignee, Client};

pub trait ApiCommand: Serialize {
    type Response: DeserializeOwned;

    fn endpoint() -> Endpoint;

    /// Path relative to the API base URL.
    fn path(&self) -> String {
        Self::endpoint().base_path().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListEvents,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    ListAssignees,
    ListClients,
    ListEventTypes,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::CreateEvent => Method::POST,
            Endpoint::UpdateEvent => Method::PUT,
            Endpoint::DeleteEvent => Method::DELETE,
            Endpoint::ListEvents
            | Endpoint::ListAssignees
            | Endpoint::ListClients
            | Endpoint::ListEventTypes => Method::GET,
        }
    }

    fn base_path(&self) -> &'static str {
        match self {
            Endpoint::ListEvents
            | Endpoint::CreateEvent
            | Endpoint::UpdateEvent
            | Endpoint::DeleteEvent => "plannings",
            Endpoint::ListAssignees => "salaries",
            Endpoint::ListClients => "clients",
            Endpoint::ListEventTypes => "plannings/types-evenements",
        }
    }

    /// Whether the request carries a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, Endpoint::CreateEvent | Endpoint::UpdateEvent)
    }
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ListEvents;

impl ApiCommand for ListEvents {
    type Response = Vec<RawEvent>;

    fn endpoint() -> Endpoint {
        Endpoint::ListEvents
    }
}

/// Create request. The store answers with every record it created.
#[derive(Debug, Serialize)]
pub struct CreateEvent<'a> {
    #[serde(flatten)]
    pub fields: &'a EventFields,
    #[serde(rename = "nb_repetitions")]
    pub repetitions: u32,
}

impl ApiCommand for CreateEvent<'_> {
    type Response = Vec<RawEvent>;

    fn endpoint() -> Endpoint {
        Endpoint::CreateEvent
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateEvent<'a> {
    #[serde(skip)]
    pub id: &'a EventId,
    #[serde(flatten)]
    pub fields: &'a EventFields,
}

impl ApiCommand for UpdateEvent<'_> {
    type Response = RawEvent;

    fn endpoint() -> Endpoint {
        Endpoint::UpdateEvent
    }

    fn path(&self) -> String {
        format!("plannings/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteEvent<'a> {
    #[serde(skip)]
    pub id: &'a EventId,
}

impl ApiCommand for DeleteEvent<'_> {
    type Response = ();

    fn endpoint() -> Endpoint {
        Endpoint::DeleteEvent
    }

    fn path(&self) -> String {
        format!("plannings/{}", self.id)
    }
}

// ============================================================================
// Reference data
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ListAssignees;

impl ApiCommand for ListAssignees {
    type Response = Vec<Assignee>;

    fn endpoint() -> Endpoint {
        Endpoint::ListAssignees
    }
}

#[derive(Debug, Serialize)]
pub struct ListClients;

impl ApiCommand for ListClients {
    type Response = Vec<Client>;

    fn endpoint() -> Endpoint {
        Endpoint::ListClients
    }
}

#[derive(Debug, Serialize)]
pub struct ListEventTypes;

impl ApiCommand for ListEventTypes {
    type Response = Vec<EventType>;

    fn endpoint() -> Endpoint {
        Endpoint::ListEventTypes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn fields() -> EventFields {
        EventFields {
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            start: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            event_type: EventType::Meeting,
            subject: "Review".to_string(),
            service: String::new(),
            assignee_id: Some(1.into()),
            client_id: Some(2.into()),
            billing_mode: None,
            hourly_rate: None,
            flat_fee: None,
        }
    }

    #[test]
    fn update_targets_record_path_without_id_in_body() {
        let fields = fields();
        let id = EventId::from(9);
        let cmd = UpdateEvent { id: &id, fields: &fields };

        assert_eq!(cmd.path(), "plannings/9");
        assert_eq!(UpdateEvent::endpoint().method(), Method::PUT);

        let body = serde_json::to_value(&cmd).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["heure_debut"], "14:00");
    }

    #[test]
    fn create_sends_repetition_count() {
        let fields = fields();
        let body = serde_json::to_value(CreateEvent {
            fields: &fields,
            repetitions: 1,
        })
        .unwrap();

        assert_eq!(body["nb_repetitions"], 1);
        assert_eq!(body["objet"], "Review");
    }

    #[test]
    fn only_writes_carry_a_body() {
        assert!(Endpoint::CreateEvent.has_body());
        assert!(!Endpoint::DeleteEvent.has_body());
        assert_eq!(ListEventTypes.path(), "plannings/types-evenements");
    }
}
