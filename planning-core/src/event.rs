//! Planning event types.
//!
//! `RawEvent` is the record exactly as the planning API stores it (French
//! field names, everything optional). `Event` is the calendar-ready form
//! produced by the normalizer, and `EventFields` is the payload written back
//! on create and update.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::{AssigneeId, ClientId, EventId};

/// Kind of planning entry.
///
/// The store exchanges these as French labels. Labels this build does not
/// know are preserved verbatim in `Other` so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Absence,
    Cancellation,
    Leave,
    Miscellaneous,
    Training,
    Intervention,
    SickLeave,
    PhoneCallback,
    PrivateAppointment,
    Meeting,
    ReducedHours,
    MedicalVisit,
    Other(String),
}

impl EventType {
    /// Every type the store knows about, in the order the store lists them.
    pub const BUILTIN: [EventType; 12] = [
        EventType::Absence,
        EventType::Cancellation,
        EventType::Leave,
        EventType::Miscellaneous,
        EventType::Training,
        EventType::Intervention,
        EventType::SickLeave,
        EventType::PhoneCallback,
        EventType::PrivateAppointment,
        EventType::Meeting,
        EventType::ReducedHours,
        EventType::MedicalVisit,
    ];

    /// Wire label used by the planning API.
    pub fn label(&self) -> &str {
        match self {
            EventType::Absence => "Absence",
            EventType::Cancellation => "Annulation",
            EventType::Leave => "Congé",
            EventType::Miscellaneous => "Divers",
            EventType::Training => "Formation",
            EventType::Intervention => "Intervention",
            EventType::SickLeave => "Maladie",
            EventType::PhoneCallback => "Rappel téléphonique",
            EventType::PrivateAppointment => "RDV privé",
            EventType::Meeting => "Réunion",
            EventType::ReducedHours => "RTT",
            EventType::MedicalVisit => "Visite médicale",
            EventType::Other(label) => label,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EventType::Absence => "🚫",
            EventType::Cancellation => "❌",
            EventType::Leave => "🏖️",
            EventType::Miscellaneous => "📋",
            EventType::Training => "📚",
            EventType::Intervention => "🔧",
            EventType::SickLeave => "🤒",
            EventType::PhoneCallback => "📞",
            EventType::PrivateAppointment => "👤",
            EventType::Meeting => "👥",
            EventType::ReducedHours => "🕐",
            EventType::MedicalVisit => "🏥",
            EventType::Other(_) => "📅",
        }
    }

    /// Display colour as an `#rrggbb` hex string.
    pub fn color(&self) -> &'static str {
        match self {
            EventType::Absence => "#ff6b6b",
            EventType::Cancellation => "#e74c3c",
            EventType::Leave => "#3498db",
            EventType::Miscellaneous => "#95a5a6",
            EventType::Training => "#9b59b6",
            EventType::Intervention => "#2ecc71",
            EventType::SickLeave => "#e67e22",
            EventType::PhoneCallback => "#f39c12",
            EventType::PrivateAppointment => "#34495e",
            EventType::Meeting => "#16a085",
            EventType::ReducedHours => "#8e44ad",
            EventType::MedicalVisit => "#c0392b",
            EventType::Other(_) => "#74b9ff",
        }
    }

    /// Whether entries of this type carry billing information.
    pub fn is_billable(&self) -> bool {
        matches!(
            self,
            EventType::Intervention | EventType::Training | EventType::Miscellaneous
        )
    }
}

impl From<String> for EventType {
    fn from(label: String) -> Self {
        let trimmed = label.trim();
        EventType::BUILTIN
            .iter()
            .find(|t| t.label().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| EventType::Other(trimmed.to_string()))
    }
}

impl From<&str> for EventType {
    fn from(label: &str) -> Self {
        EventType::from(label.to_string())
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.label().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether an event is counted for invoicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingMode {
    #[serde(rename = "Comptabilisé")]
    Billed,
    #[serde(rename = "Non Comptabilisé")]
    NotBilled,
}

impl BillingMode {
    pub fn label(&self) -> &'static str {
        match self {
            BillingMode::Billed => "Comptabilisé",
            BillingMode::NotBilled => "Non Comptabilisé",
        }
    }

    /// Lenient parse used for stored records; empty or unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Comptabilisé" | "billed" => Some(BillingMode::Billed),
            "Non Comptabilisé" | "not-billed" => Some(BillingMode::NotBilled),
            _ => None,
        }
    }
}

impl fmt::Display for BillingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingMode::Billed => write!(f, "billed"),
            BillingMode::NotBilled => write!(f, "not billed"),
        }
    }
}

/// A planning record as persisted by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, alias = "ID")]
    pub id: Option<EventId>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, rename = "heure_debut")]
    pub start_time: Option<String>,
    #[serde(default, rename = "heure_fin")]
    pub end_time: Option<String>,
    #[serde(default, rename = "type_evenement")]
    pub event_type: Option<String>,
    #[serde(default, rename = "objet")]
    pub subject: Option<String>,
    #[serde(default, rename = "prestation")]
    pub service: Option<String>,
    #[serde(default, rename = "salarie_id")]
    pub assignee_id: Option<AssigneeId>,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default, rename = "facturation")]
    pub billing_mode: Option<String>,
    #[serde(default, rename = "taux_horaire")]
    pub hourly_rate: Option<f64>,
    #[serde(default, rename = "forfait_ht")]
    pub flat_fee: Option<f64>,
}

/// Payload of a create or update request (full replace of the listed fields).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventFields {
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    #[serde(rename = "heure_debut", with = "wire_time")]
    pub start: NaiveTime,
    #[serde(rename = "heure_fin", with = "wire_time")]
    pub end: NaiveTime,
    #[serde(rename = "type_evenement")]
    pub event_type: EventType,
    #[serde(rename = "objet")]
    pub subject: String,
    #[serde(rename = "prestation")]
    pub service: String,
    #[serde(rename = "salarie_id", skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<AssigneeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(rename = "facturation", skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<BillingMode>,
    #[serde(rename = "taux_horaire", skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(rename = "forfait_ht", skip_serializing_if = "Option::is_none")]
    pub flat_fee: Option<f64>,
}

impl EventFields {
    /// The stored form of these fields under the given identifier.
    pub fn to_raw(&self, id: Option<EventId>) -> RawEvent {
        RawEvent {
            id,
            date: Some(self.date.format(DATE_FORMAT).to_string()),
            start_time: Some(self.start.format(TIME_FORMAT).to_string()),
            end_time: Some(self.end.format(TIME_FORMAT).to_string()),
            event_type: Some(self.event_type.label().to_string()),
            subject: Some(self.subject.clone()),
            service: Some(self.service.clone()),
            assignee_id: self.assignee_id.clone(),
            client_id: self.client_id.clone(),
            billing_mode: self.billing_mode.map(|m| m.label().to_string()),
            hourly_rate: self.hourly_rate,
            flat_fee: self.flat_fee,
        }
    }
}

/// A calendar-ready event with resolved start and end instants.
///
/// Instants are naive local date-times: the store keeps wall-clock values and
/// no time zone is ever applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Option<EventId>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub event_type: EventType,
    pub subject: String,
    pub service: String,
    pub assignee_id: Option<AssigneeId>,
    pub client_id: Option<ClientId>,
    pub billing_mode: Option<BillingMode>,
    pub hourly_rate: Option<f64>,
    pub flat_fee: Option<f64>,
}

impl Event {
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Calendar title: `"<type> - <subject>"`.
    pub fn title(&self) -> String {
        match self.event_type.label() {
            "" => self.subject.clone(),
            label => format!("{} - {}", label, self.subject),
        }
    }

    pub fn fields(&self) -> EventFields {
        EventFields {
            date: self.date(),
            start: self.start.time(),
            end: self.end.time(),
            event_type: self.event_type.clone(),
            subject: self.subject.clone(),
            service: self.service.clone(),
            assignee_id: self.assignee_id.clone(),
            client_id: self.client_id.clone(),
            billing_mode: self.billing_mode,
            hourly_rate: self.hourly_rate,
            flat_fee: self.flat_fee,
        }
    }

    /// This event's fields moved to a new date and time range.
    pub fn rescheduled(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> EventFields {
        EventFields {
            date,
            start,
            end,
            ..self.fields()
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M";

mod wire_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(super::DATE_FORMAT))
    }
}

mod wire_time {
    use chrono::NaiveTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(super::TIME_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn audit() -> EventFields {
        EventFields {
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            event_type: EventType::Intervention,
            subject: "Audit".to_string(),
            service: "Network review".to_string(),
            assignee_id: Some(AssigneeId::from(3)),
            client_id: Some(ClientId::from(12)),
            billing_mode: Some(BillingMode::Billed),
            hourly_rate: Some(45.0),
            flat_fee: None,
        }
    }

    #[test]
    fn fields_serialize_with_store_names() {
        let json = serde_json::to_value(audit()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "date": "2025-03-20",
                "heure_debut": "10:00",
                "heure_fin": "11:30",
                "type_evenement": "Intervention",
                "objet": "Audit",
                "prestation": "Network review",
                "salarie_id": 3,
                "client_id": 12,
                "facturation": "Comptabilisé",
                "taux_horaire": 45.0
            })
        );
    }

    #[test]
    fn raw_event_accepts_gorm_style_id() {
        let raw: RawEvent = serde_json::from_str(
            r#"{"ID": 5, "date": "2025-03-20", "heure_debut": "09:00", "heure_fin": "10:00",
                "type_evenement": "Réunion", "objet": "Kickoff", "salarie_id": 2, "client_id": "4"}"#,
        )
        .unwrap();

        assert_eq!(raw.id, Some(EventId::from("5")));
        assert_eq!(raw.assignee_id, Some(AssigneeId::from("2")));
        assert_eq!(raw.client_id, Some(ClientId::from(4)));
        assert_eq!(raw.subject.as_deref(), Some("Kickoff"));
    }

    #[test]
    fn event_type_round_trips_known_and_unknown_labels() {
        assert_eq!(EventType::from("Visite médicale"), EventType::MedicalVisit);
        assert_eq!(EventType::from(" réunion "), EventType::Meeting);
        assert_eq!(EventType::from("Reunion"), EventType::Other("Reunion".to_string()));
        assert_eq!(String::from(EventType::Other("Astreinte".into())), "Astreinte");
    }

    #[test]
    fn billable_types() {
        assert!(EventType::Intervention.is_billable());
        assert!(EventType::Training.is_billable());
        assert!(!EventType::SickLeave.is_billable());
    }
}
