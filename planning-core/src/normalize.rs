//! Turns stored planning records into calendar-ready events.
//!
//! Normalization is best effort: a record that cannot be placed on the grid is
//! dropped instead of failing the whole batch, so one bad row never blocks the
//! calendar from rendering.

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::event::{BillingMode, DATE_FORMAT, Event, EventType, RawEvent};

/// Normalize a batch of stored records, preserving their order.
pub fn normalize(raw: &[RawEvent]) -> Vec<Event> {
    raw.iter().filter_map(normalize_one).collect()
}

/// Normalize a single record, or `None` if it has no valid time slot.
pub fn normalize_one(raw: &RawEvent) -> Option<Event> {
    let Some(((date, start), end)) = raw
        .date
        .as_deref()
        .and_then(parse_date)
        .zip(raw.start_time.as_deref().and_then(parse_time))
        .zip(raw.end_time.as_deref().and_then(parse_time))
    else {
        debug!(id = ?raw.id, "Skipping planning record without a usable date and time range");
        return None;
    };

    if end <= start {
        debug!(id = ?raw.id, %start, %end, "Skipping planning record that ends before it starts");
        return None;
    }

    Some(Event {
        id: raw.id.clone(),
        start: date.and_time(start),
        end: date.and_time(end),
        event_type: raw
            .event_type
            .clone()
            .map(EventType::from)
            .unwrap_or_else(|| EventType::Other(String::new())),
        subject: raw.subject.clone().unwrap_or_default(),
        service: raw.service.clone().unwrap_or_default(),
        assignee_id: raw.assignee_id.clone(),
        client_id: raw.client_id.clone(),
        billing_mode: raw.billing_mode.as_deref().and_then(BillingMode::from_label),
        hourly_rate: raw.hourly_rate,
        flat_fee: raw.flat_fee,
    })
}

/// Parse a stored calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parse a stored wall-clock time (`HH:MM` or `HH:MM:SS`).
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{AssigneeId, EventId};
    use pretty_assertions::assert_eq;

    fn record(id: u64, date: &str, start: &str, end: &str) -> RawEvent {
        RawEvent {
            id: Some(EventId::from(id)),
            date: Some(date.to_string()),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            event_type: Some("Intervention".to_string()),
            subject: Some(format!("Visit {}", id)),
            assignee_id: Some(AssigneeId::from(1)),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_start_and_end_instants() {
        let events = normalize(&[record(1, "2025-03-20", "10:00", "11:30")]);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.start.to_string(), "2025-03-20 10:00:00");
        assert_eq!(event.end.to_string(), "2025-03-20 11:30:00");
        assert_eq!(event.title(), "Intervention - Visit 1");
    }

    #[test]
    fn drops_records_missing_date_or_times() {
        let valid = record(1, "2025-03-20", "10:00", "11:00");
        let mut missing_date = record(2, "2025-03-20", "10:00", "11:00");
        missing_date.date = None;
        let mut empty_start = record(3, "2025-03-20", "10:00", "11:00");
        empty_start.start_time = Some(String::new());
        let mut missing_end = record(4, "2025-03-20", "10:00", "11:00");
        missing_end.end_time = None;

        let events = normalize(&[valid.clone(), missing_date, empty_start, missing_end]);

        assert_eq!(events, normalize(&[valid]));
    }

    #[test]
    fn drops_records_with_unparseable_values() {
        let events = normalize(&[
            record(1, "20/03/2025", "10:00", "11:00"),
            record(2, "2025-03-20", "25:00", "26:00"),
            record(3, "2025-02-30", "10:00", "11:00"),
        ]);

        assert!(events.is_empty());
    }

    #[test]
    fn drops_records_ending_before_they_start() {
        let events = normalize(&[
            record(1, "2025-03-20", "17:00", "09:00"),
            record(2, "2025-03-20", "09:00", "09:00"),
        ]);

        assert!(events.is_empty());
    }

    #[test]
    fn accepts_times_with_seconds() {
        let events = normalize(&[record(1, "2025-03-20", "08:15:00", "09:45:30")]);

        assert_eq!(events[0].end.to_string(), "2025-03-20 09:45:30");
    }

    #[test]
    fn is_deterministic_and_keeps_duplicates() {
        let raw = vec![
            record(1, "2025-03-21", "10:00", "11:00"),
            record(1, "2025-03-20", "10:00", "11:00"),
        ];

        let first = normalize(&raw);
        assert_eq!(first, normalize(&raw));
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].date().to_string(), "2025-03-21");
    }

    #[test]
    fn lenient_billing_and_missing_type() {
        let mut raw = record(1, "2025-03-20", "10:00", "11:00");
        raw.event_type = None;
        raw.billing_mode = Some(String::new());

        let event = &normalize(&[raw])[0];

        assert_eq!(event.billing_mode, None);
        assert_eq!(event.title(), "Visit 1");
    }
}
