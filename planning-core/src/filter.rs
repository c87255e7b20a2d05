//! Assignee and client filtering of the visible event set.

use crate::event::Event;
use crate::id::{AssigneeId, ClientId};

/// Active calendar filters. An unset filter matches every event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub assignee: Option<AssigneeId>,
    pub client: Option<ClientId>,
}

impl EventFilter {
    pub fn by_assignee(assignee: impl Into<AssigneeId>) -> Self {
        EventFilter {
            assignee: Some(assignee.into()),
            client: None,
        }
    }

    pub fn by_client(client: impl Into<ClientId>) -> Self {
        EventFilter {
            assignee: None,
            client: Some(client.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignee.is_none() && self.client.is_none()
    }

    pub fn clear(&mut self) {
        self.assignee = None;
        self.client = None;
    }

    /// Whether an event passes every active filter.
    ///
    /// Identifiers compare in canonical form; an event lacking the filtered
    /// reference never matches.
    pub fn matches(&self, event: &Event) -> bool {
        let assignee_ok = self
            .assignee
            .as_ref()
            .is_none_or(|wanted| event.assignee_id.as_ref() == Some(wanted));
        let client_ok = self
            .client
            .as_ref()
            .is_none_or(|wanted| event.client_id.as_ref() == Some(wanted));

        assignee_ok && client_ok
    }
}

/// The subset of `events` matching `filter`, in their original order.
pub fn filter_events(events: &[Event], filter: &EventFilter) -> Vec<Event> {
    events
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn event(id: u64, assignee: Option<u64>, client: Option<&str>) -> Event {
        let day = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        Event {
            id: Some(id.into()),
            start: day.and_hms_opt(9, 0, 0).unwrap(),
            end: day.and_hms_opt(10, 0, 0).unwrap(),
            event_type: EventType::Meeting,
            subject: format!("Event {}", id),
            service: String::new(),
            assignee_id: assignee.map(AssigneeId::from),
            client_id: client.map(ClientId::from),
            billing_mode: None,
            hourly_rate: None,
            flat_fee: None,
        }
    }

    fn sample() -> Vec<Event> {
        vec![
            event(1, Some(1), Some("10")),
            event(2, Some(2), Some("10")),
            event(3, Some(1), Some("11")),
            event(4, None, None),
        ]
    }

    #[test]
    fn empty_filter_is_identity() {
        let events = sample();
        assert_eq!(filter_events(&events, &EventFilter::default()), events);
    }

    #[test]
    fn filters_combine_with_and() {
        let filter = EventFilter {
            assignee: Some(AssigneeId::from(1)),
            client: Some(ClientId::from("10")),
        };

        let ids: Vec<_> = filter_events(&sample(), &filter)
            .into_iter()
            .filter_map(|e| e.id)
            .collect();

        assert_eq!(ids, vec![1u64.into()]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let events = sample();
        for filter in [
            EventFilter::by_assignee("1"),
            EventFilter::by_client("11"),
            EventFilter::default(),
        ] {
            let once = filter_events(&events, &filter);
            assert_eq!(filter_events(&once, &filter), once);
        }
    }

    #[test]
    fn events_without_reference_only_match_unset_filters() {
        let orphan = event(9, None, None);

        assert!(EventFilter::default().matches(&orphan));
        assert!(!EventFilter::by_assignee("1").matches(&orphan));
        assert!(!EventFilter::by_client("10").matches(&orphan));
    }

    #[test]
    fn clear_resets_both_filters() {
        let mut filter = EventFilter {
            assignee: Some("1".into()),
            client: Some("10".into()),
        };
        filter.clear();
        assert!(filter.is_empty());
    }
}
