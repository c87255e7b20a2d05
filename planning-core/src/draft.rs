//! Creation drafts: the partially filled form behind "new event" and "duplicate".

use chrono::{Days, NaiveDate, NaiveTime};
use thiserror::Error;

use crate::event::{BillingMode, Event, EventFields, EventType};
use crate::id::{AssigneeId, ClientId};

/// Marker appended to the subject of a duplicated event.
pub const COPY_SUFFIX: &str = " (copy)";

/// How repeated copies of a draft are laid out on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Every copy lands on the drafted date and time.
    #[default]
    SameSlot,
    /// Copy `i` lands `i` weeks after the drafted date.
    Weekly,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("End time {end} must be after start time {start}")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    #[error("Subject cannot be empty")]
    EmptySubject,
}

/// A creation form. Every field is optional until submission.
///
/// A draft never carries an identifier: submitting it always creates new
/// records.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub event_type: Option<EventType>,
    pub subject: Option<String>,
    pub service: Option<String>,
    pub assignee_id: Option<AssigneeId>,
    pub client_id: Option<ClientId>,
    pub billing_mode: Option<BillingMode>,
    pub hourly_rate: Option<f64>,
    pub flat_fee: Option<f64>,
    /// Number of events to create; values below 1 count as 1.
    pub repetitions: u32,
    pub repeat: Repeat,
}

impl Default for Draft {
    fn default() -> Self {
        Draft {
            date: None,
            start: None,
            end: None,
            event_type: None,
            subject: None,
            service: None,
            assignee_id: None,
            client_id: None,
            billing_mode: None,
            hourly_rate: None,
            flat_fee: None,
            repetitions: 1,
            repeat: Repeat::SameSlot,
        }
    }
}

impl Draft {
    /// A draft pre-filled with a selected time range.
    pub fn from_slot(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Draft {
            date: Some(date),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    /// A draft copying every field of `event` except its identifier, with the
    /// subject marked as a copy.
    pub fn duplicate_of(event: &Event) -> Self {
        Draft {
            date: Some(event.date()),
            start: Some(event.start.time()),
            end: Some(event.end.time()),
            event_type: Some(event.event_type.clone()),
            subject: Some(format!("{}{}", event.subject, COPY_SUFFIX)),
            service: Some(event.service.clone()),
            assignee_id: event.assignee_id.clone(),
            client_id: event.client_id.clone(),
            billing_mode: event.billing_mode,
            hourly_rate: event.hourly_rate,
            flat_fee: event.flat_fee,
            ..Default::default()
        }
    }

    /// Validate the draft and expand it into one payload per repetition.
    pub fn occurrences(&self) -> Result<Vec<EventFields>, DraftError> {
        let fields = self.validate()?;
        let count = self.repetitions.max(1);

        Ok((0..count)
            .map(|i| {
                let mut occurrence = fields.clone();
                if self.repeat == Repeat::Weekly {
                    occurrence.date = fields.date + Days::new(7 * u64::from(i));
                }
                occurrence
            })
            .collect())
    }

    /// Check required fields and the time range, producing a single payload.
    pub fn validate(&self) -> Result<EventFields, DraftError> {
        let date = self.date.ok_or(DraftError::MissingField("date"))?;
        let start = self.start.ok_or(DraftError::MissingField("start time"))?;
        let end = self.end.ok_or(DraftError::MissingField("end time"))?;
        let event_type = self
            .event_type
            .clone()
            .ok_or(DraftError::MissingField("type"))?;
        let subject = self
            .subject
            .as_deref()
            .map(str::trim)
            .ok_or(DraftError::MissingField("subject"))?;
        let assignee_id = self
            .assignee_id
            .clone()
            .ok_or(DraftError::MissingField("assignee"))?;
        let client_id = self
            .client_id
            .clone()
            .ok_or(DraftError::MissingField("client"))?;

        if subject.is_empty() {
            return Err(DraftError::EmptySubject);
        }
        if end <= start {
            return Err(DraftError::InvalidTimeRange { start, end });
        }

        Ok(EventFields {
            date,
            start,
            end,
            event_type,
            subject: subject.to_string(),
            service: self.service.clone().unwrap_or_default(),
            assignee_id: Some(assignee_id),
            client_id: Some(client_id),
            billing_mode: self.billing_mode,
            hourly_rate: self.hourly_rate,
            flat_fee: self.flat_fee,
        })
    }
}
