//! Interaction states and the messages that drive them.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::draft::Draft;
use crate::event::Event;
use crate::id::EventId;
use crate::menu::{MenuAction, Point, Size};

/// A calendar grid cell: a date and the start time of the slot under the
/// pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPoint {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl GridPoint {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        GridPoint { date, time }
    }

    pub fn at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Part of an event block under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Body,
    StartEdge,
    EndEdge,
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Event { id: EventId, handle: Handle },
    Empty,
}

/// Input delivered to the controller by the calendar surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    PointerDown { target: Target, point: GridPoint },
    PointerDrag { point: GridPoint },
    PointerUp { point: GridPoint },
    RightClick { event: EventId, position: Point },
    KeyEscape,
    /// The context menu has been laid out and measured.
    MenuMounted { menu: Size, viewport: Size },
    Menu(MenuAction),
    ConfirmDelete(bool),
    OpenForm,
    SubmitForm(Draft),
    DismissForm,
}

/// Last moment of a day, used when a slot would end past midnight.
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default())
}

/// End of the slot starting at `time`, kept on `date`.
pub(crate) fn slot_end(date: NaiveDate, time: NaiveTime, slot: TimeDelta) -> NaiveDateTime {
    let end = date.and_time(time) + slot;
    if end.date() == date { end } else { end_of_day(date) }
}

/// An event block being moved.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub id: EventId,
    pub event: Event,
    /// Distance from the event start to the cell where it was grabbed.
    pub offset: TimeDelta,
    pub hover: GridPoint,
}

impl DragState {
    pub(crate) fn new(id: EventId, event: Event, grab: GridPoint) -> Self {
        DragState {
            id,
            offset: grab.at() - event.start,
            event,
            hover: grab,
        }
    }

    /// Where the event would land if released now. Duration is preserved,
    /// and the start never leaves the hovered cell's date.
    pub fn preview(&self) -> (NaiveDateTime, NaiveDateTime) {
        let midnight = self.hover.date.and_time(NaiveTime::default());
        let start = (self.hover.at() - self.offset).max(midnight);
        (start, start + self.event.duration())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// An event block whose start or end is being dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub id: EventId,
    pub event: Event,
    pub edge: Edge,
    pub hover: GridPoint,
    pub slot: TimeDelta,
}

impl ResizeState {
    /// The resized range. Only the grabbed edge moves, and it stays on the
    /// event's date.
    pub fn preview(&self) -> (NaiveDateTime, NaiveDateTime) {
        let date = self.event.date();
        match self.edge {
            Edge::Start => (date.and_time(self.hover.time), self.event.end),
            Edge::End => (self.event.start, slot_end(date, self.hover.time, self.slot)),
        }
    }
}

/// A range of empty cells being swept to create an event.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSelection {
    pub anchor: GridPoint,
    pub current: GridPoint,
    pub slot: TimeDelta,
    pub moved: bool,
}

impl SlotSelection {
    pub(crate) fn new(anchor: GridPoint, slot: TimeDelta) -> Self {
        SlotSelection {
            anchor,
            current: anchor,
            slot,
            moved: false,
        }
    }

    pub(crate) fn extend(&mut self, point: GridPoint) {
        self.moved |= point != self.anchor;
        self.current = point;
    }

    /// The selected range on the anchor's date, covering both end cells. A
    /// sweep into another day stops at that edge of the anchor's day.
    pub fn range(&self) -> (NaiveDate, NaiveTime, NaiveTime) {
        let date = self.anchor.date;
        let current = match self.current.date.cmp(&date) {
            Ordering::Greater => end_of_day(date).time(),
            Ordering::Less => NaiveTime::default(),
            Ordering::Equal => self.current.time,
        };
        let first = self.anchor.time.min(current);
        let last = self.anchor.time.max(current);
        (date, first, slot_end(date, last, self.slot).time())
    }

    /// A creation draft for the swept range; `None` for a plain click.
    pub fn draft(&self) -> Option<Draft> {
        if !self.moved {
            return None;
        }
        let (date, start, end) = self.range();
        Some(Draft::from_slot(date, start, end))
    }
}

/// The event picked through its context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub id: EventId,
    pub event: Event,
    /// Pointer position of the right-click.
    pub anchor: Point,
    /// Menu origin once measured; computed once per selection.
    pub placed: Option<Point>,
}

/// Where an open creation form came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOrigin {
    Blank,
    Slot,
    Duplicate(EventId),
}

/// An open creation form.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub draft: Draft,
    pub origin: DraftOrigin,
}

/// The single interaction in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
    SelectingSlot(SlotSelection),
    EventSelected(Selection),
    ConfirmingDelete(Selection),
    Composing(Composition),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// The selected event, while its menu or delete confirmation is open.
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            InteractionState::EventSelected(s) | InteractionState::ConfirmingDelete(s) => Some(s),
            _ => None,
        }
    }

    pub fn composition(&self) -> Option<&Composition> {
        match self {
            InteractionState::Composing(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    fn at(d: u32, h: u32, m: u32) -> GridPoint {
        GridPoint::new(
            NaiveDate::from_ymd_opt(2025, 3, d).unwrap(),
            NaiveTime::from_hms_opt(h, m, 0).unwrap(),
        )
    }

    fn event(start: GridPoint, minutes: i64) -> Event {
        Event {
            id: Some(EventId::from(1)),
            start: start.at(),
            end: start.at() + TimeDelta::minutes(minutes),
            event_type: EventType::Meeting,
            subject: "Standup".to_string(),
            service: String::new(),
            assignee_id: None,
            client_id: None,
            billing_mode: None,
            hourly_rate: None,
            flat_fee: None,
        }
    }

    #[test]
    fn drag_preview_keeps_grab_offset_and_duration() {
        let mut drag = DragState::new(EventId::from(1), event(at(20, 10, 0), 60), at(20, 10, 30));
        drag.hover = at(21, 14, 30);

        assert_eq!(drag.preview(), (at(21, 14, 0).at(), at(21, 15, 0).at()));
    }

    #[test]
    fn end_edge_resize_covers_hovered_cell() {
        let resize = ResizeState {
            id: EventId::from(1),
            event: event(at(20, 9, 0), 30),
            edge: Edge::End,
            hover: at(20, 11, 0),
            slot: TimeDelta::minutes(30),
        };

        assert_eq!(resize.preview(), (at(20, 9, 0).at(), at(20, 11, 30).at()));
    }

    #[test]
    fn selection_range_is_ordered_and_clamped_to_the_day() {
        let mut selection = SlotSelection::new(at(20, 23, 30), TimeDelta::minutes(30));
        selection.extend(at(20, 22, 0));

        let (date, start, end) = selection.range();
        assert_eq!(date, at(20, 0, 0).date);
        assert_eq!(start, at(20, 22, 0).time);
        assert_eq!(end, at(20, 23, 59).time);
    }

    #[test]
    fn drag_onto_midnight_cell_stays_on_that_day() {
        let mut drag = DragState::new(EventId::from(1), event(at(20, 10, 0), 60), at(20, 10, 30));
        drag.hover = at(21, 0, 0);

        assert_eq!(drag.preview(), (at(21, 0, 0).at(), at(21, 1, 0).at()));
    }

    #[test]
    fn selection_swept_into_next_day_stops_at_end_of_anchor_day() {
        let mut selection = SlotSelection::new(at(20, 23, 0), TimeDelta::minutes(30));
        selection.extend(at(21, 1, 0));

        assert_eq!(
            selection.range(),
            (at(20, 0, 0).date, at(20, 23, 0).time, at(20, 23, 59).time)
        );
    }

    #[test]
    fn selection_swept_into_previous_day_starts_at_midnight() {
        let mut selection = SlotSelection::new(at(20, 1, 0), TimeDelta::minutes(30));
        selection.extend(at(19, 22, 0));

        assert_eq!(
            selection.range(),
            (at(20, 0, 0).date, at(20, 0, 0).time, at(20, 1, 30).time)
        );
    }

    #[test]
    fn plain_click_builds_no_draft() {
        let mut selection = SlotSelection::new(at(20, 9, 0), TimeDelta::minutes(30));
        selection.extend(at(20, 9, 0));
        assert!(selection.draft().is_none());
    }
}
