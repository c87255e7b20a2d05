//! Calendar interaction controller.
//!
//! The controller owns the cached event set and a single interaction state.
//! Every gesture arrives as a `Message`; gestures that change data are turned
//! into store calls, and every successful call is followed by a full refetch
//! so the cache always mirrors the store. Failures never escape `dispatch`:
//! they come back as error `Notice`s and leave the cache untouched.

mod notice;
mod state;

pub use notice::{Notice, NoticeLevel};
pub use state::{
    Composition, DragState, DraftOrigin, Edge, GridPoint, Handle, InteractionState, Message,
    ResizeState, Selection, SlotSelection, Target,
};

use chrono::TimeDelta;
use tracing::{debug, info, warn};

use crate::config::PlanningConfig;
use crate::draft::Draft;
use crate::duplicate::{Clipboard, clipboard_summary};
use crate::event::{Event, EventFields, EventType};
use crate::filter::{EventFilter, filter_events};
use crate::id::{AssigneeId, ClientId, EventId};
use crate::menu::{MenuAction, Point, place_menu};
use crate::normalize::normalize;
use crate::reference::Directory;
use crate::store::EventStore;

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    /// Length of one grid cell.
    pub slot: TimeDelta,
    /// Filter on the first known assignee after loading.
    pub select_first_assignee: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        ControllerOptions {
            slot: TimeDelta::minutes(30),
            select_first_assignee: false,
        }
    }
}

impl From<&PlanningConfig> for ControllerOptions {
    fn from(config: &PlanningConfig) -> Self {
        ControllerOptions {
            slot: TimeDelta::minutes(i64::from(config.slot_minutes.max(1))),
            select_first_assignee: config.select_first_assignee,
        }
    }
}

pub struct Controller<S: EventStore> {
    store: S,
    clipboard: Box<dyn Clipboard>,
    options: ControllerOptions,
    events: Vec<Event>,
    directory: Directory,
    event_types: Vec<EventType>,
    filter: EventFilter,
    state: InteractionState,
}

impl<S: EventStore> Controller<S> {
    pub fn new(store: S, clipboard: Box<dyn Clipboard>, options: ControllerOptions) -> Self {
        Controller {
            store,
            clipboard,
            options,
            events: Vec::new(),
            directory: Directory::default(),
            event_types: EventType::BUILTIN.to_vec(),
            filter: EventFilter::default(),
            state: InteractionState::Idle,
        }
    }

    /// Fetch reference data and events.
    ///
    /// Reference data failures are reported and leave the lists empty; the
    /// event types fall back to the built-in set.
    pub async fn load(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();

        match self.store.list_assignees().await {
            Ok(assignees) => self.directory.assignees = assignees,
            Err(e) => {
                warn!(error = %e, "Could not load assignees");
                notices.push(Notice::error(format!("Could not load employees: {e}")));
            }
        }

        match self.store.list_clients().await {
            Ok(clients) => self.directory.clients = clients,
            Err(e) => {
                warn!(error = %e, "Could not load clients");
                notices.push(Notice::error(format!("Could not load clients: {e}")));
            }
        }

        match self.store.list_event_types().await {
            Ok(types) if !types.is_empty() => self.event_types = types,
            Ok(_) => self.event_types = EventType::BUILTIN.to_vec(),
            Err(e) => {
                debug!(error = %e, "Using built-in event types");
                self.event_types = EventType::BUILTIN.to_vec();
            }
        }

        if self.options.select_first_assignee && self.filter.assignee.is_none() {
            self.filter.assignee = self.directory.assignees.first().map(|a| a.id.clone());
        }

        self.refresh(&mut notices).await;
        notices
    }

    /// Replace the cached events with a fresh snapshot of the store. On
    /// failure the previous snapshot is kept.
    async fn refresh(&mut self, notices: &mut Vec<Notice>) -> bool {
        match self.store.list_events().await {
            Ok(raw) => {
                self.events = normalize(&raw);
                debug!(
                    fetched = raw.len(),
                    kept = self.events.len(),
                    "Event snapshot replaced"
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not fetch events");
                notices.push(Notice::error(format!("Could not load events: {e}")));
                false
            }
        }
    }

    /// Every cached event, in store order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Cached events passing the active filters.
    pub fn visible_events(&self) -> Vec<Event> {
        filter_events(&self.events, &self.filter)
    }

    pub fn find_event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id.as_ref() == Some(id))
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    pub fn set_assignee_filter(&mut self, assignee: Option<AssigneeId>) {
        self.filter.assignee = assignee;
    }

    pub fn set_client_filter(&mut self, client: Option<ClientId>) {
        self.filter.client = client;
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn event_types(&self) -> &[EventType] {
        &self.event_types
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one message and return the notices it produced.
    pub async fn dispatch(&mut self, message: Message) -> Vec<Notice> {
        use InteractionState as State;

        let mut notices = Vec::new();
        let state = std::mem::take(&mut self.state);

        let next = match (state, message) {
            (State::Idle, Message::PointerDown { target, point }) => self.begin(target, point),

            (State::Idle | State::EventSelected(_), Message::RightClick { event, position }) => {
                self.select(event, position)
            }

            (State::Idle | State::EventSelected(_), Message::OpenForm) => {
                State::Composing(Composition {
                    draft: Draft::default(),
                    origin: DraftOrigin::Blank,
                })
            }

            // Dragging
            (State::Dragging(mut drag), Message::PointerDrag { point }) => {
                drag.hover = point;
                State::Dragging(drag)
            }
            (State::Dragging(mut drag), Message::PointerUp { point }) => {
                drag.hover = point;
                self.commit_drag(drag, &mut notices).await;
                State::Idle
            }

            // Resizing
            (State::Resizing(mut resize), Message::PointerDrag { point }) => {
                resize.hover = point;
                State::Resizing(resize)
            }
            (State::Resizing(mut resize), Message::PointerUp { point }) => {
                resize.hover = point;
                self.commit_resize(resize, &mut notices).await;
                State::Idle
            }

            // Slot selection
            (State::SelectingSlot(mut selection), Message::PointerDrag { point }) => {
                selection.extend(point);
                State::SelectingSlot(selection)
            }
            (State::SelectingSlot(mut selection), Message::PointerUp { point }) => {
                selection.extend(point);
                match selection.draft() {
                    Some(draft) => State::Composing(Composition {
                        draft,
                        origin: DraftOrigin::Slot,
                    }),
                    None => State::Idle,
                }
            }

            // Context menu
            (State::EventSelected(mut selection), Message::MenuMounted { menu, viewport }) => {
                if selection.placed.is_none() {
                    selection.placed = Some(place_menu(selection.anchor, menu, viewport));
                }
                State::EventSelected(selection)
            }
            (State::EventSelected(selection), Message::Menu(MenuAction::Duplicate)) => {
                self.duplicate(selection, &mut notices)
            }
            (State::EventSelected(selection), Message::Menu(MenuAction::Delete)) => {
                State::ConfirmingDelete(selection)
            }
            (State::EventSelected(_), Message::Menu(MenuAction::Dismiss))
            | (State::EventSelected(_), Message::PointerDown { .. }) => State::Idle,

            // Delete confirmation
            (State::ConfirmingDelete(selection), Message::ConfirmDelete(true)) => {
                self.delete(selection, &mut notices).await
            }
            (State::ConfirmingDelete(_), Message::ConfirmDelete(false)) => State::Idle,

            // Creation form
            (State::Composing(composition), Message::SubmitForm(draft)) => {
                self.submit(composition, draft, &mut notices).await
            }
            (State::Composing(_), Message::DismissForm) => State::Idle,

            (_, Message::KeyEscape) => State::Idle,

            (state, message) => {
                debug!(?message, "Message ignored in current state");
                state
            }
        };

        self.state = next;
        notices
    }

    fn begin(&self, target: Target, point: GridPoint) -> InteractionState {
        let Target::Event { id, handle } = target else {
            return InteractionState::SelectingSlot(SlotSelection::new(point, self.options.slot));
        };

        let Some(event) = self.find_event(&id).cloned() else {
            debug!(%id, "Pointer down on an unknown event");
            return InteractionState::Idle;
        };

        match handle {
            Handle::Body => InteractionState::Dragging(DragState::new(id, event, point)),
            Handle::StartEdge | Handle::EndEdge => InteractionState::Resizing(ResizeState {
                id,
                event,
                edge: if handle == Handle::StartEdge {
                    Edge::Start
                } else {
                    Edge::End
                },
                hover: point,
                slot: self.options.slot,
            }),
        }
    }

    fn select(&self, id: EventId, position: Point) -> InteractionState {
        match self.find_event(&id) {
            Some(event) => InteractionState::EventSelected(Selection {
                id,
                event: event.clone(),
                anchor: position,
                placed: None,
            }),
            None => {
                debug!(%id, "Right click on an unknown event");
                InteractionState::Idle
            }
        }
    }

    async fn commit_drag(&mut self, drag: DragState, notices: &mut Vec<Notice>) {
        let (start, end) = drag.preview();
        if start == drag.event.start {
            return;
        }
        if start.date() != end.date() {
            notices.push(Notice::error("Events cannot span midnight"));
            return;
        }

        let fields = drag.event.rescheduled(start.date(), start.time(), end.time());
        self.update(&drag.id, fields, "moved", notices).await;
    }

    async fn commit_resize(&mut self, resize: ResizeState, notices: &mut Vec<Notice>) {
        let (start, end) = resize.preview();
        if start == resize.event.start && end == resize.event.end {
            return;
        }
        if start >= end {
            notices.push(Notice::error("An event must end after it starts"));
            return;
        }

        let fields = resize
            .event
            .rescheduled(start.date(), start.time(), end.time());
        self.update(&resize.id, fields, "resized", notices).await;
    }

    /// Write rescheduled fields; `verb` names the gesture in the notice.
    async fn update(
        &mut self,
        id: &EventId,
        fields: EventFields,
        verb: &str,
        notices: &mut Vec<Notice>,
    ) {
        match self.store.update_event(id, &fields).await {
            Ok(_) => {
                info!(%id, date = %fields.date, start = %fields.start, end = %fields.end, "Event rescheduled");
                notices.push(Notice::success(format!(
                    "Event {verb} to {} {}-{}",
                    fields.date.format("%d/%m/%Y"),
                    fields.start.format("%H:%M"),
                    fields.end.format("%H:%M")
                )));
                self.refresh(notices).await;
            }
            Err(e) => {
                warn!(%id, error = %e, "Could not update event");
                notices.push(Notice::error(format!("Could not update event: {e}")));
            }
        }
    }

    fn duplicate(&mut self, selection: Selection, notices: &mut Vec<Notice>) -> InteractionState {
        let summary = clipboard_summary(&selection.event, &self.directory);
        match self.clipboard.write_text(&summary) {
            Ok(()) => notices.push(Notice::info("Event details copied to clipboard")),
            Err(e) => {
                warn!(error = %e, "Clipboard write failed");
                notices.push(Notice::error(e.to_string()));
            }
        }

        InteractionState::Composing(Composition {
            draft: Draft::duplicate_of(&selection.event),
            origin: DraftOrigin::Duplicate(selection.id),
        })
    }

    async fn delete(&mut self, selection: Selection, notices: &mut Vec<Notice>) -> InteractionState {
        match self.store.delete_event(&selection.id).await {
            Ok(()) => {
                info!(id = %selection.id, "Event deleted");
                notices.push(Notice::success(format!(
                    "Deleted \"{}\"",
                    selection.event.title()
                )));
                self.refresh(notices).await;
                InteractionState::Idle
            }
            Err(e) => {
                warn!(id = %selection.id, error = %e, "Could not delete event");
                notices.push(Notice::error(format!("Could not delete event: {e}")));
                InteractionState::EventSelected(selection)
            }
        }
    }

    /// Create one event per occurrence of `draft`.
    ///
    /// The form stays open when nothing was created; once some copies exist
    /// it closes so a resubmission cannot create them twice.
    async fn submit(
        &mut self,
        composition: Composition,
        draft: Draft,
        notices: &mut Vec<Notice>,
    ) -> InteractionState {
        let draft = Draft {
            assignee_id: draft.assignee_id.or_else(|| self.filter.assignee.clone()),
            ..draft
        };

        let occurrences = match draft.occurrences() {
            Ok(occurrences) => occurrences,
            Err(e) => {
                notices.push(Notice::error(e.to_string()));
                return InteractionState::Composing(Composition { draft, ..composition });
            }
        };

        let total = occurrences.len();
        let mut created = 0;
        let mut failure = None;

        for fields in &occurrences {
            match self.store.create_event(fields).await {
                Ok(record) => {
                    created += 1;
                    info!(id = ?record.id, date = %fields.date, "Event created");
                }
                Err(e) => {
                    warn!(error = %e, created, total, "Could not create event");
                    failure = Some(e);
                    break;
                }
            }
        }

        if created > 0 {
            self.refresh(notices).await;
        }

        match failure {
            None => {
                notices.push(Notice::success(match total {
                    1 => "Event created".to_string(),
                    n => format!("{n} events created"),
                }));
                InteractionState::Idle
            }
            Some(e) if created == 0 => {
                notices.push(Notice::error(format!("Could not create event: {e}")));
                InteractionState::Composing(Composition { draft, ..composition })
            }
            Some(e) => {
                notices.push(Notice::error(format!(
                    "Created {created} of {total} events: {e}"
                )));
                InteractionState::Idle
            }
        }
    }
}
