//! The event store: the single owner of the session's event list.
//!
//! The list is kept sorted by `(date, start_time, title)` at all times and is
//! written to the key-value storage after every mutation. Conflict checks are
//! advisory; nothing here refuses an event because it overlaps another.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::event::{Event, EventFields};
use crate::storage::KeyValueStore;
use crate::time::compare_date_time;

/// Storage key holding the serialized event list.
pub const EVENTS_KEY: &str = "calendme_events";

/// Result of [`EventStore::edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Updated,
    NotFound,
}

/// Chronological order used by the store.
///
/// Date, then start time in minutes since midnight, then title compared
/// byte-wise (case-sensitive).
pub fn chronological(a: &Event, b: &Event) -> Ordering {
    compare_date_time(a.date, a.start_time, b.date, b.start_time)
        .then_with(|| a.title.cmp(&b.title))
}

/// Ordered, persisted collection of events.
#[derive(Debug)]
pub struct EventStore<S: KeyValueStore> {
    events: Vec<Event>,
    storage: S,
}

impl<S: KeyValueStore> EventStore<S> {
    /// An empty store. Nothing is read from `storage`.
    pub fn empty(storage: S) -> Self {
        Self {
            events: Vec::new(),
            storage,
        }
    }

    /// Rehydrate from storage, reporting malformed data to the caller.
    ///
    /// An absent key yields an empty store. Malformed data yields a
    /// [`RestoreError`] that still owns the storage so the caller can decide
    /// what to tell the user before continuing with an empty store.
    ///
    /// Repeated ids are not an error: the first event keeps its id, later
    /// ones get fresh ids and the repaired list is written back.
    pub fn restore(storage: S) -> std::result::Result<Self, RestoreError<S>> {
        let saved = match storage.get(EVENTS_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                return Err(RestoreError {
                    storage,
                    source: e.into(),
                })
            }
        };

        let Some(saved) = saved else {
            return Ok(Self::empty(storage));
        };

        let mut events = match decode_events(&saved) {
            Ok(events) => events,
            Err(source) => return Err(RestoreError { storage, source }),
        };
        let reassigned = reassign_duplicate_ids(&mut events);

        let mut store = Self { events, storage };
        store.sort();
        if reassigned > 0 {
            warn!(reassigned, "stored events repeated ids; assigned fresh ones");
            if let Err(e) = store.persist() {
                warn!(error = %e, "could not save repaired event ids");
            }
        }
        debug!(count = store.events.len(), "restored events");
        Ok(store)
    }

    /// Rehydrate from storage, falling back to an empty store on bad data.
    ///
    /// The failure is logged and otherwise dropped; stored data stays in
    /// place until the next mutation overwrites it.
    pub fn open(storage: S) -> Self {
        match Self::restore(storage) {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e.source, "discarding unreadable stored events");
                e.into_empty_store()
            }
        }
    }

    /// Events in chronological order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Insert an event, re-sort, persist.
    ///
    /// # Errors
    ///
    /// [`CoreError::DuplicateId`] if an event with the same id is stored;
    /// the collection is left unchanged. Storage failures are returned after
    /// the in-memory insert has happened.
    pub fn add(&mut self, event: Event) -> Result<()> {
        if self.get(&event.id).is_some() {
            return Err(CoreError::DuplicateId(event.id));
        }
        debug!(id = %event.id, title = %event.title, "adding event");
        self.events.push(event);
        self.sort();
        self.persist()
    }

    /// Replace all mutable fields of the event with `id`.
    ///
    /// A missing id changes nothing and writes nothing.
    pub fn edit(&mut self, id: &str, fields: EventFields) -> Result<EditOutcome> {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            debug!(id, "edit of unknown event ignored");
            return Ok(EditOutcome::NotFound);
        };
        event.apply(fields);
        debug!(id, "edited event");
        self.sort();
        self.persist()?;
        Ok(EditOutcome::Updated)
    }

    /// Remove the event with `id` if present. Returns whether one was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            return Ok(false);
        }
        debug!(id, "deleted event");
        self.persist()?;
        Ok(true)
    }

    /// Drop every event. Confirmation is the caller's job.
    pub fn clear_all(&mut self) -> Result<()> {
        debug!(count = self.events.len(), "clearing all events");
        self.events.clear();
        self.persist()
    }

    /// Replace the whole collection, e.g. from an imported schedule file.
    ///
    /// # Errors
    ///
    /// [`CoreError::DuplicateId`] if `events` repeats an id; the current
    /// collection is kept.
    pub fn replace_all(&mut self, events: Vec<Event>) -> Result<()> {
        let mut seen = HashSet::with_capacity(events.len());
        for event in &events {
            if !seen.insert(event.id.as_str()) {
                return Err(CoreError::DuplicateId(event.id.clone()));
            }
        }
        self.events = events;
        self.sort();
        self.persist()
    }

    /// Stored events on the candidate's date whose `[start, end)` overlaps it.
    ///
    /// A stored event with the candidate's own id is skipped, so editing an
    /// event never reports it as conflicting with itself.
    pub fn check_conflicts(&self, candidate: &Event) -> Vec<Event> {
        self.events
            .iter()
            .filter(|existing| existing.id != candidate.id && candidate.overlaps(existing))
            .cloned()
            .collect()
    }

    /// Restore chronological order. Stable for equal keys.
    pub fn sort(&mut self) {
        self.events.sort_by(chronological);
    }

    /// Serialize the collection as stored.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.events)?)
    }

    fn persist(&mut self) -> Result<()> {
        let json = self.to_json()?;
        self.storage.set(EVENTS_KEY, &json)?;
        Ok(())
    }

    /// Consume the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Decode a stored event list. Ids are not checked for uniqueness.
pub fn decode_events(json: &str) -> Result<Vec<Event>> {
    Ok(serde_json::from_str(json)?)
}

/// Give every event whose id was already seen a fresh UUID v4. Returns how
/// many ids changed.
fn reassign_duplicate_ids(events: &mut [Event]) -> usize {
    let mut seen = HashSet::with_capacity(events.len());
    let mut reassigned = 0;
    for event in events.iter_mut() {
        while !seen.insert(event.id.clone()) {
            event.id = Uuid::new_v4().to_string();
            reassigned += 1;
        }
    }
    reassigned
}

/// Stored events could not be read back.
pub struct RestoreError<S> {
    storage: S,
    pub source: CoreError,
}

impl<S: KeyValueStore> RestoreError<S> {
    /// Continue with an empty store on the same storage.
    pub fn into_empty_store(self) -> EventStore<S> {
        EventStore::empty(self.storage)
    }
}

impl<S> fmt::Debug for RestoreError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestoreError")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<S> fmt::Display for RestoreError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stored events are unreadable: {}", self.source)
    }
}

impl<S> std::error::Error for RestoreError<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
