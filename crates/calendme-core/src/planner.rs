//! User-facing workflows on top of the event store.
//!
//! Each method corresponds to one user action: it validates input, talks to
//! the backend services where needed, asks the caller for confirmation when
//! an action is destructive or conflicting, and only then touches the store.
//! Validation and service failures leave the store as it was before the
//! action.

use tracing::info;

use crate::error::{CoreError, Result, ValidationError};
use crate::event::{Event, NewEvent, Priority};
use crate::import::{ColumnMapping, ImportReport};
use crate::service::ServiceClient;
use crate::storage::KeyValueStore;
use crate::store::{decode_events, EditOutcome, EventStore};

/// How an add attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Stored. `conflicts` lists what it overlaps, if the user accepted that.
    Added { event: Event, conflicts: Vec<Event> },
    /// The user declined to add an event that overlaps others.
    Declined { event: Event, conflicts: Vec<Event> },
}

/// Workflows over an [`EventStore`] and the backend [`ServiceClient`].
pub struct Planner<S: KeyValueStore> {
    store: EventStore<S>,
    service: ServiceClient,
}

impl<S: KeyValueStore> Planner<S> {
    pub fn new(store: EventStore<S>, service: ServiceClient) -> Self {
        Self { store, service }
    }

    pub fn store(&self) -> &EventStore<S> {
        &self.store
    }

    pub fn events(&self) -> &[Event] {
        self.store.events()
    }

    /// Parse a natural-language description and add the resulting event.
    ///
    /// `confirm` is called only when the event overlaps stored events.
    pub async fn quick_add<F>(
        &mut self,
        input: &str,
        priority: Priority,
        confirm: F,
    ) -> Result<AddOutcome>
    where
        F: FnOnce(&Event, &[Event]) -> bool,
    {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::EmptyInput.into());
        }

        let parsed = self.service.parse_natural_language(input).await?;
        let new_event = NewEvent::new(parsed.title, parsed.date, parsed.start_time, parsed.end_time)
            .with_priority(priority)
            .with_reminder(parsed.reminder);
        self.add_checked(new_event, confirm)
    }

    /// Add a directly entered event with the same conflict policy as
    /// [`quick_add`](Self::quick_add).
    pub fn add_manual<F>(&mut self, new_event: NewEvent, confirm: F) -> Result<AddOutcome>
    where
        F: FnOnce(&Event, &[Event]) -> bool,
    {
        self.add_checked(new_event, confirm)
    }

    fn add_checked<F>(&mut self, new_event: NewEvent, confirm: F) -> Result<AddOutcome>
    where
        F: FnOnce(&Event, &[Event]) -> bool,
    {
        new_event.validate()?;
        let event = Event::new(new_event);
        let conflicts = self.store.check_conflicts(&event);
        if !conflicts.is_empty() && !confirm(&event, &conflicts) {
            return Ok(AddOutcome::Declined { event, conflicts });
        }
        self.store.add(event.clone())?;
        Ok(AddOutcome::Added { event, conflicts })
    }

    /// Replace an event's fields. Empty titles are rejected.
    pub fn edit(&mut self, id: &str, fields: NewEvent) -> Result<EditOutcome> {
        fields.validate()?;
        self.store.edit(id, fields)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool> {
        self.store.delete(id)
    }

    /// Overlaps a prospective event would have, for previews.
    pub fn conflicts_for(&self, candidate: &Event) -> Vec<Event> {
        self.store.check_conflicts(candidate)
    }

    /// Remove everything after `confirm(count)` approves. Returns how many
    /// events were removed; zero when empty or declined.
    pub fn clear_all<F>(&mut self, confirm: F) -> Result<usize>
    where
        F: FnOnce(usize) -> bool,
    {
        let count = self.store.len();
        if count == 0 || !confirm(count) {
            return Ok(0);
        }
        self.store.clear_all()?;
        info!(count, "cleared all events");
        Ok(count)
    }

    /// Calendar file for every stored event.
    pub async fn export_ics(&self) -> Result<Vec<u8>> {
        if self.store.is_empty() {
            return Err(ValidationError::NoEvents.into());
        }
        let bytes = self.service.generate_ics(self.store.events()).await?;
        info!(count = self.store.len(), size = bytes.len(), "exported calendar");
        Ok(bytes)
    }

    /// Pretty-printed schedule file for saving or sharing.
    pub fn export_json(&self) -> Result<String> {
        if self.store.is_empty() {
            return Err(ValidationError::NoEvents.into());
        }
        Ok(serde_json::to_string_pretty(self.store.events())?)
    }

    /// Replace the schedule with the contents of a saved schedule file.
    /// Returns the number of events loaded.
    pub fn import_json(&mut self, text: &str) -> Result<usize> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| ValidationError::InvalidScheduleFile(e.to_string()))?;
        if !value.is_array() {
            return Err(
                ValidationError::InvalidScheduleFile("expected a list of events".into()).into(),
            );
        }
        let events = decode_events(text).map_err(|e| match e {
            CoreError::Json(e) => ValidationError::InvalidScheduleFile(e.to_string()).into(),
            other => other,
        })?;
        let count = events.len();
        self.store.replace_all(events)?;
        info!(count, "imported schedule");
        Ok(count)
    }

    /// Upload a spreadsheet, map its columns, and add one event per row.
    ///
    /// Rows that cannot become events are skipped and reported. Imported
    /// events are added even when they overlap existing ones.
    pub async fn import_table(
        &mut self,
        filename: &str,
        bytes: Vec<u8>,
        mapping: &ColumnMapping,
        filters: &str,
        priority: Priority,
    ) -> Result<ImportReport> {
        mapping.validate()?;
        let table = self.service.parse_file(filename, bytes).await?;
        let rows = self
            .service
            .process_rows(&table.raw_rows, mapping, filters)
            .await?;

        let mut report = ImportReport::default();
        for row in rows {
            match row.to_new_event(priority.clone()) {
                Ok(new_event) => {
                    self.store.add(Event::new(new_event))?;
                    report.added += 1;
                }
                Err(reason) => report.skipped.push((row, reason)),
            }
        }
        info!(
            file = %table.filename,
            added = report.added,
            skipped = report.skipped.len(),
            "imported table"
        );
        Ok(report)
    }
}
