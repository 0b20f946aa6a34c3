//! Event entity and the payloads used to create and edit it.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::time::{intervals_overlap, TimeOfDay};

/// Display priority of an event. Advisory only; never affects ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    #[default]
    Green,
    Yellow,
    Red,
    /// Any caller-defined tag outside the built-in set.
    Custom(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Green => "green",
            Priority::Yellow => "yellow",
            Priority::Red => "red",
            Priority::Custom(label) => label,
        }
    }
}

impl From<String> for Priority {
    fn from(label: String) -> Self {
        match label.as_str() {
            "green" => Priority::Green,
            "yellow" => Priority::Yellow,
            "red" => Priority::Red,
            _ => Priority::Custom(label),
        }
    }
}

impl From<&str> for Priority {
    fn from(label: &str) -> Self {
        Priority::from(label.to_string())
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Custom(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled item on a single day.
///
/// Serialized with camelCase keys; this is also the layout written to
/// storage and to exported schedule files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub reminder: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create an event with a fresh UUID v4 id and the current timestamp.
    pub fn new(fields: NewEvent) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), Utc::now(), fields)
    }

    pub fn with_id(id: String, created_at: DateTime<Utc>, fields: NewEvent) -> Self {
        Self {
            id,
            title: fields.title,
            date: fields.date,
            start_time: fields.start_time,
            end_time: fields.end_time,
            priority: fields.priority,
            notes: fields.notes,
            reminder: fields.reminder,
            created_at,
        }
    }

    /// Whether `self` and `other` fall on the same date with overlapping
    /// `[start, end)` ranges.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.date == other.date
            && intervals_overlap(self.start_time, self.end_time, other.start_time, other.end_time)
    }

    /// Replace every mutable field. `id` and `created_at` are kept.
    pub fn apply(&mut self, fields: EventFields) {
        self.title = fields.title;
        self.date = fields.date;
        self.start_time = fields.start_time;
        self.end_time = fields.end_time;
        self.priority = fields.priority;
        self.notes = fields.notes;
        self.reminder = fields.reminder;
    }

    /// Current mutable fields, e.g. to prefill an edit.
    pub fn fields(&self) -> EventFields {
        EventFields {
            title: self.title.clone(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            priority: self.priority.clone(),
            notes: self.notes.clone(),
            reminder: self.reminder,
        }
    }
}

/// Fields of an event that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub priority: Priority,
    pub notes: String,
    pub reminder: Option<u32>,
}

impl NewEvent {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Self {
        Self {
            title: title.into(),
            date,
            start_time,
            end_time,
            priority: Priority::default(),
            notes: String::new(),
            reminder: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_reminder(mut self, reminder: Option<u32>) -> Self {
        self.reminder = reminder;
        self
    }

    /// Titles must contain something besides whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Full replacement of an event's mutable fields, as submitted by an edit.
pub type EventFields = NewEvent;
