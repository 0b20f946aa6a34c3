//! Spreadsheet import: column roles, processed rows, and conversion of rows
//! into events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::event::{NewEvent, Priority};
use crate::time::{parse_date, TimeOfDay};

/// Length given to imported events, which only carry a start time.
pub const DEFAULT_DURATION_MINUTES: u16 = 120;

/// What a spreadsheet column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Course,
    Title,
    Date,
    Time,
    Location,
}

/// Role -> zero-based column index, sent to the processing service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<ColumnRole, usize>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: ColumnRole, column: usize) -> Self {
        self.0.insert(role, column);
        self
    }

    pub fn column(&self, role: ColumnRole) -> Option<usize> {
        self.0.get(&role).copied()
    }

    /// A mapping needs at least a title or course, a date and a time.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = |what: &str| ValidationError::InvalidValue {
            field: "mapping".into(),
            message: format!("no column mapped for {what}"),
        };
        if self.column(ColumnRole::Title).is_none() && self.column(ColumnRole::Course).is_none() {
            return Err(missing("title or course"));
        }
        if self.column(ColumnRole::Date).is_none() {
            return Err(missing("date"));
        }
        if self.column(ColumnRole::Time).is_none() {
            return Err(missing("time"));
        }
        Ok(())
    }
}

/// Table extracted from an uploaded file by the parsing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub raw_rows: Vec<Vec<String>>,
    pub filename: String,
}

/// One row after the processing service applied the column mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedRow {
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
}

impl ImportedRow {
    /// Event title: `"<course> - <title>"`, or whichever part is present.
    pub fn display_title(&self) -> String {
        let course = self.course.trim();
        let title = self.title.trim();
        match (course.is_empty(), title.is_empty()) {
            (false, false) => format!("{course} - {title}"),
            (false, true) => course.to_string(),
            _ => title.to_string(),
        }
    }

    /// Build an event lasting [`DEFAULT_DURATION_MINUTES`], ending no later
    /// than 23:59. The location goes into the notes.
    pub fn to_new_event(&self, priority: Priority) -> Result<NewEvent, ValidationError> {
        let title = self.display_title();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let date = parse_date(&self.date)?;
        let start: TimeOfDay = self.time.parse()?;
        let end = start.saturating_add_minutes(DEFAULT_DURATION_MINUTES);
        Ok(NewEvent::new(title, date, start, end)
            .with_priority(priority)
            .with_notes(self.location.trim()))
    }
}

/// Outcome of importing a batch of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    /// Rows that could not become events, with the reason.
    pub skipped: Vec<(ImportedRow, ValidationError)>,
}
