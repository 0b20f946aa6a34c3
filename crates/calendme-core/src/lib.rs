//! # CalendME Core Library
//!
//! Business logic for the CalendME schedule builder: an ordered, persisted
//! list of events with conflict detection, plus clients for the backend
//! services that parse free text and spreadsheets and render ICS files.
//! The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Event Store**: owns the event list, keeps it sorted by
//!   `(date, start time, title)` and writes it to key-value storage after
//!   every change
//! - **Storage**: `KeyValueStore` trait with in-memory and file backends
//! - **Service client**: async HTTP calls to the parse/upload/process/ICS
//!   endpoints
//! - **Planner**: user workflows (quick add with conflict confirmation,
//!   import, export, clear)
//!
//! ## Key Components
//!
//! - [`EventStore`]: the store and its persistence contract
//! - [`Planner`]: workflows over the store and the services
//! - [`ServiceClient`]: backend HTTP client
//! - [`Config`]: application configuration management

pub mod config;
pub mod error;
pub mod event;
pub mod import;
pub mod planner;
pub mod render;
pub mod service;
pub mod storage;
pub mod store;
pub mod theme;
pub mod time;

pub use config::Config;
pub use error::{ConfigError, CoreError, Result, ServiceError, StorageError, ValidationError};
pub use event::{Event, EventFields, NewEvent, Priority};
pub use import::{ColumnMapping, ColumnRole, ImportReport, ImportedRow, RawTable};
pub use planner::{AddOutcome, Planner};
pub use service::{ParsedEvent, ServiceClient};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::{EditOutcome, EventStore, RestoreError, EVENTS_KEY};
pub use theme::Theme;
pub use time::TimeOfDay;
