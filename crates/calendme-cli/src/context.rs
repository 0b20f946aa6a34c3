//! Shared setup for commands: configuration, storage, store, service client.

use std::io::{self, BufRead, Write};

use calendme_core::{Config, EventStore, FileStorage, Planner, ServiceClient};
use chrono::{Local, NaiveDate};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Configuration for schedule commands. An unreadable config file is
/// logged and defaults are used, so the schedule stays reachable.
pub fn load_config() -> Config {
    Config::load_or_default()
}

/// Storage directory from the config, else the data directory.
pub fn open_storage(config: &Config) -> CliResult<FileStorage> {
    let storage = match config.storage_dir() {
        Some(dir) => FileStorage::open(dir)?,
        None => FileStorage::open_default()?,
    };
    Ok(storage)
}

/// Rehydrate the event store. Unreadable saved events are reported on
/// stderr and the command continues with an empty schedule.
pub fn open_store(config: &Config) -> CliResult<EventStore<FileStorage>> {
    let storage = open_storage(config)?;
    match EventStore::restore(storage) {
        Ok(store) => Ok(store),
        Err(e) => {
            eprintln!("warning: {e}; starting with an empty schedule");
            Ok(e.into_empty_store())
        }
    }
}

pub fn open_planner(config: &Config) -> CliResult<Planner<FileStorage>> {
    let store = open_store(config)?;
    let service = ServiceClient::new(&config.service.base_url)?;
    Ok(Planner::new(store, service))
}

/// Run a future to completion on a single-threaded runtime.
pub fn block_on<F: std::future::Future>(future: F) -> CliResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Ask a yes/no question on stderr. Anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
