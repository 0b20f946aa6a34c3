//! Event commands: add, edit, delete, list, conflicts, clear.

use calendme_core::render::{
    added_message, conflict_message, event_count_label, event_line, time_range,
};
use calendme_core::time::parse_date;
use calendme_core::{AddOutcome, EditOutcome, Event, NewEvent, Priority, TimeOfDay};
use chrono::NaiveDate;
use clap::Subcommand;

use crate::context;

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event described in plain language ("Math exam tomorrow at 9am")
    Add {
        /// Event description
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Priority label: green, yellow, red or any custom label
        #[arg(long)]
        priority: Option<String>,
        /// Add even if the event overlaps existing ones
        #[arg(long, short)]
        yes: bool,
    },
    /// Add an event from explicit fields
    New {
        /// Event title
        #[arg(long)]
        title: String,
        /// Date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Start time (HH:MM)
        #[arg(long)]
        start: TimeOfDay,
        /// End time (HH:MM)
        #[arg(long)]
        end: TimeOfDay,
        /// Priority label
        #[arg(long)]
        priority: Option<String>,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Reminder in minutes before the start
        #[arg(long)]
        reminder: Option<u32>,
        /// Add even if the event overlaps existing ones
        #[arg(long, short)]
        yes: bool,
    },
    /// Change fields of a stored event
    Edit {
        /// Event ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long)]
        start: Option<TimeOfDay>,
        #[arg(long)]
        end: Option<TimeOfDay>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Reminder in minutes; 0 removes it
        #[arg(long)]
        reminder: Option<u32>,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },
    /// List events in chronological order
    List {
        /// Print the stored JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show which events a time slot would overlap
    Conflicts {
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long)]
        start: TimeOfDay,
        #[arg(long)]
        end: TimeOfDay,
    },
    /// Remove every event
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = context::load_config();

    match action {
        EventAction::Add { text, priority, yes } => {
            let mut planner = context::open_planner(&config)?;
            let priority = priority
                .map(Priority::from)
                .unwrap_or_else(|| config.default_priority());
            let input = text.join(" ");
            let outcome = context::block_on(planner.quick_add(&input, priority, |event, conflicts| {
                confirm_conflict(event, conflicts, yes)
            }))??;
            report_add(outcome);
        }
        EventAction::New {
            title,
            date,
            start,
            end,
            priority,
            notes,
            reminder,
            yes,
        } => {
            let mut planner = context::open_planner(&config)?;
            let priority = priority
                .map(Priority::from)
                .unwrap_or_else(|| config.default_priority());
            let new_event = NewEvent::new(title, date, start, end)
                .with_priority(priority)
                .with_notes(notes)
                .with_reminder(reminder);
            let outcome = planner.add_manual(new_event, |event, conflicts| {
                confirm_conflict(event, conflicts, yes)
            })?;
            report_add(outcome);
        }
        EventAction::Edit {
            id,
            title,
            date,
            start,
            end,
            priority,
            notes,
            reminder,
        } => {
            let mut planner = context::open_planner(&config)?;
            let mut fields = planner
                .store()
                .get(&id)
                .map(Event::fields)
                .ok_or_else(|| format!("event not found: {id}"))?;
            if let Some(title) = title {
                fields.title = title;
            }
            if let Some(date) = date {
                fields.date = date;
            }
            if let Some(start) = start {
                fields.start_time = start;
            }
            if let Some(end) = end {
                fields.end_time = end;
            }
            if let Some(priority) = priority {
                fields.priority = Priority::from(priority);
            }
            if let Some(notes) = notes {
                fields.notes = notes;
            }
            if let Some(minutes) = reminder {
                fields.reminder = (minutes > 0).then_some(minutes);
            }
            match planner.edit(&id, fields)? {
                EditOutcome::Updated => println!("Event updated: {id}"),
                EditOutcome::NotFound => return Err(format!("event not found: {id}").into()),
            }
        }
        EventAction::Delete { id } => {
            let mut planner = context::open_planner(&config)?;
            if !planner.delete(&id)? {
                return Err(format!("event not found: {id}").into());
            }
            println!("Event deleted: {id}");
        }
        EventAction::List { json } => {
            let store = context::open_store(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(store.events())?);
            } else if store.is_empty() {
                println!("No events yet. Add one with `calendme add`.");
            } else {
                let today = context::today();
                println!("{}", event_count_label(store.len()));
                for event in store.events() {
                    println!("{}", event_line(event, today));
                }
            }
        }
        EventAction::Conflicts { date, start, end } => {
            let planner = context::open_planner(&config)?;
            let probe = Event::new(NewEvent::new("", date, start, end));
            let conflicts = planner.conflicts_for(&probe);
            if conflicts.is_empty() {
                println!("No conflicts.");
            } else {
                for event in &conflicts {
                    println!("{}  {}  {}", time_range(event), event.title, event.id);
                }
            }
        }
        EventAction::Clear { yes } => {
            let mut planner = context::open_planner(&config)?;
            let removed = planner.clear_all(|count| {
                yes || context::confirm(&format!(
                    "Are you sure you want to delete all {count} events? This cannot be undone."
                ))
            })?;
            if removed == 0 && !planner.events().is_empty() {
                println!("Cancelled.");
            } else {
                println!("Removed {}.", event_count_label(removed));
            }
        }
    }
    Ok(())
}

fn confirm_conflict(event: &Event, conflicts: &[Event], yes: bool) -> bool {
    if yes {
        return true;
    }
    eprintln!("{}", conflict_message(event, conflicts));
    context::confirm("Add anyway?")
}

fn report_add(outcome: AddOutcome) {
    match outcome {
        AddOutcome::Added { event, conflicts } => {
            println!("{}", added_message(&event));
            if !conflicts.is_empty() {
                println!("Overlaps {}.", event_count_label(conflicts.len()));
            }
            println!("{}", event.id);
        }
        AddOutcome::Declined { event, .. } => {
            println!("Not added: {}", event.title);
        }
    }
}
