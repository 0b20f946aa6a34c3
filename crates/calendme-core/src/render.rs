//! Text formatting for event lists and prompts.

use chrono::{Datelike, Duration, NaiveDate};

use crate::event::Event;

/// `"Today"`, `"Tomorrow"`, otherwise e.g. `"Mon, Jan 15"`.
pub fn format_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if Some(date) == today.checked_add_signed(Duration::days(1)) {
        return "Tomorrow".to_string();
    }
    format!("{}, {} {}", date.format("%a"), date.format("%b"), date.day())
}

/// `"09:00 - 10:00"`
pub fn time_range(event: &Event) -> String {
    format!("{} - {}", event.start_time, event.end_time)
}

/// `"1 event"`, `"3 events"`
pub fn event_count_label(count: usize) -> String {
    if count == 1 {
        "1 event".to_string()
    } else {
        format!("{count} events")
    }
}

/// One line per event: date label, time range, title, priority and id.
pub fn event_line(event: &Event, today: NaiveDate) -> String {
    let mut line = format!(
        "{:<12} {}  {}  [{}]  {}",
        format_date(event.date, today),
        time_range(event),
        event.title,
        event.priority,
        event.id
    );
    if let Some(minutes) = event.reminder {
        line.push_str(&format!("  (reminder {minutes}min)"));
    }
    line
}

/// Warning shown before adding an event that overlaps others.
pub fn conflict_message(candidate: &Event, conflicts: &[Event]) -> String {
    let listed: Vec<String> = conflicts
        .iter()
        .map(|e| format!("• {} ({})", e.title, time_range(e)))
        .collect();
    format!(
        "Time conflict detected!\n\nYour new event \"{}\" overlaps with:\n{}\n\n\
         Do you want to add it anyway?",
        candidate.title,
        listed.join("\n")
    )
}

/// Feedback after a successful add.
pub fn added_message(event: &Event) -> String {
    match event.reminder {
        Some(minutes) => format!("Added: {} ({minutes}min reminder)", event.title),
        None => format!("Added: {}", event.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NewEvent;
    use crate::time::parse_date;

    fn event(title: &str, start: &str, end: &str) -> Event {
        Event::new(NewEvent::new(
            title,
            parse_date("2024-01-15").unwrap(),
            start.parse().unwrap(),
            end.parse().unwrap(),
        ))
    }

    #[test]
    fn format_date_uses_relative_labels() {
        let today = parse_date("2024-01-14").unwrap();
        assert_eq!(format_date(today, today), "Today");
        assert_eq!(format_date(parse_date("2024-01-15").unwrap(), today), "Tomorrow");
        assert_eq!(format_date(parse_date("2024-01-22").unwrap(), today), "Mon, Jan 22");
        assert_eq!(format_date(parse_date("2024-01-05").unwrap(), today), "Fri, Jan 5");
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(event_count_label(0), "0 events");
        assert_eq!(event_count_label(1), "1 event");
        assert_eq!(event_count_label(2), "2 events");
    }

    #[test]
    fn conflict_message_lists_each_conflict() {
        let candidate = event("Physics", "09:30", "10:30");
        let conflicts = vec![event("Math", "09:00", "10:00"), event("Lab", "10:00", "11:00")];
        let msg = conflict_message(&candidate, &conflicts);
        assert!(msg.contains("\"Physics\""));
        assert!(msg.contains("• Math (09:00 - 10:00)"));
        assert!(msg.contains("• Lab (10:00 - 11:00)"));
    }

    #[test]
    fn added_message_mentions_reminder() {
        let mut e = event("Standup", "09:00", "09:15");
        assert_eq!(added_message(&e), "Added: Standup");
        e.reminder = Some(10);
        assert_eq!(added_message(&e), "Added: Standup (10min reminder)");
    }
}
