//! End-to-end store scenarios against file-backed storage.

use calendme_core::time::parse_date;
use calendme_core::{Event, EventStore, FileStorage, KeyValueStore, NewEvent, EVENTS_KEY};
use tempfile::TempDir;

fn event(title: &str, date: &str, start: &str, end: &str) -> Event {
    Event::new(NewEvent::new(
        title,
        parse_date(date).unwrap(),
        start.parse().unwrap(),
        end.parse().unwrap(),
    ))
}

#[test]
fn overlapping_second_event_reports_first() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = EventStore::open(FileStorage::open(temp_dir.path()).unwrap());

    let math = event("Math", "2024-01-10", "09:00", "10:00");
    let math_id = math.id.clone();
    store.add(math).unwrap();

    let physics = event("Physics", "2024-01-10", "09:30", "10:30");
    let conflicts = store.check_conflicts(&physics);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].id, math_id);

    // advisory only
    store.add(physics).unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn back_to_back_events_are_not_conflicts() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = EventStore::open(FileStorage::open(temp_dir.path()).unwrap());

    store.add(event("First", "2024-01-10", "09:00", "10:00")).unwrap();
    let second = event("Second", "2024-01-10", "10:00", "11:00");
    assert!(store.check_conflicts(&second).is_empty());
}

#[test]
fn clear_all_on_five_events_persists_empty_collection() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = EventStore::open(FileStorage::open(temp_dir.path()).unwrap());
    for (i, title) in ["A", "B", "C", "D", "E"].iter().enumerate() {
        let start = format!("{:02}:00", 8 + i);
        let end = format!("{:02}:00", 9 + i);
        store.add(event(title, "2024-01-10", &start, &end)).unwrap();
    }
    assert_eq!(store.len(), 5);

    store.clear_all().unwrap();
    assert_eq!(store.len(), 0);

    let storage = FileStorage::open(temp_dir.path()).unwrap();
    assert_eq!(storage.get(EVENTS_KEY).unwrap().as_deref(), Some("[]"));
    assert!(EventStore::open(storage).is_empty());
}

#[test]
fn reopening_restores_the_same_events_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = EventStore::open(FileStorage::open(temp_dir.path()).unwrap());
    store.add(event("Physics", "2024-01-11", "09:00", "10:00")).unwrap();
    store.add(event("Math", "2024-01-10", "14:00", "15:00")).unwrap();
    store.add(event("Art", "2024-01-10", "14:00", "15:00")).unwrap();
    let expected = store.events().to_vec();
    drop(store);

    let reopened = EventStore::restore(FileStorage::open(temp_dir.path()).unwrap()).unwrap();
    assert_eq!(reopened.events(), &expected[..]);
    let titles: Vec<_> = reopened.events().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Art", "Math", "Physics"]);
}

#[test]
fn corrupt_file_is_reported_then_replaced_on_next_write() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("calendme_events.json"), "[{\"broken\":").unwrap();

    let err = EventStore::restore(FileStorage::open(temp_dir.path()).unwrap()).unwrap_err();
    let mut store = err.into_empty_store();
    assert!(store.is_empty());

    store.add(event("Fresh", "2024-01-10", "09:00", "10:00")).unwrap();
    let reopened = EventStore::restore(FileStorage::open(temp_dir.path()).unwrap()).unwrap();
    assert_eq!(reopened.len(), 1);
}
