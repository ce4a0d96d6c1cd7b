//! Backing file round-trips and recovery behavior.

use orgstore::{
    BloodDonationDraft, DonationDraft, EventDraft, MemberDraft, RecordStore, Snapshot,
    DEFAULT_PASSWORD, DEFAULT_USERNAME,
};
use std::fs;
use tempfile::TempDir;

fn populate(store: &RecordStore) {
    store
        .add_member(MemberDraft::new(
            "Ada",
            "ada@example.org",
            "555-0100",
            "1 Main St",
            "pw",
        ))
        .unwrap();
    store
        .add_event(EventDraft::new("Meetup", "2024-06-01", "Hall", "All welcome"))
        .unwrap();
    store
        .add_donation(DonationDraft::new("Bob", "10.50", "2024-06-02"))
        .unwrap();
    store
        .add_blood_donation(BloodDonationDraft::new("Eve", "B+", "2024-06-03"))
        .unwrap();
}

#[test]
fn test_round_trip_preserves_every_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");

    let store = RecordStore::open_at(&path);
    populate(&store);

    let reopened = RecordStore::open_at(&path);
    assert_eq!(reopened.list_members(), store.list_members());
    assert_eq!(reopened.list_events(), store.list_events());
    assert_eq!(reopened.list_donations(), store.list_donations());
    assert_eq!(reopened.list_blood_donations(), store.list_blood_donations());
    assert!(reopened.authenticate(DEFAULT_USERNAME, DEFAULT_PASSWORD));
}

#[test]
fn test_document_shape_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");

    let store = RecordStore::open_at(&path);
    populate(&store);

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(doc["members"][0]["email"], "ada@example.org");
    assert_eq!(doc["events"][0]["date"], "2024-06-01");
    assert_eq!(doc["donations"][0]["amount"], 10.5);
    assert_eq!(doc["blood_donations"][0]["blood_group"], "B+");
    assert_eq!(doc["users"][DEFAULT_USERNAME], DEFAULT_PASSWORD);
}

#[test]
fn test_corrupt_file_recovers_to_default() {
    // The recovery path logs a warning; keep it visible under --nocapture.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, "not json at all {{{").unwrap();

    let store = RecordStore::open_at(&path);
    assert!(store.list_members().is_empty());
    assert!(store.list_events().is_empty());
    assert!(store.list_donations().is_empty());
    assert!(store.list_blood_donations().is_empty());
    assert!(store.authenticate(DEFAULT_USERNAME, DEFAULT_PASSWORD));
}

#[test]
fn test_truncated_file_recovers_to_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");

    // Write a valid document, then truncate it mid-way.
    let store = RecordStore::open_at(&path);
    populate(&store);
    drop(store);

    let raw = fs::read_to_string(&path).unwrap();
    fs::write(&path, &raw[..raw.len() / 2]).unwrap();

    let recovered = RecordStore::open_at(&path);
    assert!(recovered.list_members().is_empty());
    assert!(recovered.authenticate(DEFAULT_USERNAME, DEFAULT_PASSWORD));
}

#[test]
fn test_missing_description_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r#"{
            "members": [],
            "events": [
                {"id": 1, "name": "Meetup", "date": "2024-06-01", "location": "Hall"}
            ],
            "donations": [],
            "blood_donations": [],
            "users": {"123456": "123456"}
        }"#,
    )
    .unwrap();

    let store = RecordStore::open_at(&path);
    let events = store.list_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].description, "");
}

#[test]
fn test_extra_credentials_survive_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r#"{
            "members": [], "events": [], "donations": [], "blood_donations": [],
            "users": {"123456": "123456", "secretary": "letmein"}
        }"#,
    )
    .unwrap();

    let store = RecordStore::open_at(&path);
    assert!(store.authenticate("secretary", "letmein"));
    store.save().unwrap();

    let reopened = RecordStore::open_at(&path);
    assert!(reopened.authenticate("SECRETARY", "letmein"));
    assert!(reopened.authenticate(DEFAULT_USERNAME, DEFAULT_PASSWORD));
}

#[test]
fn test_default_document_matches_fresh_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");

    let store = RecordStore::open_at(&path);
    store.save().unwrap();
    drop(store);

    let on_disk: Snapshot =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, Snapshot::default());
}

#[test]
fn test_save_failure_keeps_memory_state() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open_at(dir.path().join("data.json"));
    populate(&store);

    // Point the backup at an impossible path: the write fails but the
    // in-memory sets are untouched.
    let err = store.backup(dir.path().join("missing-dir").join("backup.json"));
    assert!(err.is_err());
    assert_eq!(store.list_members().len(), 1);
    assert_eq!(store.donation_total(), 10.5);
}
