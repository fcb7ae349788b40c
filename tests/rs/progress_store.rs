//! Integration tests for the JSON progress store.

use std::fs;
use study_tracker::core::models::ConceptKey;
use study_tracker::core::progress::{ProgressError, ProgressRecord, ProgressStore};
use tempfile::TempDir;

fn key(concept: &str) -> ConceptKey {
    ConceptKey::new("Physics", "Electrostatics", concept)
}

#[test]
fn missing_file_is_empty_record() {
    let dir = TempDir::new().unwrap();
    let store = ProgressStore::new(dir.path().join("nested").join("progress.json"));

    let record = store.load().expect("missing store is not an error");
    assert!(record.is_empty());
    assert!(!record.is_done(&key("Coulomb's Law")));
}

#[test]
fn save_load_round_trip_is_identity() {
    let dir = TempDir::new().unwrap();
    let store = ProgressStore::new(dir.path().join("progress.json"));

    let mut record = ProgressRecord::new();
    record.set(key("Coulomb's Law"), true);
    record.set(key("Gauss_Law"), false);
    record.set(ConceptKey::new("Chemistry", "Solutions", "Raoult's Law"), true);
    store.save(&record).unwrap();

    let first = fs::read_to_string(store.path()).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded, record);

    store.save(&loaded).unwrap();
    assert_eq!(fs::read_to_string(store.path()).unwrap(), first);
}

#[test]
fn save_replaces_instead_of_merging() {
    let dir = TempDir::new().unwrap();
    let store = ProgressStore::new(dir.path().join("progress.json"));

    let mut first = ProgressRecord::new();
    first.set(key("a"), true);
    store.save(&first).unwrap();

    let mut second = ProgressRecord::new();
    second.set(key("b"), true);
    store.save(&second).unwrap();

    let loaded = store.load().unwrap();
    assert!(!loaded.is_done(&key("a")));
    assert!(loaded.is_done(&key("b")));
}

#[test]
fn double_toggle_restores_record() {
    let mut record = ProgressRecord::new();
    record.set(key("a"), true);
    let before = record.clone();

    assert!(!record.toggle(&key("a")));
    assert!(record.toggle(&key("a")));
    assert_eq!(record, before);
}

#[test]
fn persisted_json_is_nested() {
    let dir = TempDir::new().unwrap();
    let store = ProgressStore::new(dir.path().join("progress.json"));
    let mut record = ProgressRecord::new();
    record.set(key("Coulomb's Law"), true);
    store.save(&record).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(json["Physics"]["Electrostatics"]["Coulomb's Law"], true);
}

#[test]
fn corrupt_and_legacy_files_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progress.json");
    let store = ProgressStore::new(&path);

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(store.load(), Err(ProgressError::Corrupt { .. })));

    fs::write(&path, r#"{"Physics_Electrostatics_Coulomb's Law": true}"#).unwrap();
    assert!(matches!(store.load(), Err(ProgressError::LegacyFormat { .. })));
    // The file is left untouched for `import`.
    assert!(fs::read_to_string(&path).unwrap().contains("Physics_Electrostatics"));
}
