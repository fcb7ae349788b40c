//! End-to-end tests of a tracker session: toggle, persist, recompute, restart.

use chrono::NaiveDate;
use study_tracker::core::dashboard::Banner;
use study_tracker::core::models::ConceptKey;
use study_tracker::core::progress::{LegacyProgress, ProgressStore};
use study_tracker::core::syllabus::Syllabus;
use study_tracker::core::tracker::Tracker;
use tempfile::TempDir;

/// Two mission subjects with five High Priority concepts each, plus Low
/// Priority and non-mission material that must not move the mission metric.
const SYLLABUS: &str = r#"
[mission]
title = "Test Mission"
target_date = "2026-01-01"
subjects = ["SubjectA", "SubjectB"]

[[subjects]]
name = "SubjectA"

[[subjects.tiers]]
priority = "High Priority"

[[subjects.tiers.chapters]]
name = "A1"
concepts = ["a1", "a2", "a3", "a4", "a5"]

[[subjects.tiers]]
priority = "Low Priority"

[[subjects.tiers.chapters]]
name = "A2"
concepts = ["a6"]

[[subjects]]
name = "SubjectB"

[[subjects.tiers]]
priority = "High Priority"

[[subjects.tiers.chapters]]
name = "B1"
concepts = ["b1", "b2", "b3", "b4", "b5"]

[[subjects]]
name = "SubjectC"

[[subjects.tiers]]
priority = "High Priority"

[[subjects.tiers.chapters]]
name = "C1"
concepts = ["c1", "c2", "c3"]

[[subjects]]
name = "Empty"
"#;

fn syllabus() -> Syllabus {
    Syllabus::from_toml(SYLLABUS).expect("test syllabus should parse")
}

/// `days` before the target date
fn days_before(days: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .checked_sub_days(chrono::Days::new(days))
        .unwrap()
}

fn open(dir: &TempDir) -> Tracker {
    let store = ProgressStore::new(dir.path().join("progress.json"));
    Tracker::open(syllabus(), store).expect("tracker should open")
}

fn key(subject: &str, chapter: &str, concept: &str) -> ConceptKey {
    ConceptKey::new(subject, chapter, concept)
}

fn complete_high(tracker: &mut Tracker, count: usize, today: NaiveDate) {
    let keys = ["a1", "a2", "a3", "a4", "a5"]
        .iter()
        .map(|c| key("SubjectA", "A1", c))
        .chain(["b1", "b2", "b3", "b4", "b5"].iter().map(|c| key("SubjectB", "B1", c)));
    for k in keys.take(count) {
        tracker.toggle(&k, today).unwrap();
    }
}

#[test]
fn fresh_tracker_has_nothing_done() {
    let dir = TempDir::new().unwrap();
    let tracker = open(&dir);
    let view = tracker.view(days_before(30));

    assert_eq!(view.mission.total, 10);
    assert_eq!(view.mission.completed, 0);
    assert!(view
        .sections
        .iter()
        .flat_map(|s| &s.tiers)
        .flat_map(|t| &t.chapters)
        .flat_map(|c| &c.items)
        .all(|item| !item.done));
}

#[test]
fn subject_percentages_truncate_and_handle_empty() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(&dir);
    tracker
        .toggle(&key("SubjectC", "C1", "c1"), days_before(30))
        .unwrap();

    let metrics = tracker.metrics();
    let percentages = metrics.subject_percentages();
    assert!(percentages.contains(&("SubjectC".to_string(), 33)));
    assert!(percentages.contains(&("Empty".to_string(), 0)));
}

#[test]
fn full_mission_shows_goal_complete() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(&dir);
    complete_high(&mut tracker, 10, days_before(5));

    let view = tracker.view(days_before(5));
    assert_eq!(view.mission.percentage, 100);
    assert_eq!(view.banner, Some(Banner::GoalComplete));
}

#[test]
fn behind_schedule_only_close_to_target() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(&dir);
    complete_high(&mut tracker, 4, days_before(40));

    let close = tracker.view(days_before(10));
    assert_eq!(close.mission.percentage, 40);
    assert_eq!(close.banner, Some(Banner::BehindSchedule));

    let far = tracker.view(days_before(25));
    assert_eq!(far.banner, None);
}

#[test]
fn low_priority_toggle_leaves_mission_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(&dir);
    complete_high(&mut tracker, 3, days_before(30));
    let before = tracker.view(days_before(30)).mission;

    let outcome = tracker
        .toggle(&key("SubjectA", "A2", "a6"), days_before(30))
        .unwrap();
    assert!(outcome.done);
    assert_eq!(outcome.view.mission, before);

    let outcome = tracker
        .toggle(&key("SubjectC", "C1", "c2"), days_before(30))
        .unwrap();
    assert_eq!(outcome.view.mission, before);
}

#[test]
fn progress_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut tracker = open(&dir);
        tracker
            .toggle(&key("SubjectA", "A1", "a1"), days_before(30))
            .unwrap();
        tracker
            .toggle(&key("SubjectB", "B1", "b2"), days_before(30))
            .unwrap();
        tracker
            .toggle(&key("SubjectB", "B1", "b2"), days_before(30))
            .unwrap();
    }

    let tracker = open(&dir);
    assert!(tracker.record().is_done(&key("SubjectA", "A1", "a1")));
    assert!(!tracker.record().is_done(&key("SubjectB", "B1", "b2")));
    assert_eq!(tracker.view(days_before(30)).mission.completed, 1);
}

#[test]
fn legacy_store_converts_when_importing_a_copy() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("progress.json");
    let copy_path = dir.path().join("backup.json");
    let legacy = r#"{"SubjectA_A1_a1": true, "SubjectB_B1_b1": true}"#;
    std::fs::write(&store_path, legacy).unwrap();
    std::fs::write(&copy_path, legacy).unwrap();

    let store = ProgressStore::new(&store_path);
    assert!(Tracker::open(syllabus(), store.clone()).is_err());

    let (mut tracker, converted) = Tracker::open_for_import(syllabus(), store).unwrap();
    assert_eq!(converted.map(|c| c.imported), Some(2));

    let copy: LegacyProgress =
        serde_json::from_str(&std::fs::read_to_string(&copy_path).unwrap()).unwrap();
    tracker.import_legacy(&copy).unwrap();

    let tracker = open(&dir);
    assert_eq!(tracker.view(days_before(30)).mission.completed, 2);
}
