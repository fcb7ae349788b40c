//! Study session
//!
//! [`Tracker`] owns the syllabus, the progress record and its store for one
//! session. Opening it is the loading step; once it exists the session is
//! ready and every toggle runs mutate → save → recompute → new view as one
//! step on the caller's thread.

use crate::core::dashboard::DashboardView;
use crate::core::metrics::{compute_metrics, ProgressMetrics};
use crate::core::models::ConceptKey;
use crate::core::progress::{
    LegacyImport, LegacyProgress, ProgressError, ProgressRecord, ProgressStore,
};
use crate::core::syllabus::Syllabus;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Loading or saving the progress record failed
    #[error(transparent)]
    Store(#[from] ProgressError),
    /// The key does not name a concept in the syllabus
    #[error("'{0}' is not in the syllabus")]
    UnknownConcept(ConceptKey),
    /// No concept has this number
    #[error("no concept numbered {number} (valid range is 1-{max})")]
    UnknownNumber {
        /// Requested number
        number: usize,
        /// Highest valid number
        max: usize,
    },
}

/// Result of one toggle step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Concept that was toggled
    pub key: ConceptKey,
    /// Its new state
    pub done: bool,
    /// Dashboard recomputed after the change was saved
    pub view: DashboardView,
}

/// Summary of a legacy import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entries merged into the record
    pub imported: usize,
    /// Legacy keys matching no concept
    pub unmatched: Vec<String>,
    /// Legacy keys matching more than one concept
    pub ambiguous: Vec<String>,
}

/// One user's session over a syllabus and its persisted progress
#[derive(Debug)]
pub struct Tracker {
    syllabus: Syllabus,
    store: ProgressStore,
    record: ProgressRecord,
}

impl Tracker {
    /// Load the persisted record and start a session
    ///
    /// # Errors
    /// Returns `TrackerError::Store` if the progress file is unreadable or corrupt.
    pub fn open(syllabus: Syllabus, store: ProgressStore) -> Result<Self, TrackerError> {
        let record = store.load()?;
        crate::info!(
            "Session ready: {} concepts, {} of {} stored entries done ({})",
            syllabus.catalog.concept_count(),
            record.done_keys().count(),
            record.len(),
            store.path().display()
        );
        Ok(Self {
            syllabus,
            store,
            record,
        })
    }

    /// Start a session for importing legacy progress.
    ///
    /// Like [`open`](Self::open), but a store still in the flat legacy format
    /// is converted instead of rejected: its resolvable entries become the
    /// starting record, and the next save rewrites the store in the nested
    /// format. The conversion summary is returned alongside the session.
    ///
    /// # Errors
    /// Returns `TrackerError::Store` if the store is unreadable or corrupt.
    pub fn open_for_import(
        syllabus: Syllabus,
        store: ProgressStore,
    ) -> Result<(Self, Option<ImportSummary>), TrackerError> {
        let (record, converted) = match store.load() {
            Ok(record) => (record, None),
            Err(ProgressError::LegacyFormat { .. }) => {
                let legacy = store.load_legacy()?;
                let LegacyImport {
                    record,
                    unmatched,
                    ambiguous,
                } = ProgressRecord::from_legacy(&legacy, &syllabus.catalog);
                crate::warn!(
                    "Converting legacy store {} ({} entries)",
                    store.path().display(),
                    record.len()
                );
                let summary = ImportSummary {
                    imported: record.len(),
                    unmatched,
                    ambiguous,
                };
                (record, Some(summary))
            }
            Err(err) => return Err(err.into()),
        };

        let tracker = Self {
            syllabus,
            store,
            record,
        };
        Ok((tracker, converted))
    }

    /// The syllabus in use
    #[must_use]
    pub const fn syllabus(&self) -> &Syllabus {
        &self.syllabus
    }

    /// The in-memory record; always equal to what was last saved
    #[must_use]
    pub const fn record(&self) -> &ProgressRecord {
        &self.record
    }

    /// The backing store
    #[must_use]
    pub const fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Current metrics
    #[must_use]
    pub fn metrics(&self) -> ProgressMetrics {
        compute_metrics(&self.syllabus.catalog, &self.record, &self.syllabus.mission)
    }

    /// Current dashboard for `today`
    #[must_use]
    pub fn view(&self, today: NaiveDate) -> DashboardView {
        DashboardView::build(&self.syllabus, &self.record, today)
    }

    /// Flip one concept, persist the record and return the refreshed dashboard.
    ///
    /// If saving fails the flip is undone, so memory and disk stay in step
    /// and the error reaches the caller instead of a stale success.
    ///
    /// # Errors
    /// - `TrackerError::UnknownConcept` if the key is not in the syllabus
    /// - `TrackerError::Store` if the record could not be saved
    pub fn toggle(
        &mut self,
        key: &ConceptKey,
        today: NaiveDate,
    ) -> Result<ToggleOutcome, TrackerError> {
        if !self.syllabus.catalog.contains(key) {
            return Err(TrackerError::UnknownConcept(key.clone()));
        }

        let done = self.record.toggle(key);
        if let Err(err) = self.store.save(&self.record) {
            self.record.toggle(key);
            crate::error!("Toggle of '{key}' rolled back: {err}");
            return Err(err.into());
        }
        crate::info!("Marked '{key}' as {}", if done { "done" } else { "not done" });

        Ok(ToggleOutcome {
            key: key.clone(),
            done,
            view: self.view(today),
        })
    }

    /// Toggle the concept with the given 1-based number
    ///
    /// # Errors
    /// - `TrackerError::UnknownNumber` if no concept has that number
    /// - `TrackerError::Store` if the record could not be saved
    pub fn toggle_number(
        &mut self,
        number: usize,
        today: NaiveDate,
    ) -> Result<ToggleOutcome, TrackerError> {
        let key = self
            .syllabus
            .catalog
            .entry_by_number(number)
            .map(|entry| entry.key())
            .ok_or_else(|| TrackerError::UnknownNumber {
                number,
                max: self.syllabus.catalog.concept_count(),
            })?;
        self.toggle(&key, today)
    }

    /// Merge a legacy flat progress mapping into the record and save it.
    ///
    /// Resolved entries overwrite existing values. Nothing changes if saving fails.
    ///
    /// # Errors
    /// Returns `TrackerError::Store` if the merged record could not be saved.
    pub fn import_legacy(&mut self, legacy: &LegacyProgress) -> Result<ImportSummary, TrackerError> {
        let LegacyImport {
            record,
            unmatched,
            ambiguous,
        } = ProgressRecord::from_legacy(legacy, &self.syllabus.catalog);

        let mut merged = self.record.clone();
        merged.merge(&record);
        self.store.save(&merged)?;
        self.record = merged;

        crate::info!(
            "Imported {} legacy entries ({} unmatched, {} ambiguous)",
            record.len(),
            unmatched.len(),
            ambiguous.len()
        );
        Ok(ImportSummary {
            imported: record.len(),
            unmatched,
            ambiguous,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dashboard::Banner;
    use crate::core::models::catalog::tests::{chapter, subject};
    use crate::core::models::{Catalog, Mission};
    use std::fs;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 22).unwrap()
    }

    fn syllabus() -> Syllabus {
        let catalog = Catalog::new(vec![subject(
            "A",
            vec![chapter("A1", &["a1", "a2"])],
            vec![chapter("A2", &["a3"])],
        )])
        .unwrap();
        let mission = Mission {
            title: "Mission".to_string(),
            goal: String::new(),
            target_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            subjects: vec!["A".to_string()],
        };
        Syllabus::new(catalog, mission).unwrap()
    }

    #[test]
    fn test_toggle_saves_before_returning_view() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::new(dir.path().join("progress.json"));
        let mut tracker = Tracker::open(syllabus(), store.clone()).unwrap();

        let outcome = tracker
            .toggle(&ConceptKey::new("A", "A1", "a1"), today())
            .unwrap();
        assert!(outcome.done);
        assert_eq!(outcome.view.mission.completed, 1);
        assert_eq!(outcome.view.mission.percentage, 50);
        assert_eq!(outcome.view.banner, None);
        assert_eq!(store.load().unwrap(), *tracker.record());
    }

    #[test]
    fn test_toggle_number_reaches_goal() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::new(dir.path().join("progress.json"));
        let mut tracker = Tracker::open(syllabus(), store).unwrap();

        tracker.toggle_number(1, today()).unwrap();
        let outcome = tracker.toggle_number(2, today()).unwrap();
        assert_eq!(outcome.key, ConceptKey::new("A", "A1", "a2"));
        assert_eq!(outcome.view.banner, Some(Banner::GoalComplete));
    }

    #[test]
    fn test_unknown_concept_and_number_rejected() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::new(dir.path().join("progress.json"));
        let mut tracker = Tracker::open(syllabus(), store.clone()).unwrap();

        let err = tracker
            .toggle(&ConceptKey::new("A", "A1", "zzz"), today())
            .unwrap_err();
        assert!(matches!(err, TrackerError::UnknownConcept(_)));

        let err = tracker.toggle_number(4, today()).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownNumber { number: 4, max: 3 }));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_failed_save_rolls_back_toggle() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        let store = ProgressStore::new(blocker.join("progress.json"));
        let mut tracker = Tracker::open(syllabus(), store).unwrap();
        fs::write(&blocker, "not a directory").unwrap();

        let key = ConceptKey::new("A", "A1", "a1");
        let err = tracker.toggle(&key, today()).unwrap_err();
        assert!(matches!(err, TrackerError::Store(ProgressError::Write { .. })));
        assert!(!tracker.record().is_done(&key));
        assert_eq!(tracker.metrics().mission.completed, 0);
    }

    #[test]
    fn test_open_fails_on_corrupt_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = Tracker::open(syllabus(), ProgressStore::new(path)).unwrap_err();
        assert!(matches!(err, TrackerError::Store(ProgressError::Corrupt { .. })));
    }

    #[test]
    fn test_import_converts_legacy_store_from_a_copy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        let copy = dir.path().join("copy.json");
        fs::write(&path, r#"{"A_A1_a1": true, "A_A2_a3": true}"#).unwrap();
        fs::write(&copy, r#"{"A_A1_a2": true}"#).unwrap();
        let store = ProgressStore::new(&path);

        let (mut tracker, converted) =
            Tracker::open_for_import(syllabus(), store.clone()).unwrap();
        assert_eq!(converted.map(|c| c.imported), Some(2));

        let legacy: LegacyProgress =
            serde_json::from_str(&fs::read_to_string(&copy).unwrap()).unwrap();
        let summary = tracker.import_legacy(&legacy).unwrap();
        assert_eq!(summary.imported, 1);

        let reloaded = store.load().unwrap();
        assert!(reloaded.is_done(&ConceptKey::new("A", "A1", "a1")));
        assert!(reloaded.is_done(&ConceptKey::new("A", "A1", "a2")));
        assert!(reloaded.is_done(&ConceptKey::new("A", "A2", "a3")));
    }

    #[test]
    fn test_import_of_the_legacy_store_itself() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, r#"{"A_A1_a1": true, "A_X_gone": true}"#).unwrap();
        let store = ProgressStore::new(&path);
        assert!(Tracker::open(syllabus(), store.clone()).is_err());

        let (mut tracker, converted) =
            Tracker::open_for_import(syllabus(), store.clone()).unwrap();
        let converted = converted.unwrap();
        assert_eq!(converted.unmatched, ["A_X_gone"]);

        let legacy = store.load_legacy().unwrap();
        tracker.import_legacy(&legacy).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.done_keys().count(), 1);
        assert!(Tracker::open(syllabus(), store).is_ok());
    }

    #[test]
    fn test_open_for_import_keeps_nested_store() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::new(dir.path().join("progress.json"));
        let (_, converted) = Tracker::open_for_import(syllabus(), store).unwrap();
        assert!(converted.is_none());
    }

    #[test]
    fn test_import_legacy_merges_and_saves() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::new(dir.path().join("progress.json"));
        let mut tracker = Tracker::open(syllabus(), store.clone()).unwrap();
        tracker
            .toggle(&ConceptKey::new("A", "A2", "a3"), today())
            .unwrap();

        let legacy: LegacyProgress = [
            ("A_A1_a1".to_string(), true),
            ("A_A9_gone".to_string(), true),
        ]
        .into_iter()
        .collect();
        let summary = tracker.import_legacy(&legacy).unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.unmatched, ["A_A9_gone"]);
        assert!(summary.ambiguous.is_empty());

        let reloaded = store.load().unwrap();
        assert!(reloaded.is_done(&ConceptKey::new("A", "A1", "a1")));
        assert!(reloaded.is_done(&ConceptKey::new("A", "A2", "a3")));
    }
}
