//! Completion metrics
//!
//! Everything here is a pure function of the catalog, the progress record and
//! the mission. Metrics are recomputed on every render and never persisted.

use crate::core::models::{Catalog, Chapter, ConceptKey, Mission, Priority, Subject};
use crate::core::progress::ProgressRecord;

/// Percentage complete per subject, in catalog order
pub type SubjectPercentages = Vec<(String, u8)>;

/// Truncating completion percentage; 0 when there is nothing to complete.
///
/// `percentage(1, 3)` is 33, never 34.
#[must_use]
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = completed.min(total) * 100 / total;
    u8::try_from(pct).unwrap_or(100)
}

/// Completed and total concept counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Concepts marked done
    pub completed: usize,
    /// All concepts
    pub total: usize,
}

impl Tally {
    /// Count one concept
    pub fn add(&mut self, done: bool) {
        self.total += 1;
        if done {
            self.completed += 1;
        }
    }

    /// Truncating percentage of this tally
    #[must_use]
    pub fn percentage(&self) -> u8 {
        percentage(self.completed, self.total)
    }

    /// Whether every concept is done (false when there are none)
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Completion of one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectProgress {
    /// Subject name
    pub name: String,
    /// All tiers together
    pub overall: Tally,
    /// High Priority tier only
    pub high: Tally,
    /// Low Priority tier only
    pub low: Tally,
}

impl SubjectProgress {
    /// Overall percentage for the subject badge
    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.overall.percentage()
    }
}

/// Completion of the mission: High Priority concepts of the mission subjects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissionProgress {
    /// Mission concepts
    pub total: usize,
    /// Mission concepts marked done
    pub completed: usize,
    /// Truncating percentage of `completed / total`
    pub percentage: u8,
}

impl From<Tally> for MissionProgress {
    fn from(tally: Tally) -> Self {
        Self {
            total: tally.total,
            completed: tally.completed,
            percentage: tally.percentage(),
        }
    }
}

/// All derived metrics for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressMetrics {
    /// One entry per subject, in catalog order
    pub subjects: Vec<SubjectProgress>,
    /// Mission metric
    pub mission: MissionProgress,
}

impl ProgressMetrics {
    /// Subject name and percentage pairs, in catalog order
    #[must_use]
    pub fn subject_percentages(&self) -> SubjectPercentages {
        self.subjects
            .iter()
            .map(|s| (s.name.clone(), s.percentage()))
            .collect()
    }

    /// Concepts done across the whole catalog
    #[must_use]
    pub fn overall(&self) -> Tally {
        self.subjects.iter().fold(Tally::default(), |acc, s| Tally {
            completed: acc.completed + s.overall.completed,
            total: acc.total + s.overall.total,
        })
    }
}

/// Compute per-subject and mission metrics.
///
/// Record entries for concepts that are not in the catalog are ignored.
#[must_use]
pub fn compute_metrics(
    catalog: &Catalog,
    record: &ProgressRecord,
    mission: &Mission,
) -> ProgressMetrics {
    let mut mission_tally = Tally::default();

    let subjects = catalog
        .subjects()
        .iter()
        .map(|subject| {
            let mut progress = SubjectProgress {
                name: subject.name.clone(),
                overall: Tally::default(),
                high: Tally::default(),
                low: Tally::default(),
            };

            for tier in &subject.tiers {
                let counts_for_mission = mission.counts(&subject.name, tier.priority);
                for chapter in &tier.chapters {
                    for concept in &chapter.concepts {
                        let done = record.is_done(&ConceptKey::new(
                            subject.name.as_str(),
                            chapter.name.as_str(),
                            concept.as_str(),
                        ));
                        progress.overall.add(done);
                        match tier.priority {
                            Priority::High => progress.high.add(done),
                            Priority::Low => progress.low.add(done),
                        }
                        if counts_for_mission {
                            mission_tally.add(done);
                        }
                    }
                }
            }
            progress
        })
        .collect();

    ProgressMetrics {
        subjects,
        mission: mission_tally.into(),
    }
}

/// Completion of a single chapter
#[must_use]
pub fn chapter_tally(subject: &Subject, chapter: &Chapter, record: &ProgressRecord) -> Tally {
    let mut tally = Tally::default();
    for concept in &chapter.concepts {
        tally.add(record.is_done(&ConceptKey::new(
            subject.name.as_str(),
            chapter.name.as_str(),
            concept.as_str(),
        )));
    }
    tally
}
