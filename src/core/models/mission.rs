//! Mission model

use super::Priority;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The primary goal: finish the High Priority chapters of a set of subjects
/// by a target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    /// Dashboard title (e.g., "CHSE Odisha 12th: Mission Jan 1st")
    pub title: String,

    /// One-line goal statement shown next to the countdown
    #[serde(default)]
    pub goal: String,

    /// Date the mission should be complete by
    pub target_date: NaiveDate,

    /// Subjects whose High Priority concepts count toward the mission
    pub subjects: Vec<String>,
}

impl Mission {
    /// Whether a concept in `subject` at tier `priority` counts toward the mission
    #[must_use]
    pub fn counts(&self, subject: &str, priority: Priority) -> bool {
        priority == Priority::High && self.subjects.iter().any(|s| s == subject)
    }

    /// Whole days from `today` until the target date; negative once it has passed
    #[must_use]
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.target_date - today).num_days()
    }
}
