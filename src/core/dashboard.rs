//! Dashboard view model
//!
//! A [`DashboardView`] is everything a front end needs to draw one frame:
//! countdown, mission bar and banner, subject badges and the full checklist.
//! It is rebuilt from scratch after every toggle.

use crate::core::metrics::{chapter_tally, compute_metrics, MissionProgress, Tally};
use crate::core::models::{ConceptKey, Priority};
use crate::core::progress::ProgressRecord;
use crate::core::syllabus::Syllabus;
use chrono::{Datelike, NaiveDate};

/// Mission percentage below which the schedule warning can fire
pub const BEHIND_SCHEDULE_PERCENT: u8 = 50;

/// Days remaining below which the schedule warning can fire
pub const BEHIND_SCHEDULE_DAYS: i64 = 20;

/// Conditional message under the mission bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// Less than half the mission done with under 20 days left
    BehindSchedule,
    /// Every mission concept done
    GoalComplete,
}

impl Banner {
    /// Pick the banner for a mission percentage and day count.
    ///
    /// The warning takes precedence; `None` is the plain informational state.
    #[must_use]
    pub const fn select(mission_percentage: u8, days_remaining: i64) -> Option<Self> {
        if mission_percentage < BEHIND_SCHEDULE_PERCENT && days_remaining < BEHIND_SCHEDULE_DAYS
        {
            Some(Self::BehindSchedule)
        } else if mission_percentage == 100 {
            Some(Self::GoalComplete)
        } else {
            None
        }
    }

    /// Whether this is the warning state
    #[must_use]
    pub const fn is_warning(self) -> bool {
        matches!(self, Self::BehindSchedule)
    }

    /// Message text; the congratulation names the target day
    #[must_use]
    pub fn message(self, target_date: NaiveDate) -> String {
        match self {
            Self::BehindSchedule => {
                "Warning: You are behind schedule on High Priority topics!".to_string()
            }
            Self::GoalComplete => format!(
                "Congratulations! You have completed the {} Goal!",
                short_day(target_date)
            ),
        }
    }
}

/// Month and ordinal day, e.g. "Jan 1st" or "Mar 12th"
#[must_use]
pub fn short_day(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {day}{suffix}", date.format("%b"))
}

/// Per-subject percentage badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectBadge {
    /// Subject name
    pub name: String,
    /// Overall completion
    pub tally: Tally,
    /// Truncating percentage of `tally`
    pub percentage: u8,
}

/// One checkable concept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptItem {
    /// Stable 1-based number used to toggle it
    pub number: usize,
    /// Concept text
    pub name: String,
    /// Current state from the progress record
    pub done: bool,
}

/// A chapter and its concepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSection {
    /// Chapter name
    pub name: String,
    /// Chapter completion
    pub tally: Tally,
    /// Concepts in display order
    pub items: Vec<ConceptItem>,
}

/// One priority tier of a subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSection {
    /// Tier
    pub priority: Priority,
    /// Tier completion
    pub tally: Tally,
    /// Chapters in display order
    pub chapters: Vec<ChapterSection>,
}

/// One subject's checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSection {
    /// Subject name
    pub name: String,
    /// Overall subject percentage
    pub percentage: u8,
    /// High tier first, then Low
    pub tiers: Vec<TierSection>,
}

/// Everything needed to render the dashboard once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Page title
    pub title: String,
    /// Goal statement
    pub goal: String,
    /// Mission target date
    pub target_date: NaiveDate,
    /// Date the view was built for
    pub today: NaiveDate,
    /// Days from `today` to `target_date`
    pub days_remaining: i64,
    /// Mission metric
    pub mission: MissionProgress,
    /// Concepts done across every subject
    pub overall: Tally,
    /// Mission subjects, for the goal caption
    pub mission_subjects: Vec<String>,
    /// Banner under the mission bar, if any
    pub banner: Option<Banner>,
    /// Subject badges in catalog order
    pub badges: Vec<SubjectBadge>,
    /// Full checklist
    pub sections: Vec<SubjectSection>,
}

impl DashboardView {
    /// Build the view for `today` from the syllabus and the current record
    #[must_use]
    pub fn build(syllabus: &Syllabus, record: &ProgressRecord, today: NaiveDate) -> Self {
        let metrics = compute_metrics(&syllabus.catalog, record, &syllabus.mission);
        let days_remaining = syllabus.mission.days_remaining(today);
        let banner = Banner::select(metrics.mission.percentage, days_remaining);

        let badges = metrics
            .subjects
            .iter()
            .map(|s| SubjectBadge {
                name: s.name.clone(),
                tally: s.overall,
                percentage: s.percentage(),
            })
            .collect();

        let mut number = 0;
        let sections = syllabus
            .catalog
            .subjects()
            .iter()
            .zip(&metrics.subjects)
            .map(|(subject, progress)| SubjectSection {
                name: subject.name.clone(),
                percentage: progress.percentage(),
                tiers: subject
                    .tiers
                    .iter()
                    .map(|tier| TierSection {
                        priority: tier.priority,
                        tally: match tier.priority {
                            Priority::High => progress.high,
                            Priority::Low => progress.low,
                        },
                        chapters: tier
                            .chapters
                            .iter()
                            .map(|chapter| ChapterSection {
                                name: chapter.name.clone(),
                                tally: chapter_tally(subject, chapter, record),
                                items: chapter
                                    .concepts
                                    .iter()
                                    .map(|concept| {
                                        number += 1;
                                        ConceptItem {
                                            number,
                                            name: concept.clone(),
                                            done: record.is_done(&ConceptKey::new(
                                                subject.name.as_str(),
                                                chapter.name.as_str(),
                                                concept.as_str(),
                                            )),
                                        }
                                    })
                                    .collect(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: syllabus.mission.title.clone(),
            goal: syllabus.mission.goal.clone(),
            target_date: syllabus.mission.target_date,
            today,
            days_remaining,
            mission: metrics.mission,
            overall: metrics.overall(),
            mission_subjects: syllabus.mission.subjects.clone(),
            banner,
            badges,
            sections,
        }
    }

    /// Text of the banner, if one applies
    #[must_use]
    pub fn banner_text(&self) -> Option<String> {
        self.banner.map(|banner| banner.message(self.target_date))
    }

    /// Checklist section for a subject, ignoring ASCII case
    #[must_use]
    pub fn section(&self, subject: &str) -> Option<&SubjectSection> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(subject.trim()))
    }

    /// Human-readable countdown ("12 days", "1 day", "3 days ago", "today")
    #[must_use]
    pub fn countdown(&self) -> String {
        match self.days_remaining {
            0 => "today".to_string(),
            1 => "1 day".to_string(),
            -1 => "1 day ago".to_string(),
            n if n < 0 => format!("{} days ago", -n),
            n => format!("{n} days"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::catalog::tests::{chapter, subject};
    use crate::core::models::{Catalog, Mission};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Mission subjects A and B with five High Priority concepts each
    fn syllabus() -> Syllabus {
        let catalog = Catalog::new(vec![
            subject(
                "A",
                vec![chapter("A1", &["a1", "a2", "a3", "a4", "a5"])],
                vec![chapter("A2", &["a6"])],
            ),
            subject("B", vec![chapter("B1", &["b1", "b2", "b3", "b4", "b5"])], vec![]),
            subject("C", vec![chapter("C1", &["c1"])], vec![]),
        ])
        .unwrap();
        let mission = Mission {
            title: "Mission".to_string(),
            goal: "Finish A and B".to_string(),
            target_date: date(2026, 1, 1),
            subjects: vec!["A".to_string(), "B".to_string()],
        };
        Syllabus::new(catalog, mission).unwrap()
    }

    fn record_with(done: &[(&str, &str, &str)]) -> ProgressRecord {
        let mut record = ProgressRecord::new();
        for (s, c, k) in done {
            record.set(ConceptKey::new(*s, *c, *k), true);
        }
        record
    }

    fn four_of_ten() -> ProgressRecord {
        record_with(&[
            ("A", "A1", "a1"),
            ("A", "A1", "a2"),
            ("B", "B1", "b1"),
            ("B", "B1", "b2"),
        ])
    }

    #[test]
    fn test_banner_thresholds() {
        assert_eq!(Banner::select(40, 10), Some(Banner::BehindSchedule));
        assert_eq!(Banner::select(40, 25), None);
        assert_eq!(Banner::select(49, 19), Some(Banner::BehindSchedule));
        assert_eq!(Banner::select(50, 19), None);
        assert_eq!(Banner::select(49, 20), None);
        assert_eq!(Banner::select(100, 5), Some(Banner::GoalComplete));
        assert_eq!(Banner::select(100, -3), Some(Banner::GoalComplete));
        assert_eq!(Banner::select(0, -1), Some(Banner::BehindSchedule));
    }

    #[test]
    fn test_goal_complete_when_all_mission_concepts_done() {
        let syllabus = syllabus();
        let mut record = ProgressRecord::new();
        for entry in syllabus.catalog.entries() {
            if syllabus.mission.counts(entry.subject, entry.priority) {
                record.set(entry.key(), true);
            }
        }

        let view = DashboardView::build(&syllabus, &record, date(2025, 12, 22));
        assert_eq!(view.mission.total, 10);
        assert_eq!(view.mission.completed, 10);
        assert_eq!(view.mission.percentage, 100);
        assert_eq!(view.banner, Some(Banner::GoalComplete));
        assert_eq!(
            view.banner_text().as_deref(),
            Some("Congratulations! You have completed the Jan 1st Goal!")
        );
        assert_eq!(view.overall, Tally { completed: 10, total: 12 });
    }

    #[test]
    fn test_short_day_ordinals() {
        assert_eq!(short_day(date(2026, 1, 1)), "Jan 1st");
        assert_eq!(short_day(date(2026, 3, 2)), "Mar 2nd");
        assert_eq!(short_day(date(2026, 5, 3)), "May 3rd");
        assert_eq!(short_day(date(2026, 6, 11)), "Jun 11th");
        assert_eq!(short_day(date(2026, 6, 12)), "Jun 12th");
        assert_eq!(short_day(date(2026, 6, 13)), "Jun 13th");
        assert_eq!(short_day(date(2026, 7, 22)), "Jul 22nd");
        assert_eq!(short_day(date(2026, 8, 31)), "Aug 31st");
    }

    #[test]
    fn test_behind_schedule_with_ten_days_left() {
        let view = DashboardView::build(&syllabus(), &four_of_ten(), date(2025, 12, 22));
        assert_eq!(view.days_remaining, 10);
        assert_eq!(view.mission.percentage, 40);
        assert_eq!(view.banner, Some(Banner::BehindSchedule));
        assert!(view.banner.is_some_and(Banner::is_warning));
    }

    #[test]
    fn test_no_banner_with_twenty_five_days_left() {
        let view = DashboardView::build(&syllabus(), &four_of_ten(), date(2025, 12, 7));
        assert_eq!(view.days_remaining, 25);
        assert_eq!(view.banner, None);
    }

    #[test]
    fn test_checklist_numbers_match_catalog_entries() {
        let syllabus = syllabus();
        let view = DashboardView::build(&syllabus, &four_of_ten(), date(2025, 12, 1));

        let numbered: Vec<(usize, String)> = view
            .sections
            .iter()
            .flat_map(|s| &s.tiers)
            .flat_map(|t| &t.chapters)
            .flat_map(|c| &c.items)
            .map(|item| (item.number, item.name.clone()))
            .collect();
        let expected: Vec<(usize, String)> = syllabus
            .catalog
            .entries()
            .map(|e| (e.number, e.concept.to_string()))
            .collect();
        assert_eq!(numbered, expected);

        let a = view.section("a").unwrap();
        assert_eq!(a.tiers[0].priority, Priority::High);
        assert_eq!(a.tiers[0].chapters[0].tally, Tally { completed: 2, total: 5 });
        assert!(a.tiers[0].chapters[0].items[0].done);
        assert!(!a.tiers[1].chapters[0].items[0].done);
    }

    #[test]
    fn test_badges_in_catalog_order() {
        let view = DashboardView::build(&syllabus(), &four_of_ten(), date(2025, 12, 1));
        let badges: Vec<(&str, u8)> = view
            .badges
            .iter()
            .map(|b| (b.name.as_str(), b.percentage))
            .collect();
        assert_eq!(badges, [("A", 33), ("B", 40), ("C", 0)]);
    }

    #[test]
    fn test_countdown_wording() {
        let syllabus = syllabus();
        let record = ProgressRecord::new();
        let view = |d| DashboardView::build(&syllabus, &record, d).countdown();

        assert_eq!(view(date(2025, 12, 31)), "1 day");
        assert_eq!(view(date(2026, 1, 1)), "today");
        assert_eq!(view(date(2026, 1, 4)), "3 days ago");
        assert_eq!(view(date(2025, 12, 2)), "30 days");
    }
}
