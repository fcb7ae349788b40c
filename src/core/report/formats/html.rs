//! HTML report generator
//!
//! Generates a self-contained dashboard page with embedded CSS. Chapters are
//! `<details>` blocks; High Priority ones start open, Low Priority ones
//! start collapsed.

use crate::core::dashboard::DashboardView;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

/// Page model handed to the `dashboard.html` template
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    view: &'a DashboardView,
    countdown: String,
    goal_caption: String,
    mission_heading: String,
    has_banner: bool,
    banner_class: &'static str,
    banner_text: String,
    checklist: bool,
}

impl<'a> DashboardPage<'a> {
    fn from_context(ctx: &ReportContext<'a>) -> Self {
        let view = ctx.view;
        let banner_class = match view.banner {
            Some(banner) if banner.is_warning() => "warning",
            Some(_) => "success",
            None => "",
        };
        let banner_text = view.banner_text().unwrap_or_default();
        Self {
            view,
            countdown: view.countdown(),
            goal_caption: ctx.goal_caption(),
            mission_heading: format!(
                "{} High Priority Target",
                view.mission_subjects.join("/")
            ),
            has_banner: view.banner.is_some(),
            banner_class,
            banner_text,
            checklist: ctx.checklist,
        }
    }
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(DashboardPage::from_context(ctx).render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::progress::ProgressRecord;
    use crate::core::syllabus::Syllabus;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn view(done: &[usize], today: NaiveDate) -> DashboardView {
        let syllabus = Syllabus::builtin().unwrap();
        let mut record = ProgressRecord::new();
        for &n in done {
            record.set(syllabus.catalog.entry_by_number(n).unwrap().key(), true);
        }
        DashboardView::build(&syllabus, &record, today)
    }

    #[test]
    fn test_html_page_contains_dashboard_parts() {
        let view = view(&[2], NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());
        let html = HtmlReporter::new()
            .render(&ReportContext::new(&view, true))
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>CHSE Odisha 12th: Mission Jan 1st</title>"));
        assert!(html.contains("7 days"));
        assert!(html.contains("class=\"banner warning\""));
        assert!(html.contains("Physics Tracker (4%)"));
        assert!(html.contains("<li class=\"done\">"));
        assert!(html.contains("<details open>"));
        assert!(html.contains("<details>"));
    }

    #[test]
    fn test_summary_page_has_no_checklist_or_banner() {
        let view = view(&[], NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        let html = HtmlReporter::new()
            .render(&ReportContext::new(&view, false))
            .unwrap();

        assert!(!html.contains("<details"));
        assert!(!html.contains("class=\"banner"));
        assert!(html.contains("Subject Wise Progress"));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("dashboard.html");
        let view = view(&[], NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());

        HtmlReporter::new()
            .generate(&ReportContext::new(&view, true), &path)
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Mathematics"));
    }
}
