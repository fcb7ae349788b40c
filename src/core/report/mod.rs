//! Dashboard rendering
//!
//! Renders a [`DashboardView`] as plain text for the terminal, as Markdown,
//! or as a self-contained HTML page.

pub mod formats;

use crate::core::dashboard::DashboardView;
use std::error::Error;
use std::fs;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat, TextReporter};

/// Width of the mission progress bar in text-based formats
pub const BAR_WIDTH: usize = 30;

/// Data context for report generation
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Dashboard to render
    pub view: &'a DashboardView,
    /// Include the concept checklist, not just the summary
    pub checklist: bool,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(view: &'a DashboardView, checklist: bool) -> Self {
        Self { view, checklist }
    }

    /// Goal caption, e.g. "Finish ALL High Priority PCM Chapters by 2026-01-01"
    #[must_use]
    pub fn goal_caption(&self) -> String {
        let goal = if self.view.goal.is_empty() {
            format!(
                "Finish the High Priority chapters of {}",
                self.view.mission_subjects.join(", ")
            )
        } else {
            self.view.goal.clone()
        };
        format!("{goal} by {}", self.view.target_date.format("%b %-d, %Y"))
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Text progress bar, e.g. `[#########---------------------]`
#[must_use]
pub fn progress_bar(percentage: u8, width: usize) -> String {
    let filled = width * usize::from(percentage.min(100)) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_edges() {
        assert_eq!(progress_bar(0, 4), "[----]");
        assert_eq!(progress_bar(50, 4), "[##--]");
        assert_eq!(progress_bar(100, 4), "[####]");
        assert_eq!(progress_bar(33, 10), "[###-------]");
    }
}
