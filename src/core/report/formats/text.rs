//! Plain-text renderer used by the terminal front end

use crate::core::dashboard::{DashboardView, SubjectSection};
use crate::core::report::{progress_bar, ReportContext, ReportGenerator, BAR_WIDTH};
use std::error::Error;
use std::fmt::Write;

/// Plain-text dashboard renderer
#[derive(Debug, Clone, Default)]
pub struct TextReporter {
    subject: Option<String>,
}

impl TextReporter {
    /// Renderer for the whole checklist
    #[must_use]
    pub const fn new() -> Self {
        Self { subject: None }
    }

    /// Renderer whose checklist shows only one subject
    #[must_use]
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
        }
    }

    /// Header, countdown, mission bar, banner and subject badges
    #[must_use]
    pub fn render_summary(ctx: &ReportContext) -> String {
        let view = ctx.view;
        let mut out = String::new();

        let _ = writeln!(out, "{}", view.title);
        let _ = writeln!(out, "{}", "=".repeat(view.title.chars().count()));
        let _ = writeln!(out, "Days remaining: {}", view.countdown());
        let _ = writeln!(out, "Target: {}", ctx.goal_caption());
        out.push('\n');

        let _ = writeln!(
            out,
            "Mission ({}, High Priority): {}/{} concepts",
            view.mission_subjects.join(", "),
            view.mission.completed,
            view.mission.total
        );
        let _ = writeln!(
            out,
            "{} {}%",
            progress_bar(view.mission.percentage, BAR_WIDTH),
            view.mission.percentage
        );
        if let (Some(banner), Some(text)) = (view.banner, view.banner_text()) {
            let marker = if banner.is_warning() { "!" } else { "*" };
            let _ = writeln!(out, "{marker} {text}");
        }
        out.push('\n');

        let _ = writeln!(out, "Subject progress");
        let width = view
            .badges
            .iter()
            .map(|b| b.name.chars().count())
            .max()
            .unwrap_or(0);
        for badge in &view.badges {
            let _ = writeln!(
                out,
                "  {:<width$}  {:>3}%  ({}/{})",
                badge.name, badge.percentage, badge.tally.completed, badge.tally.total
            );
        }
        let _ = writeln!(
            out,
            "  Overall: {}/{} concepts ({}%)",
            view.overall.completed,
            view.overall.total,
            view.overall.percentage()
        );
        out
    }

    /// Checklist of one subject, grouped by tier and chapter
    #[must_use]
    pub fn render_section(section: &SubjectSection) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ({}%) ==", section.name, section.percentage);

        for tier in &section.tiers {
            let _ = writeln!(
                out,
                "  {} ({}) {}/{}",
                tier.priority,
                tier.priority.hint(),
                tier.tally.completed,
                tier.tally.total
            );
            for chapter in &tier.chapters {
                let done = if chapter.tally.is_complete() { " ✓" } else { "" };
                let _ = writeln!(
                    out,
                    "    {} {}/{}{done}",
                    chapter.name, chapter.tally.completed, chapter.tally.total
                );
                for item in &chapter.items {
                    let mark = if item.done { 'x' } else { ' ' };
                    let _ = writeln!(out, "      [{mark}] {:>3}. {}", item.number, item.name);
                }
            }
        }
        out
    }

    /// Checklist for the selected subject, or every subject
    ///
    /// # Errors
    /// Returns an error naming the available subjects if the selected one does not exist.
    pub fn render_checklist(&self, view: &DashboardView) -> Result<String, String> {
        match &self.subject {
            Some(name) => view.section(name).map(Self::render_section).ok_or_else(|| {
                let names: Vec<&str> = view.sections.iter().map(|s| s.name.as_str()).collect();
                format!(
                    "Unknown subject '{name}'. Available: {}",
                    names.join(", ")
                )
            }),
            None => Ok(view
                .sections
                .iter()
                .map(Self::render_section)
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let mut out = Self::render_summary(ctx);
        if ctx.checklist {
            out.push('\n');
            out.push_str(&self.render_checklist(ctx.view)?);
        }
        Ok(out)
    }
}
