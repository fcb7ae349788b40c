//! Markdown report generator
//!
//! Generates the dashboard as Markdown with GitHub task-list checkboxes, so
//! the checklist renders as ticked boxes in GitHub, GitLab, and VS Code.

use crate::core::dashboard::SubjectSection;
use crate::core::report::{progress_bar, ReportContext, ReportGenerator, BAR_WIDTH};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let view = ctx.view;
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{title}}", &view.title);
        output = output.replace("{{countdown}}", &view.countdown());
        output = output.replace("{{goal_caption}}", &ctx.goal_caption());
        output = output.replace("{{today}}", &view.today.to_string());

        let heading = format!("{} High Priority Target", view.mission_subjects.join("/"));
        output = output.replace("{{mission_heading}}", &heading);
        output = output.replace(
            "{{mission_percentage}}",
            &view.mission.percentage.to_string(),
        );
        output = output.replace(
            "{{mission_bar}}",
            &progress_bar(view.mission.percentage, BAR_WIDTH),
        );
        output = output.replace(
            "{{mission_completed}}",
            &view.mission.completed.to_string(),
        );
        output = output.replace("{{mission_total}}", &view.mission.total.to_string());

        let banner = match (view.banner, view.banner_text()) {
            (Some(banner), Some(text)) => {
                let icon = if banner.is_warning() { "⚠️" } else { "🎉" };
                format!("> **{icon} {text}**")
            }
            _ => String::new(),
        };
        output = output.replace("{{banner}}", &banner);

        output = output.replace("{{subject_badges}}", &Self::generate_badge_table(ctx));

        let checklist = if ctx.checklist {
            view.sections
                .iter()
                .map(Self::generate_section)
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            String::new()
        };
        output = output.replace("{{checklist}}", &checklist);

        output
    }

    /// Generate the subject percentage table
    fn generate_badge_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        table.push_str("| Subject | Progress | Done |\n");
        table.push_str("|---|---|---|\n");
        for badge in &ctx.view.badges {
            let _ = writeln!(
                table,
                "| {} | {}% | {}/{} |",
                badge.name, badge.percentage, badge.tally.completed, badge.tally.total
            );
        }
        table
    }

    /// Generate one subject's checklist
    fn generate_section(section: &SubjectSection) -> String {
        let mut md = String::new();
        let _ = writeln!(md, "## {} Tracker ({}%)\n", section.name, section.percentage);

        for tier in &section.tiers {
            let _ = writeln!(
                md,
                "### {} ({}): {}/{}\n",
                tier.priority,
                tier.priority.hint(),
                tier.tally.completed,
                tier.tally.total
            );
            for chapter in &tier.chapters {
                let _ = writeln!(
                    md,
                    "**{}** ({}/{})\n",
                    chapter.name, chapter.tally.completed, chapter.tally.total
                );
                for item in &chapter.items {
                    let mark = if item.done { 'x' } else { ' ' };
                    let _ = writeln!(md, "- [{mark}] {}. {}", item.number, item.name);
                }
                md.push('\n');
            }
        }
        md
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
