//! Toggle command handler

use super::{fail, open_tracker, today};
use study_tracker::config::Config;
use study_tracker::core::models::ConceptKey;
use study_tracker::core::tracker::ToggleOutcome;

/// How the concept to toggle was chosen on the command line
pub enum Selection {
    /// Checklist number
    Number(usize),
    /// Full subject / chapter / concept names
    Key(ConceptKey),
}

/// Flip one concept and print the refreshed mission line
pub fn run(selection: Selection, config: &Config) {
    let mut tracker = open_tracker(config).unwrap_or_else(|e| fail(&e));
    let result = match selection {
        Selection::Number(number) => tracker.toggle_number(number, today()),
        Selection::Key(key) => tracker.toggle(&key, today()),
    };

    match result {
        Ok(outcome) => println!("{}", describe(&outcome)),
        Err(e) => fail(&format!("✗ {e}")),
    }
}

/// One-line confirmation of a toggle, followed by the banner if one applies
pub fn describe(outcome: &ToggleOutcome) -> String {
    let mark = if outcome.done { "✓ Done" } else { "○ Not done" };
    let view = &outcome.view;
    let mut line = format!(
        "{mark}: {}\n  Mission: {}/{} ({}%)",
        outcome.key, view.mission.completed, view.mission.total, view.mission.percentage
    );
    if let Some(text) = view.banner_text() {
        line.push_str(&format!("\n  {text}"));
    }
    line
}
