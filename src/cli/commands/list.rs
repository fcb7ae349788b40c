//! List command handler

use super::{fail, open_tracker, today};
use study_tracker::config::Config;
use study_tracker::core::report::TextReporter;

/// Print the numbered checklist, optionally for one subject
pub fn run(subject: Option<&str>, config: &Config) {
    let tracker = open_tracker(config).unwrap_or_else(|e| fail(&e));
    let view = tracker.view(today());
    let reporter = subject.map_or_else(TextReporter::new, TextReporter::for_subject);

    match reporter.render_checklist(&view) {
        Ok(text) => print!("{text}"),
        Err(e) => fail(&format!("✗ {e}")),
    }
}
