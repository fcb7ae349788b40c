//! Status command handler

use super::{fail, open_tracker, today};
use study_tracker::config::Config;
use study_tracker::core::report::{ReportContext, TextReporter};

/// Print the dashboard summary
pub fn run(config: &Config) {
    let tracker = open_tracker(config).unwrap_or_else(|e| fail(&e));
    let view = tracker.view(today());
    print!("{}", TextReporter::render_summary(&ReportContext::new(&view, false)));
}
