//! CLI command handlers for `studytracker`.
//!
//! Each command is implemented in its own submodule. Handlers print their
//! result, report failures as `✗ ...` on stderr and exit with status 1.

pub mod config;
pub mod import;
pub mod list;
pub mod report;
pub mod session;
pub mod status;
pub mod toggle;

use chrono::{Local, NaiveDate};
use study_tracker::config::Config;
use study_tracker::core::progress::ProgressStore;
use study_tracker::core::syllabus::Syllabus;
use study_tracker::core::tracker::Tracker;

/// Local calendar date used for the countdown
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Load the configured syllabus
pub fn load_syllabus(config: &Config) -> Result<Syllabus, String> {
    let path = config.syllabus_path();
    Syllabus::load(path.as_deref()).map_err(|e| match &path {
        Some(path) => format!("✗ Failed to load syllabus {}: {e}", path.display()),
        None => format!("✗ Built-in syllabus is invalid: {e}"),
    })
}

/// Load the syllabus and the persisted progress record
pub fn open_tracker(config: &Config) -> Result<Tracker, String> {
    let syllabus = load_syllabus(config)?;
    let store = ProgressStore::new(config.progress_path());
    Tracker::open(syllabus, store).map_err(|e| format!("✗ {e}"))
}

/// Print `message` to stderr and exit with status 1
pub fn fail(message: &str) -> ! {
    study_tracker::error!("{message}");
    eprintln!("{message}");
    std::process::exit(1);
}
