//! Core module: syllabus, progress persistence, metrics and reporting

pub mod config;
pub mod dashboard;
pub mod metrics;
pub mod models;
pub mod progress;
pub mod report;
pub mod syllabus;
pub mod tracker;

/// Returns the current version of the `study-tracker` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
