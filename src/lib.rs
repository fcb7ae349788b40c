//! Library for `studytracker`, a personal study-progress tracker.
//!
//! The static syllabus catalog, the persisted progress store, the metrics
//! engine and the dashboard view model live in [`core`]; the CLI binary is a
//! thin interaction surface over them.

pub mod core;
pub mod logger;

pub use core::config;
pub use core::get_version;
