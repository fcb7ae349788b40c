//! Integration tests for logger behavior.

use study_tracker::logger::{current_level, init_file_logging, set_level, set_level_from_str, Level};
use study_tracker::{debug, error, info, warn};
use tempfile::TempDir;

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("DEBUG"));
    assert_eq!(current_level(), Level::Debug);
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[test]
fn file_logging_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs").join("studytracker.log");

    init_file_logging(&path).expect("log file should open");
    error!("written to file");

    assert!(path.exists());
}
