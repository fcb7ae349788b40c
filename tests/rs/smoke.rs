//! Integration smoke tests for `study_tracker`

use study_tracker::core::syllabus::Syllabus;
use study_tracker::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn builtin_syllabus_loads() {
    let syllabus = Syllabus::builtin().expect("built-in syllabus should parse");
    assert_eq!(syllabus.catalog.subjects().len(), 5);
    assert!(syllabus.catalog.concept_count() > 0);
}
