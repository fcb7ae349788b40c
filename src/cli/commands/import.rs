//! Import command handler
//!
//! Reads a flat `"Subject_Chapter_Concept": bool` file and merges it into
//! the nested progress store. A store still in the flat format is converted
//! on the way, whether or not it is the file being imported.

use super::{fail, load_syllabus};
use std::fs;
use std::path::Path;
use study_tracker::config::Config;
use study_tracker::core::progress::{LegacyProgress, ProgressStore};
use study_tracker::core::tracker::{ImportSummary, Tracker};

/// Import a legacy progress file
pub fn run(file: &Path, config: &Config) {
    let content = fs::read_to_string(file)
        .unwrap_or_else(|e| fail(&format!("✗ Failed to read {}: {e}", file.display())));
    let legacy: LegacyProgress = serde_json::from_str(&content).unwrap_or_else(|e| {
        fail(&format!(
            "✗ {} is not a flat progress file: {e}",
            file.display()
        ))
    });

    let syllabus = load_syllabus(config).unwrap_or_else(|e| fail(&e));
    let store = ProgressStore::new(config.progress_path());

    let (mut tracker, converted) =
        Tracker::open_for_import(syllabus, store).unwrap_or_else(|e| fail(&format!("✗ {e}")));

    let summary = tracker
        .import_legacy(&legacy)
        .unwrap_or_else(|e| fail(&format!("✗ {e}")));

    let target = tracker.store().path().display().to_string();
    if let Some(converted) = converted {
        println!(
            "✓ Converted {} entries already in {target} to the nested format",
            converted.imported
        );
        print_skipped(&converted);
    }
    println!("✓ Imported {} entries into {target}", summary.imported);
    print_skipped(&summary);
}

fn print_skipped(summary: &ImportSummary) {
    if !summary.unmatched.is_empty() {
        println!("  Skipped {} keys not in the syllabus:", summary.unmatched.len());
        for key in &summary.unmatched {
            println!("    {key}");
        }
    }
    if !summary.ambiguous.is_empty() {
        println!(
            "  Skipped {} keys matching more than one concept:",
            summary.ambiguous.len()
        );
        for key in &summary.ambiguous {
            println!("    {key}");
        }
    }
}
