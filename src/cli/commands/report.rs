//! Report command handler
//!
//! Writes the dashboard as text, Markdown or HTML.

use super::{fail, open_tracker, today};
use std::path::{Path, PathBuf};
use study_tracker::config::Config;
use study_tracker::core::report::{ReportContext, ReportFormat};

/// Run the report command.
///
/// # Arguments
/// * `format` - Output format
/// * `output_file` - Optional output path; defaults to `dashboard.<ext>` in the reports directory
/// * `checklist` - Include the per-concept checklist
/// * `config` - Configuration containing the default reports directory
pub fn run(format: ReportFormat, output_file: Option<&Path>, checklist: bool, config: &Config) {
    let tracker = open_tracker(config).unwrap_or_else(|e| fail(&e));
    let view = tracker.view(today());
    let output_path = output_file.map_or_else(
        || default_output_path(&config.reports_path(), format),
        Path::to_path_buf,
    );

    study_tracker::info!("Generating {format} report at {}", output_path.display());
    if let Err(e) = format
        .reporter()
        .generate(&ReportContext::new(&view, checklist), &output_path)
    {
        fail(&format!(
            "✗ Failed to write report {}: {e}",
            output_path.display()
        ));
    }
    println!("✓ Report generated: {}", output_path.display());
}

/// `<reports_dir>/dashboard.<ext>`
pub fn default_output_path(reports_dir: &Path, format: ReportFormat) -> PathBuf {
    reports_dir.join(format!("dashboard.{}", format.extension()))
}
