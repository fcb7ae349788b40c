//! CLI argument definitions for `studytracker`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use study_tracker::config::ConfigOverrides;
use study_tracker::core::report::ReportFormat;
use study_tracker::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to
/// `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Output format of the `report` command
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ReportFormatArg {
    /// Plain text
    #[value(alias = "txt")]
    Text,
    /// Markdown with task-list checkboxes
    #[value(alias = "md")]
    Markdown,
    /// Self-contained HTML page
    #[value(alias = "htm")]
    Html,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Text => Self::Text,
            ReportFormatArg::Markdown => Self::Markdown,
            ReportFormatArg::Html => Self::Html,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `progress_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show the countdown, mission progress and subject percentages.
    Status,
    /// Print the numbered concept checklist.
    ///
    /// Numbers shown here are accepted by `toggle` and inside `session`.
    List {
        /// Only list this subject (case-insensitive)
        #[arg(value_name = "SUBJECT")]
        subject: Option<String>,
    },
    /// Flip one concept between done and not done, then save.
    ///
    /// Select it by checklist NUMBER, or by --subject, --chapter and --concept.
    Toggle {
        /// Checklist number from `list`
        #[arg(
            value_name = "NUMBER",
            required_unless_present = "concept",
            conflicts_with_all = ["subject", "chapter", "concept"]
        )]
        number: Option<usize>,

        /// Subject name
        #[arg(long, requires_all = ["chapter", "concept"])]
        subject: Option<String>,

        /// Chapter name
        #[arg(long, requires_all = ["subject", "concept"])]
        chapter: Option<String>,

        /// Concept name
        #[arg(long, requires_all = ["subject", "chapter"])]
        concept: Option<String>,
    },
    /// Interactive session: type checklist numbers to toggle them.
    Session,
    /// Write the dashboard to a file.
    Report {
        /// Report format: text (txt), markdown (md) or html
        #[arg(short, long, value_enum, default_value_t = ReportFormatArg::Html)]
        format: ReportFormatArg,

        /// Output file path (optional; defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Leave out the per-concept checklist
        #[arg(long)]
        summary_only: bool,
    },
    /// Import a flat `"Subject_Chapter_Concept": true` progress file.
    Import {
        /// Path to the legacy JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "studytracker",
    about = "Track study progress against a syllabus and a dated mission",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Use this progress file instead of the configured one
    #[arg(long = "progress-file", value_name = "PATH")]
    pub progress_file: Option<PathBuf>,

    /// Write reports to this directory instead of the configured one
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Load the syllabus from this TOML file instead of the built-in one
    #[arg(long = "syllabus-file", value_name = "PATH")]
    pub syllabus_file: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            progress_file: self.progress_file.as_ref().map(path_string),
            reports_dir: self.reports_dir.as_ref().map(path_string),
            syllabus_file: self.syllabus_file.as_ref().map(path_string),
        }
    }
}
