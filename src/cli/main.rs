//! Command-line interface entry point for `studytracker`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::toggle::Selection;
use study_tracker::config::Config;
use study_tracker::core::models::ConceptKey;
use study_tracker::info;
use study_tracker::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        match init_file_logging(log_path) {
            Ok(()) => info!("File logging initialized at: {display_path}"),
            Err(e) => eprintln!("✗ Failed to initialize file logging at {display_path}: {e}"),
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Status => commands::status::run(&config),
        Command::List { subject } => commands::list::run(subject.as_deref(), &config),
        Command::Toggle {
            number,
            subject,
            chapter,
            concept,
        } => {
            let selection = match (number, subject, chapter, concept) {
                (Some(number), ..) => Selection::Number(number),
                (None, Some(subject), Some(chapter), Some(concept)) => {
                    Selection::Key(ConceptKey::new(subject, chapter, concept))
                }
                _ => commands::fail("✗ Give a checklist number or --subject, --chapter and --concept"),
            };
            commands::toggle::run(selection, &config);
        }
        Command::Session => commands::session::run(&config),
        Command::Report {
            format,
            output,
            summary_only,
        } => {
            commands::report::run(format.into(), output.as_deref(), !summary_only, &config);
        }
        Command::Import { file } => commands::import::run(&file, &config),
    }
}
