//! Interactive session handler
//!
//! Reads one command per line: a checklist number toggles that concept and
//! prints the refreshed mission line. Every toggle is saved before the next
//! prompt is shown.

use super::toggle::describe;
use super::{fail, open_tracker, today};
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use study_tracker::config::Config;
use study_tracker::core::report::{ReportContext, TextReporter};
use study_tracker::core::tracker::Tracker;

const HELP: &str = "\
Commands:
  <number>        toggle that concept
  s, status       show the dashboard summary
  l, list [NAME]  show the checklist, optionally for one subject
  h, help         show this help
  q, quit         leave the session";

/// One parsed input line
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Toggle(usize),
    Status,
    List(Option<&'a str>),
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "s" | "status" => Self::Status,
            "l" | "list" => Self::List(Some(rest).filter(|r| !r.is_empty())),
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => word.parse().map_or(Self::Unknown(line), Self::Toggle),
        }
    }
}

/// Run the interactive session on stdin/stdout
pub fn run(config: &Config) {
    let mut tracker = open_tracker(config).unwrap_or_else(|e| fail(&e));
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = run_loop(&mut tracker, stdin.lock(), stdout.lock(), today) {
        fail(&format!("✗ Session I/O failed: {e}"));
    }
}

/// Session loop over arbitrary input and output
///
/// Ends on `quit` or end of input. Errors from a single command are printed
/// and the session continues.
///
/// # Errors
/// Returns an error only if reading input or writing output fails.
pub fn run_loop<R, W, F>(
    tracker: &mut Tracker,
    input: R,
    mut out: W,
    today: F,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    F: Fn() -> NaiveDate,
{
    let view = tracker.view(today());
    write!(out, "{}", TextReporter::render_summary(&ReportContext::new(&view, false)))?;
    writeln!(out, "\nType a checklist number to toggle it, 'h' for help.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };

        match Input::parse(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::Help => writeln!(out, "{HELP}")?,
            Input::Status => {
                let view = tracker.view(today());
                write!(out, "{}", TextReporter::render_summary(&ReportContext::new(&view, false)))?;
            }
            Input::List(subject) => {
                let view = tracker.view(today());
                let reporter = subject.map_or_else(TextReporter::new, TextReporter::for_subject);
                match reporter.render_checklist(&view) {
                    Ok(text) => write!(out, "{text}")?,
                    Err(e) => writeln!(out, "✗ {e}")?,
                }
            }
            Input::Toggle(number) => match tracker.toggle_number(number, today()) {
                Ok(outcome) => writeln!(out, "{}", describe(&outcome))?,
                Err(e) => writeln!(out, "✗ {e}")?,
            },
            Input::Unknown(text) => writeln!(out, "✗ Unknown command '{text}'; 'h' for help")?,
        }
    }

    study_tracker::debug!("Session ended with {} stored entries", tracker.record().len());
    Ok(())
}
