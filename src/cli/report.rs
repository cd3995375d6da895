//! Output formatting for CLI commands.
//!
//! Answers are printed to stdout as pretty JSON so they stay pipeable;
//! everything human-facing (marks, not-found notes) goes to stderr or is
//! colored, and `NO_COLOR` is honored via `colored`.

use std::io::{self, Write};

use colored::Colorize;
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use crate::core::SourceStatus;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print_answer(answer: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(answer)?);
    Ok(())
}

pub fn print_not_found(key: &str) {
    eprintln!(
        "{} {}",
        FAILURE_MARK.red(),
        format!("no data source provides '{}'", key).red()
    );
}

/// Print the enumerated data sources with existence marks.
pub fn print_sources(statuses: &[SourceStatus]) {
    print_sources_to(statuses, &mut io::stdout().lock());
}

/// Print sources to a custom writer. Useful for testing.
pub fn print_sources_to<W: Write>(statuses: &[SourceStatus], writer: &mut W) {
    if statuses.is_empty() {
        let _ = writeln!(writer, "No data sources for this scope.");
        return;
    }

    let max_width = statuses
        .iter()
        .map(|status| status.source.width())
        .max()
        .unwrap_or(0);

    for status in statuses {
        let mark = if status.exists {
            SUCCESS_MARK.green()
        } else {
            FAILURE_MARK.red()
        };
        let padding = " ".repeat(max_width - status.source.width());
        let path = status.path.display().to_string();
        let path = if status.exists {
            path.normal()
        } else {
            format!("{path} (not found)").dimmed()
        };
        let _ = writeln!(writer, "{} {}{}  {}", mark, status.source, padding, path);
    }
}
