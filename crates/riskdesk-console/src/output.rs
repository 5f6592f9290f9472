//! Terminal rendering for console commands
//!
//! Status lines carry a coloured marker: confirmations and notes go to
//! stdout, failures and warnings to stderr so `--format json` output can be
//! piped. Lists render as rounded tables or pretty JSON.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use riskdesk_core::{FlagLevel, Transaction};
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

use crate::config::OutputFormat;

fn status_line(marker: ColoredString, message: impl Display, to_stderr: bool) {
    if to_stderr {
        eprintln!("{} {}", marker, message);
    } else {
        println!("{} {}", marker, message);
    }
}

/// Confirmation, e.g. "Rule created successfully!"
pub fn success(message: impl Display) {
    status_line("✓".green(), message, false);
}

/// Failure reported by a view or the backend
pub fn error(message: impl Display) {
    status_line("✗".red(), message, true);
}

pub fn warning(message: impl Display) {
    status_line("!".yellow(), message, true);
}

/// Neutral note such as a page counter
pub fn info(message: impl Display) {
    status_line("ℹ".blue(), message, false);
}

/// Rows as a table or as a JSON array, per `--format`
pub fn print_data<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Json => print_json(rows),
    }
}

/// Pretty JSON on stdout; a serialization failure becomes an error line
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error(format!("Could not encode output as JSON: {}", e)),
    }
}

/// Rounded table; an empty list prints a note instead of an empty frame
pub fn print_table<T: Tabled>(rows: &[T]) {
    if rows.is_empty() {
        info("Nothing to show");
        return;
    }
    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// `Label: value` line for record details
pub fn kv(key: impl Display, value: impl Display) {
    println!("{}: {}", key.to_string().bold(), value);
}

/// Bold underlined heading above a detail block
pub fn section(title: impl Display) {
    println!("\n{}", title.to_string().bold().underline());
}

/// Flag level colored by severity
pub fn flag(level: FlagLevel) -> ColoredString {
    match level {
        FlagLevel::High => level.as_str().red().bold(),
        FlagLevel::Medium => level.as_str().yellow(),
        FlagLevel::Low => level.as_str().green(),
        FlagLevel::Unknown => level.as_str().dimmed(),
    }
}

pub fn active(is_active: bool) -> ColoredString {
    if is_active {
        "active".green()
    } else {
        "inactive".dimmed()
    }
}

/// Shorten `text` to at most `max` characters, marking the cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Format a money amount with two decimals
pub fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Transaction time in UTC, or the raw text when it does not parse
pub fn trans_time(transaction: &Transaction) -> String {
    transaction
        .timestamp()
        .map(|ts: DateTime<Utc>| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| transaction.trans_time.clone())
}
