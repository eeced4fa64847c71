//! # Console Reports
//!
//! Formatting helpers for the boxed reports the subcommands print:
//! heavy and light rules, a centered title, aligned label/value rows,
//! and the domain value formats (STRG amounts, lock windows, unlock
//! timestamps). Reports go to stdout; diagnostics go to the logger.

use chrono::{DateTime, Utc};

use crate::amount::format_strg;
use strongroom_vault::params::SECS_PER_DAY;

/// Width of the report rules, matching the label column layout below.
const RULE_WIDTH: usize = 43;

/// Print the heavy rule that opens and closes a report.
pub fn heavy_rule() {
    println!("{}", "═".repeat(RULE_WIDTH));
}

/// Print the light rule that separates report sections.
pub fn light_rule() {
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a report header: heavy rule, indented title, heavy rule.
pub fn title(text: &str) {
    heavy_rule();
    println!("         {}", text);
    heavy_rule();
}

/// Print one aligned `label : value` row.
pub fn kv(label: &str, value: impl std::fmt::Display) {
    println!("{:<14}: {}", label, value);
}

/// A grain amount as STRG, e.g. `1.5 STRG`.
pub fn strg(grains: u64) -> String {
    format!("{} STRG", format_strg(grains))
}

/// A grain amount with both denominations, e.g.
/// `1500000000 grains (1.5 STRG)`.
pub fn grains_and_strg(grains: u64) -> String {
    format!("{} grains ({} STRG)", grains, format_strg(grains))
}

/// A lock window as days and hours, e.g. `4d 0h (345600 seconds)`.
pub fn lock_window(secs: i64) -> String {
    let days = secs / SECS_PER_DAY;
    let hours = (secs % SECS_PER_DAY) / 3_600;
    format!("{}d {}h ({} seconds)", days, hours, secs)
}

/// A unix timestamp as a UTC datetime, or the raw number if it is out
/// of chrono's range.
pub fn timestamp(unix: i64) -> String {
    match DateTime::<Utc>::from_timestamp(unix, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => unix.to_string(),
    }
}
