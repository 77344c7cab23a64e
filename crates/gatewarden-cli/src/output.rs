//! Output formatting utilities.

use chrono::{TimeZone, Utc};
use gatewarden_core::ExitLogEntry;
use serde_json::Value;

/// Formats a JSON value for terminal output.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Renders a Unix timestamp as RFC 3339 UTC.
pub fn format_timestamp(timestamp: i64) -> String {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Formats an audit entry as a table row.
pub fn format_table_row(entry: &ExitLogEntry) -> String {
    let asset = entry
        .asset_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<25} {:<12} {:<8} {:<6} {:<7} {}",
        truncate(&format_timestamp(entry.timestamp), 25),
        truncate(&entry.student_id, 12),
        truncate(&entry.operator_id, 8),
        asset,
        entry.result,
        entry.reason
    )
}

/// Prints the table header for audit entries.
pub fn print_table_header() {
    println!(
        "{:<25} {:<12} {:<8} {:<6} {:<7} {}",
        "TIMESTAMP", "STUDENT", "OPERATOR", "ASSET", "RESULT", "REASON"
    );
    println!("{}", "-".repeat(90));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
