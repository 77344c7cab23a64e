//! Logs command: list audit journal entries with filters.

use gatewarden_core::ExitResult;
use gatewarden_store::{
    AndFilter, FilteredLogReader, JournalReader, LogFilter, OperatorFilter, ReadMode,
    ResultFilter, StudentFilter, TimeRangeFilter,
};
use serde_json::json;

use crate::output::{format_json, format_table_row, print_table_header};

#[allow(clippy::too_many_arguments)]
pub fn run(
    journal: String,
    student: Option<String>,
    operator: Option<String>,
    result: Option<String>,
    since: Option<i64>,
    until: Option<i64>,
    limit: Option<usize>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut filters: Vec<Box<dyn LogFilter>> = Vec::new();
    if let Some(student_id) = student {
        filters.push(Box::new(StudentFilter { student_id }));
    }
    if let Some(operator_id) = operator {
        filters.push(Box::new(OperatorFilter { operator_id }));
    }
    if let Some(result) = result {
        let result = match result.to_uppercase().as_str() {
            "ALLOWED" => ExitResult::Allowed,
            "BLOCKED" => ExitResult::Blocked,
            other => return Err(format!("unknown result '{other}' (ALLOWED or BLOCKED)").into()),
        };
        filters.push(Box::new(ResultFilter { result }));
    }
    if since.is_some() || until.is_some() {
        filters.push(Box::new(TimeRangeFilter { since, until }));
    }

    // Permissive: a torn final append must not make the log unreadable.
    let reader = JournalReader::open(&journal, ReadMode::Permissive)
        .map_err(|e| format!("Failed to open journal: {}", e))?;
    let mut filtered = FilteredLogReader::new(reader, AndFilter { filters });

    let max = limit.unwrap_or(usize::MAX);
    let mut entries = Vec::new();
    while entries.len() < max {
        match filtered.read_entry()? {
            Some(entry) => entries.push(entry),
            None => break,
        }
    }

    if json_output {
        println!("{}", format_json(&json!({ "logs": entries })));
    } else {
        print_table_header();
        for entry in &entries {
            println!("{}", format_table_row(entry));
        }
        println!("{} entries", entries.len());
    }

    Ok(())
}
