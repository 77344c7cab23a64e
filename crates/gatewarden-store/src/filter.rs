//! Audit entry filtering API for selective iteration.

use gatewarden_core::{ExitLogEntry, ExitResult};
use gatewarden_journal::JournalReader;

use crate::error::StoreError;

/// Trait for filtering audit entries during iteration.
pub trait LogFilter {
    /// Returns true if the entry matches the filter criteria.
    fn matches(&self, entry: &ExitLogEntry) -> bool;
}

/// Filter by student id (exact match).
#[derive(Debug, Clone)]
pub struct StudentFilter {
    /// Student id to match.
    pub student_id: String,
}

impl LogFilter for StudentFilter {
    fn matches(&self, entry: &ExitLogEntry) -> bool {
        entry.student_id == self.student_id
    }
}

/// Filter by operator id (exact match).
#[derive(Debug, Clone)]
pub struct OperatorFilter {
    /// Operator id to match.
    pub operator_id: String,
}

impl LogFilter for OperatorFilter {
    fn matches(&self, entry: &ExitLogEntry) -> bool {
        entry.operator_id == self.operator_id
    }
}

/// Filter by decision result.
#[derive(Debug, Clone)]
pub struct ResultFilter {
    /// Result to match.
    pub result: ExitResult,
}

impl LogFilter for ResultFilter {
    fn matches(&self, entry: &ExitLogEntry) -> bool {
        entry.result == self.result
    }
}

/// Filter by decision time range. Both bounds are inclusive.
#[derive(Debug, Clone)]
pub struct TimeRangeFilter {
    /// Include entries at or after this Unix timestamp.
    pub since: Option<i64>,
    /// Include entries at or before this Unix timestamp.
    pub until: Option<i64>,
}

impl LogFilter for TimeRangeFilter {
    fn matches(&self, entry: &ExitLogEntry) -> bool {
        if let Some(since) = self.since {
            if entry.timestamp < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if entry.timestamp > until {
                return false;
            }
        }
        true
    }
}

/// Composite filter: all filters must match (AND). An empty filter list
/// matches everything.
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn LogFilter>>,
}

impl LogFilter for AndFilter {
    fn matches(&self, entry: &ExitLogEntry) -> bool {
        self.filters.iter().all(|f| f.matches(entry))
    }
}

/// Reader that yields only the journal entries matching a filter.
pub struct FilteredLogReader<F: LogFilter> {
    reader: JournalReader,
    filter: F,
}

impl<F: LogFilter> FilteredLogReader<F> {
    /// Creates a filtered reader over an open journal.
    pub fn new(reader: JournalReader, filter: F) -> Self {
        Self { reader, filter }
    }

    /// Reads the next matching entry, skipping non-matching ones.
    pub fn read_entry(&mut self) -> Result<Option<ExitLogEntry>, StoreError> {
        loop {
            match self.reader.read_entry()? {
                None => return Ok(None),
                Some(entry) if self.filter.matches(&entry) => return Ok(Some(entry)),
                Some(_) => continue,
            }
        }
    }
}
