//! Journal-backed audit sink.

use std::path::Path;

use gatewarden_core::{AuditError, AuditSink, ExitLogEntry};
use gatewarden_journal::{JournalWriter, WriteOptions};

use crate::error::StoreError;

/// The production [`AuditSink`]: every decision lands in an append-only
/// `.gwa` journal, fsynced before the append reports success.
pub struct JournalAuditLog {
    writer: JournalWriter,
}

impl JournalAuditLog {
    /// Opens (or creates) the audit journal at `path`.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, StoreError> {
        let writer = JournalWriter::open(path, options)?;
        Ok(Self { writer })
    }

    /// Finishes writing and closes the journal.
    pub fn finish(self) -> Result<(), StoreError> {
        self.writer.finish()?;
        Ok(())
    }
}

impl AuditSink for JournalAuditLog {
    fn append(&mut self, entry: &ExitLogEntry) -> Result<(), AuditError> {
        self.writer
            .append_entry(entry)
            .map_err(|e| AuditError::new(e.to_string()))
    }
}
