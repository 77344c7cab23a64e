use thiserror::Error;

use crate::records::ExitLogEntry;

/// Failure to durably record an audit entry.
///
/// Fatal to the gate call: a decision is never reported to the operator
/// unless its audit entry was written first.
#[derive(Error, Debug)]
#[error("audit log append failed: {reason}")]
pub struct AuditError {
    /// Backend-specific failure description.
    pub reason: String,
}

impl AuditError {
    /// Creates an audit error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Append-only sink for terminal gate decisions.
pub trait AuditSink {
    /// Appends one entry; must be durable before it returns `Ok`.
    fn append(&mut self, entry: &ExitLogEntry) -> Result<(), AuditError>;
}

impl<T: AuditSink + ?Sized> AuditSink for &mut T {
    fn append(&mut self, entry: &ExitLogEntry) -> Result<(), AuditError> {
        (**self).append(entry)
    }
}
