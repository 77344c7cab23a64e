use thiserror::Error;

use crate::audit::AuditError;
use crate::directory::DirectoryError;

/// Infrastructure failures that abort a gate call.
///
/// Distinct from a BLOCKED decision: when one of these occurs no terminal
/// outcome exists and nothing was (reliably) logged, so the transport
/// layer must report an internal failure rather than a verdict.
#[derive(Error, Debug)]
pub enum GateError {
    /// The directory backend failed mid-decision.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
    /// The audit entry could not be durably written; the decision is
    /// withheld (log-then-respond).
    #[error("audit logging failed: {0}")]
    Logging(#[from] AuditError),
}
