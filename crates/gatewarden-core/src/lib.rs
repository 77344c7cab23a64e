//! Gate exit verification core for Gatewarden.
//!
//! This crate provides:
//! - Domain records (students, assets, operators, exit log entries)
//! - The asset QR signature scheme (long-lived, binds an asset's identity)
//! - The exit token scheme (short-lived, bridges the two gate calls)
//! - The gate workflow state machine producing ALLOWED/BLOCKED decisions
//! - The `Directory` and `AuditSink` seams to external storage
//!
//! Core invariants:
//! - The server is stateless between gate calls; the exit token is the
//!   session
//! - Every terminal decision writes exactly one audit entry before the
//!   outcome is returned (log-then-respond)
//! - Token and crypto failures are normalized to a BLOCKED outcome with a
//!   named reason; no internal detail reaches the operator
//!
#![deny(missing_docs)]

/// Audit sink seam and its error type.
pub mod audit;
/// Directory seam for student/asset lookups.
pub mod directory;
/// Error types for workflow orchestration.
pub mod errors;
/// Exit token scheme: issue and verify.
pub mod exit_token;
/// Identifier format validation.
pub mod identifiers;
/// Asset QR signature scheme: issue and verify.
pub mod qr;
/// Domain records shared across the workspace.
pub mod records;
/// Gate workflow state machine.
pub mod workflow;

pub use audit::{AuditError, AuditSink};
pub use directory::{Directory, DirectoryError};
pub use errors::GateError;
pub use exit_token::{
    issue_exit_token, verify_exit_token, ExitClaims, ExitTokenError, EXIT_TOKEN_FIELD_COUNT,
};
pub use identifiers::{is_valid_serial_number, is_valid_student_id};
pub use qr::{issue_qr_signature, verify_qr_signature, QrVerifyError, QR_FIELD_COUNT};
pub use records::{
    Asset, AssetStatus, ExitLogEntry, ExitResult, Operator, OperatorRole, Student, StudentStatus,
};
pub use workflow::{AssetScan, GateConfig, GateWorkflow, NoAssetExit, StudentScan};

// Re-export the token primitives that appear in this crate's public API.
pub use gatewarden_token::{Clock, ExitSecret, FixedClock, QrSecret, SystemClock, TokenError};
