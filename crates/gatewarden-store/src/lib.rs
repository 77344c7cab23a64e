//! Directory and audit sink backends for Gatewarden.
//!
//! This crate provides:
//! - `JournalAuditLog`: the production `AuditSink`, backed by the
//!   append-only `gatewarden-journal` format
//! - `MemoryDirectory` and `MemoryAuditLog`: in-memory backends for the
//!   CLI fixture file and for tests
//! - `DirectoryFile`: the on-disk JSON fixture consumed by the CLI
//! - A filter API for selective iteration over audit entries
//!
//! The journal backend is the reference implementation; the traits it
//! implements live in `gatewarden-core` so the workflow never depends on
//! a concrete store.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Audit entry filtering API.
pub mod filter;
/// Journal-backed audit sink.
pub mod journal;
/// In-memory directory and audit backends.
pub mod memory;

pub use error::StoreError;
pub use filter::{
    AndFilter, FilteredLogReader, LogFilter, OperatorFilter, ResultFilter, StudentFilter,
    TimeRangeFilter,
};
pub use gatewarden_journal::{JournalReader, ReadMode, WriteOptions};
pub use journal::JournalAuditLog;
pub use memory::{DirectoryFile, MemoryAuditLog, MemoryDirectory};
