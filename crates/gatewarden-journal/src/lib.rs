//! Append-only audit journal format for Gatewarden exit decisions.
//!
//! This crate provides:
//! - Framed, append-only storage for exit log entries (`.gwa` files)
//! - Reader/writer APIs with strict and permissive read modes
//! - Durable-by-default appends (fsync before an append reports success)
//!
//! The gate workflow's log-then-respond invariant leans on the writer: a
//! decision is only reported to the operator after `append_entry` returns,
//! and with the default options that means the entry hit the disk.
//!
//! ## Quick Start
//!
//! ```rust
//! use gatewarden_core::{ExitLogEntry, ExitResult};
//! use gatewarden_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("exits.gwa");
//!
//! let entry = ExitLogEntry {
//!     timestamp: 1_700_000_000,
//!     student_id: "DBU1401234".to_string(),
//!     asset_id: Some(1),
//!     operator_id: "op-1".to_string(),
//!     result: ExitResult::Allowed,
//!     reason: "Exit verified successfully".to_string(),
//! };
//!
//! let mut writer = JournalWriter::open(&path, WriteOptions::default())?;
//! writer.append_entry(&entry)?;
//! writer.finish()?;
//!
//! let mut reader = JournalReader::open(&path, ReadMode::Strict)?;
//! while let Some(entry) = reader.read_entry()? {
//!     println!("{} {}", entry.result, entry.reason);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// Error types for journal operations.
pub mod errors;
/// Frame structure and serialization.
pub mod frame;
/// Journal reader implementation.
pub mod reader;
/// Journal writer implementation.
pub mod writer;

pub use errors::JournalError;
pub use frame::{FrameKind, JournalHeader, RecordFrame};
pub use reader::{JournalReader, ReadMode};
pub use writer::{JournalWriter, WriteOptions};
