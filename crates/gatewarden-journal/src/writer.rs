//! Journal writer implementation.

use crate::errors::JournalError;
use crate::frame::{FrameKind, JournalHeader, RecordFrame};
use gatewarden_core::ExitLogEntry;
use std::fs::OpenOptions;
use std::io::{self, Read, Seek, Write};
use std::path::Path;

/// Options for journal writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each append (default: true). The gate
    /// workflow's log-then-respond invariant requires every append to be
    /// durable before the decision is reported; only turn this off for
    /// bulk imports or tests.
    pub sync: bool,
    /// Whether to create the file if it doesn't exist (default: true).
    pub create: bool,
    /// Whether to append to an existing file (default: true).
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: true,
            create: true,
            append: true,
        }
    }
}

/// Journal writer for append-only audit storage.
///
/// Appends exit log entries to a `.gwa` journal file in a framed,
/// append-only manner. Entries are stored as JSON objects within record
/// frames and are never rewritten or deleted by this crate.
///
/// # Example
///
/// ```no_run
/// use gatewarden_core::{ExitLogEntry, ExitResult};
/// use gatewarden_journal::{JournalWriter, WriteOptions};
///
/// let entry = ExitLogEntry {
///     timestamp: 1_700_000_000,
///     student_id: "DBU1401234".to_string(),
///     asset_id: None,
///     operator_id: "op-1".to_string(),
///     result: ExitResult::Blocked,
///     reason: "Student not found".to_string(),
/// };
///
/// let mut writer = JournalWriter::open("exits.gwa", WriteOptions::default())?;
/// writer.append_entry(&entry)?;
/// writer.finish()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalWriter {
    file: std::fs::File,
    sync: bool,
    header_written: bool,
}

impl JournalWriter {
    /// Opens or creates a journal file for writing.
    ///
    /// If the file doesn't exist and `options.create` is `true`, a new
    /// journal is created with a header. If the file exists, its header is
    /// validated and the writer is positioned at the end (if
    /// `options.append`) or the file is truncated back to the header.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] if the file cannot be opened/created, an
    /// existing file is not a valid journal, or it is non-empty but too
    /// small to hold a header.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let file = OpenOptions::new()
            .create(options.create)
            .write(true)
            .read(true)
            .open(path)?;

        let mut writer = Self {
            file,
            sync: options.sync,
            header_written: false,
        };

        // Empty file gets a fresh header; anything else must already be a
        // valid journal.
        let metadata = writer.file.metadata()?;
        if metadata.len() == 0 {
            writer.write_header()?;
        } else if metadata.len() < JournalHeader::HEADER_SIZE as u64 {
            return Err(JournalError::FileNotEmpty);
        } else {
            let mut header_bytes = [0u8; JournalHeader::HEADER_SIZE];
            writer.file.seek(io::SeekFrom::Start(0))?;
            writer.file.read_exact(&mut header_bytes)?;
            JournalHeader::from_bytes(&header_bytes)?;
            writer.header_written = true;
            if options.append {
                writer.file.seek(io::SeekFrom::End(0))?;
            } else {
                writer.file.seek(io::SeekFrom::Start(0))?;
                writer.file.set_len(JournalHeader::HEADER_SIZE as u64)?;
                writer
                    .file
                    .seek(io::SeekFrom::Start(JournalHeader::HEADER_SIZE as u64))?;
            }
        }

        Ok(writer)
    }

    fn write_header(&mut self) -> Result<(), JournalError> {
        let header = JournalHeader::new();
        self.file.write_all(&header.to_bytes())?;
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        self.header_written = true;
        Ok(())
    }

    /// Appends one exit log entry to the journal.
    ///
    /// The entry is serialized to JSON and written as an `EntryJson`
    /// frame. With `sync` enabled (the default) the entry is on disk when
    /// this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] if the header was never written, JSON
    /// serialization fails, or an I/O error occurs.
    pub fn append_entry(&mut self, entry: &ExitLogEntry) -> Result<(), JournalError> {
        let json_bytes = serde_json::to_vec(entry)?;
        self.append_raw(FrameKind::EntryJson, &json_bytes)
    }

    /// Appends a raw frame with the given kind and payload.
    pub fn append_raw(&mut self, kind: FrameKind, payload: &[u8]) -> Result<(), JournalError> {
        if !self.header_written {
            return Err(JournalError::InvalidHeader(
                "header not written".to_string(),
            ));
        }

        let frame = RecordFrame::new(kind, payload.len() as u32)?;

        self.file.write_all(&frame.to_bytes())?;
        self.file.write_all(payload)?;
        self.file.flush()?;

        if self.sync {
            self.file.sync_all()?;
        }

        Ok(())
    }

    /// Finishes writing and closes the file.
    pub fn finish(mut self) -> Result<(), JournalError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
        if self.sync {
            let _ = self.file.sync_all();
        }
    }
}
