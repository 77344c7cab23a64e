use thiserror::Error;

use crate::records::{Asset, Student};

/// Failure of the backing directory store.
///
/// Lookups that succeed but find nothing return `Ok(None)`; this error is
/// reserved for infrastructure faults, which abort the gate call instead
/// of producing a BLOCKED decision.
#[derive(Error, Debug)]
#[error("directory lookup failed: {reason}")]
pub struct DirectoryError {
    /// Backend-specific failure description.
    pub reason: String,
}

impl DirectoryError {
    /// Creates a directory error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Read access to student and asset records.
///
/// The core consumes, never owns, these records; writes (registration,
/// reassignment, revocation) happen behind this seam.
pub trait Directory {
    /// Looks up a student by id.
    fn student(&self, student_id: &str) -> Result<Option<Student>, DirectoryError>;

    /// Looks up an asset by id.
    fn asset(&self, asset_id: u64) -> Result<Option<Asset>, DirectoryError>;

    /// Lists the currently-active assets registered to a student.
    fn active_assets_owned_by(&self, student_id: &str) -> Result<Vec<Asset>, DirectoryError>;
}

impl<T: Directory + ?Sized> Directory for &T {
    fn student(&self, student_id: &str) -> Result<Option<Student>, DirectoryError> {
        (**self).student(student_id)
    }

    fn asset(&self, asset_id: u64) -> Result<Option<Asset>, DirectoryError> {
        (**self).asset(asset_id)
    }

    fn active_assets_owned_by(&self, student_id: &str) -> Result<Vec<Asset>, DirectoryError> {
        (**self).active_assets_owned_by(student_id)
    }
}
