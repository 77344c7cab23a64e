//! In-memory directory and audit backends.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use gatewarden_core::{
    is_valid_serial_number, Asset, AssetStatus, AuditError, AuditSink, Directory, DirectoryError,
    ExitLogEntry, Operator, Student,
};

use crate::error::StoreError;

/// In-memory [`Directory`] backend.
///
/// Backs the CLI's fixture file and tests; the trait methods themselves
/// cannot fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    students: HashMap<String, Student>,
    assets: BTreeMap<u64, Asset>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a student record.
    pub fn insert_student(&mut self, student: Student) {
        self.students.insert(student.student_id.clone(), student);
    }

    /// Inserts or replaces an asset record.
    pub fn insert_asset(&mut self, asset: Asset) {
        self.assets.insert(asset.asset_id, asset);
    }

    /// Registers a new asset for a student, assigning the next free id.
    ///
    /// Rejects serial numbers shorter than the registration minimum and
    /// duplicates of an already-registered serial; the caller issues the
    /// QR signature afterwards and stores it with
    /// [`MemoryDirectory::set_qr_signature`].
    pub fn register_asset(
        &mut self,
        owner_student_id: &str,
        serial_number: &str,
        registered_at: i64,
    ) -> Result<Asset, StoreError> {
        let serial_number = serial_number.trim();
        if !is_valid_serial_number(serial_number) {
            return Err(StoreError::InvalidRecord {
                field: "serial_number",
                reason: "too short".to_string(),
            });
        }
        if self
            .assets
            .values()
            .any(|a| a.serial_number == serial_number)
        {
            return Err(StoreError::DuplicateSerial {
                serial_number: serial_number.to_string(),
            });
        }

        let asset_id = self.assets.keys().next_back().map_or(1, |max| max + 1);
        let asset = Asset {
            asset_id,
            owner_student_id: owner_student_id.to_string(),
            serial_number: serial_number.to_string(),
            brand: None,
            color: None,
            visible_specs: None,
            status: AssetStatus::Active,
            qr_signature: None,
            registered_at: Some(registered_at),
        };
        self.assets.insert(asset_id, asset.clone());
        Ok(asset)
    }

    /// Stores the issued QR signature on an asset record.
    ///
    /// Returns `false` if no such asset exists.
    pub fn set_qr_signature(&mut self, asset_id: u64, qr_signature: String) -> bool {
        match self.assets.get_mut(&asset_id) {
            Some(asset) => {
                asset.qr_signature = Some(qr_signature);
                true
            }
            None => false,
        }
    }
}

impl Directory for MemoryDirectory {
    fn student(&self, student_id: &str) -> Result<Option<Student>, DirectoryError> {
        Ok(self.students.get(student_id).cloned())
    }

    fn asset(&self, asset_id: u64) -> Result<Option<Asset>, DirectoryError> {
        Ok(self.assets.get(&asset_id).cloned())
    }

    fn active_assets_owned_by(&self, student_id: &str) -> Result<Vec<Asset>, DirectoryError> {
        Ok(self
            .assets
            .values()
            .filter(|a| a.owner_student_id == student_id && a.status == AssetStatus::Active)
            .cloned()
            .collect())
    }
}

/// In-memory [`AuditSink`] for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditLog {
    entries: Vec<ExitLogEntry>,
}

impl MemoryAuditLog {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries appended so far, in order.
    pub fn entries(&self) -> &[ExitLogEntry] {
        &self.entries
    }
}

impl AuditSink for MemoryAuditLog {
    fn append(&mut self, entry: &ExitLogEntry) -> Result<(), AuditError> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

/// On-disk JSON fixture standing in for the out-of-scope SQL store.
///
/// Consumed by the CLI: `students` and `assets` feed a
/// [`MemoryDirectory`]; `operators` feed the authorization boundary check
/// performed before the workflow is invoked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryFile {
    /// Student records.
    #[serde(default)]
    pub students: Vec<Student>,
    /// Asset records.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Operator accounts; empty means the boundary check is skipped.
    #[serde(default)]
    pub operators: Vec<Operator>,
}

impl DirectoryFile {
    /// Loads a fixture from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Writes the fixture back to a JSON file (pretty-printed).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Builds an in-memory directory from the student and asset records.
    pub fn to_directory(&self) -> MemoryDirectory {
        let mut directory = MemoryDirectory::new();
        for student in &self.students {
            directory.insert_student(student.clone());
        }
        for asset in &self.assets {
            directory.insert_asset(asset.clone());
        }
        directory
    }

    /// Looks up an operator account by id.
    pub fn operator(&self, operator_id: &str) -> Option<&Operator> {
        self.operators
            .iter()
            .find(|op| op.operator_id == operator_id)
    }
}
