//! Gate workflow state machine.
//!
//! One instance handles any number of exit attempts; no state is held
//! between calls. Step 1 (`scan_student`) mints an exit token that carries
//! everything step 2 needs, so the token — not the server — is the
//! session. Step 2 is either `scan_asset` (once per asset the student
//! carries) or `exit_without_asset`; both are terminal and write exactly
//! one audit entry before returning.
//!
//! Two calls for the same student may run concurrently; each performs its
//! own read-decide-log cycle. The active-asset re-check in
//! `exit_without_asset` narrows (not eliminates) the race where an asset
//! is registered between the two steps.

use gatewarden_token::{Clock, ExitSecret, QrSecret};

use crate::audit::AuditSink;
use crate::directory::Directory;
use crate::errors::GateError;
use crate::exit_token::{issue_exit_token, verify_exit_token};
use crate::identifiers::is_valid_student_id;
use crate::qr::{verify_qr_signature, QrVerifyError};
use crate::records::{Asset, AssetStatus, ExitLogEntry, ExitResult, Student, StudentStatus};

/// Token validity windows for gate decisions.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Validity window for asset QR signatures, in hours.
    pub qr_validity_hours: u32,
    /// Time-to-live for exit tokens, in seconds. Much shorter than the QR
    /// window: an exit token only bridges two consecutive calls from the
    /// same operator session.
    pub exit_token_ttl_seconds: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            qr_validity_hours: 24,
            exit_token_ttl_seconds: 300,
        }
    }
}

impl GateConfig {
    fn qr_validity_secs(&self) -> i64 {
        i64::from(self.qr_validity_hours) * 3600
    }

    fn exit_token_ttl_secs(&self) -> i64 {
        i64::from(self.exit_token_ttl_seconds)
    }
}

/// Outcome of gate step 1: student scan.
///
/// Not terminal when cleared — no audit entry is written for a cleared
/// scan, only for blocks.
#[derive(Debug)]
pub enum StudentScan {
    /// Student may proceed to step 2.
    Cleared {
        /// Resolved student record.
        student: Student,
        /// Whether the student currently owns active registered assets.
        has_assets: bool,
        /// How many active assets the student owns.
        asset_count: usize,
        /// Token the operator must present on the next call.
        exit_token: String,
    },
    /// Attempt blocked; one audit entry was written.
    Blocked {
        /// Reason, identical to the logged one.
        reason: String,
    },
}

/// Terminal outcome of gate step 2 for one scanned asset.
#[derive(Debug)]
pub enum AssetScan {
    /// Exit permitted for this asset.
    Allowed {
        /// Resolved student record.
        student: Student,
        /// Resolved asset record.
        asset: Asset,
    },
    /// Exit denied.
    Blocked {
        /// Reason, identical to the logged one.
        reason: String,
    },
}

/// Terminal outcome of gate step 2 when the student carries no assets.
#[derive(Debug)]
pub enum NoAssetExit {
    /// Exit permitted.
    Allowed {
        /// Resolved student record.
        student: Student,
    },
    /// Exit denied.
    Blocked {
        /// Reason, identical to the logged one.
        reason: String,
    },
}

/// The gate workflow over a directory, an audit sink, and a clock.
pub struct GateWorkflow<D, A, C> {
    directory: D,
    audit: A,
    clock: C,
    qr_secret: QrSecret,
    exit_secret: ExitSecret,
    config: GateConfig,
}

impl<D: Directory, A: AuditSink, C: Clock> GateWorkflow<D, A, C> {
    /// Creates a workflow over the given collaborators.
    pub fn new(
        directory: D,
        audit: A,
        clock: C,
        qr_secret: QrSecret,
        exit_secret: ExitSecret,
        config: GateConfig,
    ) -> Self {
        Self {
            directory,
            audit,
            clock,
            qr_secret,
            exit_secret,
            config,
        }
    }

    /// Step 1: scan a student id.
    ///
    /// Resolves the student, counts their active assets, and mints an exit
    /// token bound to `(student_id, operator_id, has_assets)`. Blocks (and
    /// logs) on bad id format, unknown student, or inactive student. A
    /// cleared scan is exploratory and writes no audit entry.
    pub fn scan_student(
        &mut self,
        student_id: &str,
        operator_id: &str,
    ) -> Result<StudentScan, GateError> {
        if !is_valid_student_id(student_id) {
            return self.block_student(student_id, operator_id, "Invalid student ID format");
        }

        let student = match self.directory.student(student_id)? {
            Some(student) => student,
            None => return self.block_student(student_id, operator_id, "Student not found"),
        };
        if student.status != StudentStatus::Active {
            return self.block_student(student_id, operator_id, "Student inactive");
        }

        let assets = self.directory.active_assets_owned_by(student_id)?;
        let has_assets = !assets.is_empty();
        let exit_token = issue_exit_token(
            student_id,
            operator_id,
            has_assets,
            &self.exit_secret,
            &self.clock,
        );

        Ok(StudentScan::Cleared {
            student,
            has_assets,
            asset_count: assets.len(),
            exit_token,
        })
    }

    /// Step 2: scan one asset QR.
    ///
    /// Only valid with an exit token minted with `has_assets = true`. May
    /// be called once per asset the student carries; each call is an
    /// independent terminal decision with its own audit entry — cumulative
    /// clearing is the caller's concern.
    pub fn scan_asset(
        &mut self,
        student_id: &str,
        qr_token: &str,
        exit_token: &str,
        operator_id: &str,
    ) -> Result<AssetScan, GateError> {
        if !is_valid_student_id(student_id) {
            return self.block_asset(student_id, None, operator_id, "Invalid student ID format");
        }

        // Every exit-token failure collapses to one operator-facing reason.
        if verify_exit_token(
            exit_token,
            student_id,
            operator_id,
            Some(true),
            self.config.exit_token_ttl_secs(),
            &self.exit_secret,
            &self.clock,
        )
        .is_err()
        {
            return self.block_asset(
                student_id,
                None,
                operator_id,
                "Invalid or expired exit token",
            );
        }

        let student = match self.directory.student(student_id)? {
            Some(student) if student.status == StudentStatus::Active => student,
            _ => {
                return self.block_asset(
                    student_id,
                    None,
                    operator_id,
                    "Student invalid or inactive",
                )
            }
        };

        let asset = match verify_qr_signature(
            qr_token,
            &self.directory,
            &self.qr_secret,
            self.config.qr_validity_secs(),
            &self.clock,
        ) {
            Ok(asset) => asset,
            Err(QrVerifyError::Directory(err)) => return Err(err.into()),
            Err(_) => return self.block_asset(student_id, None, operator_id, "Invalid QR"),
        };

        // Defense in depth: the QR scheme already compared the token's
        // owner to the record; this compares the record to the scanned
        // student.
        if asset.owner_student_id != student_id {
            return self.block_asset(
                student_id,
                Some(asset.asset_id),
                operator_id,
                "Ownership mismatch",
            );
        }

        if asset.status != AssetStatus::Active {
            let reason = format!("Asset {}", asset.status);
            return self.block_asset(student_id, Some(asset.asset_id), operator_id, &reason);
        }

        self.append(
            student_id,
            Some(asset.asset_id),
            operator_id,
            ExitResult::Allowed,
            "Exit verified successfully",
        )?;
        Ok(AssetScan::Allowed { student, asset })
    }

    /// Step 2 alternative: exit with no registered assets.
    ///
    /// Only valid with an exit token minted with `has_assets = false`.
    /// Re-queries the student's active assets to catch a registration that
    /// landed between the two steps.
    pub fn exit_without_asset(
        &mut self,
        student_id: &str,
        exit_token: &str,
        operator_id: &str,
    ) -> Result<NoAssetExit, GateError> {
        if !is_valid_student_id(student_id) {
            return self.block_no_asset(student_id, operator_id, "Invalid student ID format");
        }

        if verify_exit_token(
            exit_token,
            student_id,
            operator_id,
            Some(false),
            self.config.exit_token_ttl_secs(),
            &self.exit_secret,
            &self.clock,
        )
        .is_err()
        {
            return self.block_no_asset(student_id, operator_id, "Invalid or expired exit token");
        }

        let student = match self.directory.student(student_id)? {
            Some(student) if student.status == StudentStatus::Active => student,
            _ => {
                return self.block_no_asset(student_id, operator_id, "Student invalid or inactive")
            }
        };

        if !self.directory.active_assets_owned_by(student_id)?.is_empty() {
            return self.block_no_asset(student_id, operator_id, "Registered assets present");
        }

        self.append(
            student_id,
            None,
            operator_id,
            ExitResult::Allowed,
            "Exit without registered assets",
        )?;
        Ok(NoAssetExit::Allowed { student })
    }

    /// Writes one audit entry. Every terminal decision passes through here
    /// before the outcome is returned (log-then-respond).
    fn append(
        &mut self,
        student_id: &str,
        asset_id: Option<u64>,
        operator_id: &str,
        result: ExitResult,
        reason: &str,
    ) -> Result<(), GateError> {
        let entry = ExitLogEntry {
            timestamp: self.clock.now_unix(),
            student_id: student_id.to_string(),
            asset_id,
            operator_id: operator_id.to_string(),
            result,
            reason: reason.to_string(),
        };
        self.audit.append(&entry)?;
        Ok(())
    }

    fn block_student(
        &mut self,
        student_id: &str,
        operator_id: &str,
        reason: &str,
    ) -> Result<StudentScan, GateError> {
        self.append(student_id, None, operator_id, ExitResult::Blocked, reason)?;
        Ok(StudentScan::Blocked {
            reason: reason.to_string(),
        })
    }

    fn block_asset(
        &mut self,
        student_id: &str,
        asset_id: Option<u64>,
        operator_id: &str,
        reason: &str,
    ) -> Result<AssetScan, GateError> {
        self.append(
            student_id,
            asset_id,
            operator_id,
            ExitResult::Blocked,
            reason,
        )?;
        Ok(AssetScan::Blocked {
            reason: reason.to_string(),
        })
    }

    fn block_no_asset(
        &mut self,
        student_id: &str,
        operator_id: &str,
        reason: &str,
    ) -> Result<NoAssetExit, GateError> {
        self.append(student_id, None, operator_id, ExitResult::Blocked, reason)?;
        Ok(NoAssetExit::Blocked {
            reason: reason.to_string(),
        })
    }
}
