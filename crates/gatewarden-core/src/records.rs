use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a student may currently pass the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    /// Student is in good standing.
    Active,
    /// Student is blocked from exiting.
    Blocked,
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentStatus::Active => write!(f, "active"),
            StudentStatus::Blocked => write!(f, "blocked"),
        }
    }
}

/// A student record, read from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Campus-issued student identifier.
    pub student_id: String,
    /// Display name.
    pub full_name: String,
    /// Current standing.
    pub status: StudentStatus,
}

/// Lifecycle state of a registered asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// Asset may be carried out by its owner.
    Active,
    /// Registration was revoked.
    Revoked,
    /// Asset was reported stolen.
    Stolen,
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetStatus::Active => write!(f, "active"),
            AssetStatus::Revoked => write!(f, "revoked"),
            AssetStatus::Stolen => write!(f, "stolen"),
        }
    }
}

/// A registered physical asset (e.g. a laptop), read from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Directory-assigned numeric identifier.
    pub asset_id: u64,
    /// Student the asset is registered to.
    pub owner_student_id: String,
    /// Manufacturer serial number; unique across the directory.
    pub serial_number: String,
    /// Manufacturer/brand, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Color, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Free-form visible identifying marks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_specs: Option<String>,
    /// Lifecycle state.
    pub status: AssetStatus,
    /// The QR signature printed on the asset's label, once issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_signature: Option<String>,
    /// Unix timestamp the asset was registered at, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<i64>,
}

/// Role of a gate/admin operator.
///
/// A closed enumeration checked once at the authorization boundary; the
/// workflow itself never re-derives trust from a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorRole {
    /// May manage records and issue QR signatures.
    Admin,
    /// May operate the gate workflow.
    GateOperator,
}

impl fmt::Display for OperatorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorRole::Admin => write!(f, "admin"),
            OperatorRole::GateOperator => write!(f, "gate_operator"),
        }
    }
}

/// An operator account, as known to the authorization boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Operator identifier carried into exit tokens and audit entries.
    pub operator_id: String,
    /// Login name, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Role.
    pub role: OperatorRole,
}

/// Terminal result of one gate attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExitResult {
    /// Exit permitted.
    Allowed,
    /// Exit denied.
    Blocked,
}

impl fmt::Display for ExitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitResult::Allowed => write!(f, "ALLOWED"),
            ExitResult::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// One immutable audit record: exactly one per terminal gate decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitLogEntry {
    /// Unix timestamp the decision was made at.
    pub timestamp: i64,
    /// Student the attempt was for.
    pub student_id: String,
    /// Asset involved, when the decision concerned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<u64>,
    /// Operator who handled the attempt.
    pub operator_id: String,
    /// ALLOWED or BLOCKED.
    pub result: ExitResult,
    /// Human-readable reason, identical to what the operator saw.
    pub reason: String,
}
