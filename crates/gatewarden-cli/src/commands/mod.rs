//! Command implementations.

pub mod exit_no_asset;
pub mod inspect;
pub mod logs;
pub mod scan_asset;
pub mod scan_student;
pub mod sign_asset;
pub mod verify_qr;

use gatewarden_store::DirectoryFile;

/// Authorization boundary for gate commands: when the directory file
/// lists operators, the operator must be one of them (any role may work
/// the gate). The workflow itself never re-derives trust from a role.
pub(crate) fn require_operator(
    file: &DirectoryFile,
    operator_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if file.operators.is_empty() {
        return Ok(());
    }
    if file.operator(operator_id).is_none() {
        return Err(format!("unknown operator '{operator_id}'").into());
    }
    Ok(())
}
