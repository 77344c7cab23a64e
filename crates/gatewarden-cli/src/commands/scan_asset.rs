//! Scan-asset command: gate step 2 for one asset.

use gatewarden_core::{AssetScan, GateWorkflow, SystemClock};
use gatewarden_store::{DirectoryFile, JournalAuditLog, WriteOptions};
use serde_json::json;

use crate::commands::require_operator;
use crate::config::Config;
use crate::output::format_json;

pub fn run(
    directory: String,
    journal: String,
    student_id: String,
    qr: String,
    exit_token: String,
    operator: String,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let file = DirectoryFile::load(&directory)
        .map_err(|e| format!("Failed to load directory: {}", e))?;
    require_operator(&file, &operator)?;

    let audit = JournalAuditLog::open(&journal, WriteOptions::default())
        .map_err(|e| format!("Failed to open journal: {}", e))?;
    let mut workflow = GateWorkflow::new(
        file.to_directory(),
        audit,
        SystemClock,
        config.qr_secret,
        config.exit_secret,
        config.gate,
    );

    match workflow.scan_asset(&student_id, &qr, &exit_token, &operator)? {
        AssetScan::Allowed { student, asset } => {
            if json {
                println!(
                    "{}",
                    format_json(&json!({
                        "status": "ALLOWED",
                        "reason": "Exit verified successfully",
                        "student": student,
                        "asset": asset,
                    }))
                );
            } else {
                println!(
                    "ALLOWED: {} may exit with asset {} (serial {})",
                    student.student_id, asset.asset_id, asset.serial_number
                );
            }
        }
        AssetScan::Blocked { reason } => {
            if json {
                println!(
                    "{}",
                    format_json(&json!({ "status": "BLOCKED", "reason": reason }))
                );
            } else {
                println!("BLOCKED: {reason}");
            }
        }
    }

    Ok(())
}
