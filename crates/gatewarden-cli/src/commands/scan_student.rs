//! Scan-student command: gate step 1.

use gatewarden_core::{GateWorkflow, StudentScan, SystemClock};
use gatewarden_store::{DirectoryFile, JournalAuditLog, WriteOptions};
use serde_json::json;

use crate::commands::require_operator;
use crate::config::Config;
use crate::output::format_json;

pub fn run(
    directory: String,
    journal: String,
    student_id: String,
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

    match workflow.scan_student(&student_id, &operator)? {
        StudentScan::Cleared {
            student,
            has_assets,
            asset_count,
            exit_token,
        } => {
            if json {
                println!(
                    "{}",
                    format_json(&json!({
                        "status": "OK",
                        "student": student,
                        "has_assets": has_assets,
                        "asset_count": asset_count,
                        "exit_token": exit_token,
                    }))
                );
            } else {
                println!("OK: {} ({})", student.full_name, student.student_id);
                println!("active assets: {asset_count}");
                println!("exit token: {exit_token}");
            }
        }
        StudentScan::Blocked { reason } => {
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
