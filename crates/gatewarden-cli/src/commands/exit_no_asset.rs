//! Exit-no-asset command: gate step 2 when the student carries nothing.

use gatewarden_core::{GateWorkflow, NoAssetExit, SystemClock};
use gatewarden_store::{DirectoryFile, JournalAuditLog, WriteOptions};
use serde_json::json;

use crate::commands::require_operator;
use crate::config::Config;
use crate::output::format_json;

pub fn run(
    directory: String,
    journal: String,
    student_id: String,
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

    match workflow.exit_without_asset(&student_id, &exit_token, &operator)? {
        NoAssetExit::Allowed { student } => {
            if json {
                println!(
                    "{}",
                    format_json(&json!({
                        "status": "ALLOWED",
                        "reason": "Exit without registered assets",
                        "student": student,
                    }))
                );
            } else {
                println!(
                    "ALLOWED: {} may exit (no registered assets)",
                    student.student_id
                );
            }
        }
        NoAssetExit::Blocked { reason } => {
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
