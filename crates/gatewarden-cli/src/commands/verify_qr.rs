//! Verify-qr command: full asset QR verification against the directory.

use gatewarden_core::{verify_qr_signature, SystemClock};
use gatewarden_store::DirectoryFile;
use serde_json::json;

use crate::config::Config;
use crate::output::format_json;

pub fn run(directory: String, token: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let file = DirectoryFile::load(&directory)
        .map_err(|e| format!("Failed to load directory: {}", e))?;
    let dir = file.to_directory();

    let validity_secs = i64::from(config.gate.qr_validity_hours) * 3600;
    match verify_qr_signature(&token, &dir, &config.qr_secret, validity_secs, &SystemClock) {
        Ok(asset) => {
            if json {
                println!(
                    "{}",
                    format_json(&json!({ "valid": true, "asset": asset }))
                );
            } else {
                println!(
                    "OK: asset {} (owner {}, serial {}, status {})",
                    asset.asset_id, asset.owner_student_id, asset.serial_number, asset.status
                );
            }
            Ok(())
        }
        Err(e) => {
            if json {
                println!(
                    "{}",
                    format_json(&json!({ "valid": false, "error": e.to_string() }))
                );
            } else {
                eprintln!("INVALID: {e}");
            }
            std::process::exit(1);
        }
    }
}
