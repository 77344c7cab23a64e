//! Sign-asset command: issue or reissue an asset's QR signature.

use gatewarden_core::{issue_qr_signature, OperatorRole, SystemClock};
use gatewarden_store::DirectoryFile;
use serde_json::json;

use crate::config::Config;
use crate::output::format_json;

pub fn run(
    directory: String,
    asset_id: u64,
    operator: Option<String>,
    write: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let mut file = DirectoryFile::load(&directory)
        .map_err(|e| format!("Failed to load directory: {}", e))?;

    // Issuance is an admin responsibility when operators are on file.
    if !file.operators.is_empty() {
        let operator_id = operator.ok_or("--operator is required for this directory")?;
        match file.operator(&operator_id) {
            Some(op) if op.role == OperatorRole::Admin => {}
            Some(op) => {
                return Err(format!(
                    "operator '{}' has role {}, admin required",
                    operator_id, op.role
                )
                .into())
            }
            None => return Err(format!("unknown operator '{operator_id}'").into()),
        }
    }

    let asset = file
        .assets
        .iter()
        .find(|a| a.asset_id == asset_id)
        .ok_or_else(|| format!("asset {asset_id} not found in directory"))?
        .clone();

    let token = issue_qr_signature(&asset, &config.qr_secret, &SystemClock);

    if write {
        for stored in &mut file.assets {
            if stored.asset_id == asset_id {
                stored.qr_signature = Some(token.clone());
            }
        }
        file.save(&directory)
            .map_err(|e| format!("Failed to save directory: {}", e))?;
    }

    if json {
        println!(
            "{}",
            format_json(&json!({
                "asset_id": asset.asset_id,
                "owner_student_id": asset.owner_student_id,
                "serial_number": asset.serial_number,
                "qr_signature": token,
                "written": write,
            }))
        );
    } else {
        println!(
            "QR signature for asset {} (owner {}, serial {}):",
            asset.asset_id, asset.owner_student_id, asset.serial_number
        );
        println!("{token}");
    }

    Ok(())
}
