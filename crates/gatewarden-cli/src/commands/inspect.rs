//! Inspect command: decode a token without trusting it.

use gatewarden_token::{check_age, codec, Clock, SystemClock};
use serde_json::json;

use crate::config::Config;
use crate::output::format_json;
use crate::TokenKind;

const QR_LABELS: [&str; 5] = [
    "asset_id",
    "owner_student_id",
    "serial_number",
    "nonce",
    "issued_at",
];
const EXIT_LABELS: [&str; 5] = [
    "student_id",
    "operator_id",
    "has_assets",
    "nonce",
    "issued_at",
];

pub fn run(token: String, kind: TokenKind, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let components = codec::peek(&token).map_err(|e| format!("Cannot decode token: {}", e))?;
    if components.len() != 6 {
        return Err(format!("expected 6 components, got {}", components.len()).into());
    }

    let (labels, secret, window_secs) = match kind {
        TokenKind::Qr => (
            QR_LABELS,
            config.qr_secret.signing_key().clone(),
            i64::from(config.gate.qr_validity_hours) * 3600,
        ),
        TokenKind::Exit => (
            EXIT_LABELS,
            config.exit_secret.signing_key().clone(),
            i64::from(config.gate.exit_token_ttl_seconds),
        ),
    };

    let signature_valid = codec::decode(&token, 5, &secret).is_ok();
    let within_window = components[4]
        .parse::<i64>()
        .map(|issued_at| check_age(issued_at, SystemClock.now_unix(), window_secs).is_ok())
        .unwrap_or(false);

    if json {
        let mut fields = serde_json::Map::new();
        for (label, value) in labels.iter().zip(&components) {
            fields.insert((*label).to_string(), json!(value));
        }
        println!(
            "{}",
            format_json(&json!({
                "fields": fields,
                "signature": components[5],
                "signature_valid": signature_valid,
                "within_validity_window": within_window,
            }))
        );
    } else {
        for (label, value) in labels.iter().zip(&components) {
            println!("{:<18} {}", label, value);
        }
        let sig = &components[5];
        println!("{:<18} {}...", "signature", &sig[..16.min(sig.len())]);
        println!("{:<18} {}", "signature_valid", signature_valid);
        println!("{:<18} {}", "within_window", within_window);
    }

    Ok(())
}
