//! Environment-backed configuration for secrets and validity windows.

use std::env;

use gatewarden_core::{ExitSecret, GateConfig, QrSecret};
use thiserror::Error;

const DEFAULT_QR_SECRET: &str = "qr-secret-key-change-in-production";

/// Configuration error.
#[derive(Error, Debug)]
#[error("invalid {name}: {reason}")]
pub struct ConfigError {
    /// Environment variable name.
    pub name: &'static str,
    /// Why its value was rejected.
    pub reason: String,
}

/// Runtime configuration assembled from environment variables.
pub struct Config {
    /// QR signing secret (`QR_SECRET_KEY`).
    pub qr_secret: QrSecret,
    /// Exit-token secret (`EXIT_TOKEN_SECRET_KEY`); derived from the QR
    /// secret when unset.
    pub exit_secret: ExitSecret,
    /// Validity windows (`QR_VALIDITY_HOURS`, `EXIT_TOKEN_TTL_SECONDS`).
    pub gate: GateConfig,
}

impl Config {
    /// Loads configuration from the environment (and a `.env` file when
    /// present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let qr_key = env::var("QR_SECRET_KEY").unwrap_or_else(|_| DEFAULT_QR_SECRET.to_string());
        let qr_secret = QrSecret::new(qr_key);

        // The fallback is an explicit derivation, not silent key reuse.
        let exit_secret = match env::var("EXIT_TOKEN_SECRET_KEY") {
            Ok(key) => ExitSecret::new(key),
            Err(_) => ExitSecret::derive_from_qr(&qr_secret),
        };

        let gate = GateConfig {
            qr_validity_hours: parse_var("QR_VALIDITY_HOURS", 24)?,
            exit_token_ttl_seconds: parse_var("EXIT_TOKEN_TTL_SECONDS", 300)?,
        };

        Ok(Self {
            qr_secret,
            exit_secret,
            gate,
        })
    }
}

fn parse_var(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError {
            name,
            reason: format!("'{value}' is not a number"),
        }),
        Err(_) => Ok(default),
    }
}
