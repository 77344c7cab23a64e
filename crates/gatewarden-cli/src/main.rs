//! Gatewarden CLI - gate exit verification and audit journal operations.

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod output;

use commands::{exit_no_asset, inspect, logs, scan_asset, scan_student, sign_asset, verify_qr};

/// Which token scheme a raw token belongs to.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TokenKind {
    /// Long-lived asset QR signature.
    Qr,
    /// Short-lived exit token.
    Exit,
}

#[derive(Parser)]
#[command(name = "gatewarden")]
#[command(about = "Gatewarden gate exit verification and audit journal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue (or reissue) the QR signature for a registered asset
    SignAsset {
        /// Path to the directory JSON file
        directory: String,
        /// Asset id to sign
        asset_id: u64,
        /// Operator performing the issuance (checked against the
        /// directory's operator list, admin role required)
        #[arg(long)]
        operator: Option<String>,
        /// Write the signature back into the directory file
        #[arg(long)]
        write: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a token and show its fields without trusting it
    Inspect {
        /// The token to decode
        token: String,
        /// Which scheme the token belongs to
        #[arg(long, value_enum, default_value = "qr")]
        kind: TokenKind,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify an asset QR token against the directory
    VerifyQr {
        /// Path to the directory JSON file
        directory: String,
        /// The QR token to verify
        token: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Gate step 1: scan a student id
    ScanStudent {
        /// Path to the directory JSON file
        directory: String,
        /// Path to the audit journal
        journal: String,
        /// Scanned student id
        student_id: String,
        /// Operator handling the attempt
        #[arg(long)]
        operator: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Gate step 2: scan one asset QR
    ScanAsset {
        /// Path to the directory JSON file
        directory: String,
        /// Path to the audit journal
        journal: String,
        /// Scanned student id
        student_id: String,
        /// Scanned asset QR token
        #[arg(long)]
        qr: String,
        /// Exit token from step 1
        #[arg(long)]
        exit_token: String,
        /// Operator handling the attempt
        #[arg(long)]
        operator: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Gate step 2 alternative: exit without a registered asset
    ExitNoAsset {
        /// Path to the directory JSON file
        directory: String,
        /// Path to the audit journal
        journal: String,
        /// Scanned student id
        student_id: String,
        /// Exit token from step 1
        #[arg(long)]
        exit_token: String,
        /// Operator handling the attempt
        #[arg(long)]
        operator: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List audit journal entries
    Logs {
        /// Path to the audit journal
        journal: String,
        /// Only entries for this student
        #[arg(long)]
        student: Option<String>,
        /// Only entries by this operator
        #[arg(long)]
        operator: Option<String>,
        /// Only entries with this result (ALLOWED or BLOCKED)
        #[arg(long)]
        result: Option<String>,
        /// Only entries at or after this Unix timestamp
        #[arg(long)]
        since: Option<i64>,
        /// Only entries at or before this Unix timestamp
        #[arg(long)]
        until: Option<i64>,
        /// Stop after N entries
        #[arg(long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::SignAsset {
            directory,
            asset_id,
            operator,
            write,
            json,
        } => sign_asset::run(directory, asset_id, operator, write, json),
        Commands::Inspect { token, kind, json } => inspect::run(token, kind, json),
        Commands::VerifyQr {
            directory,
            token,
            json,
        } => verify_qr::run(directory, token, json),
        Commands::ScanStudent {
            directory,
            journal,
            student_id,
            operator,
            json,
        } => scan_student::run(directory, journal, student_id, operator, json),
        Commands::ScanAsset {
            directory,
            journal,
            student_id,
            qr,
            exit_token,
            operator,
            json,
        } => scan_asset::run(directory, journal, student_id, qr, exit_token, operator, json),
        Commands::ExitNoAsset {
            directory,
            journal,
            student_id,
            exit_token,
            operator,
            json,
        } => exit_no_asset::run(directory, journal, student_id, exit_token, operator, json),
        Commands::Logs {
            journal,
            student,
            operator,
            result,
            since,
            until,
            limit,
            json,
        } => logs::run(journal, student, operator, result, since, until, limit, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
