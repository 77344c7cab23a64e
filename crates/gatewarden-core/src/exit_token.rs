//! Exit token scheme.
//!
//! A short-lived token minted on "scan student" and presented on the very
//! next "scan asset" or "exit without asset" call. It binds the student,
//! the operator who scanned them, and whether the student was determined
//! to carry assets, so neither step can be skipped or replayed across
//! actors. The server keeps no session state; this token is the session.

use gatewarden_token::{codec, generate_nonce, Clock, ExitSecret, TokenError};
use thiserror::Error;

/// Number of signed fields in an exit token:
/// `[student_id, operator_id, has_assets_flag, nonce, issued_at]`.
pub const EXIT_TOKEN_FIELD_COUNT: usize = 5;

/// Decoded view of a verified exit token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitClaims {
    /// Student the token was minted for.
    pub student_id: String,
    /// Operator whose scan minted the token.
    pub operator_id: String,
    /// Whether the student carried registered assets at mint time.
    pub has_assets: bool,
    /// Random nonce making the signature unique across reissuance.
    pub nonce: String,
    /// Unix timestamp the token was minted at.
    pub issued_at: i64,
}

/// Errors from exit token verification.
#[derive(Error, Debug)]
pub enum ExitTokenError {
    /// Transport, signature, or expiry failure.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// Token was minted for a different student/operator pair.
    #[error(
        "token bound to ({token_student}, {token_operator}), \
         presented for ({expected_student}, {expected_operator})"
    )]
    IdentityMismatch {
        /// Student embedded in the token.
        token_student: String,
        /// Operator embedded in the token.
        token_operator: String,
        /// Student the caller claimed.
        expected_student: String,
        /// Operator the caller claimed.
        expected_operator: String,
    },
    /// Token carries the opposite asset-presence decision.
    #[error("asset-presence flag mismatch: token says {actual}, expected {expected}")]
    FlagMismatch {
        /// Flag the caller required.
        expected: bool,
        /// Flag embedded in the token.
        actual: bool,
    },
}

/// Mints an exit token for a cleared student scan.
pub fn issue_exit_token(
    student_id: &str,
    operator_id: &str,
    has_assets: bool,
    secret: &ExitSecret,
    clock: &impl Clock,
) -> String {
    let fields = vec![
        student_id.to_string(),
        operator_id.to_string(),
        u8::from(has_assets).to_string(),
        generate_nonce(),
        clock.now_unix().to_string(),
    ];
    codec::encode(&fields, secret.signing_key())
}

/// Verifies an exit token against the actor pair presenting it.
///
/// Checks, in order: signature and framing, age against `ttl_secs`
/// (inclusive at the boundary), that the embedded student and operator
/// both equal the presented pair, and — when `expected_has_assets` is
/// supplied — that the embedded flag matches. Passing `None` skips the
/// flag check.
///
/// Verification does not consume the token: no nonce cache exists, so a
/// token remains valid for its whole TTL after first use.
pub fn verify_exit_token(
    token: &str,
    expected_student: &str,
    expected_operator: &str,
    expected_has_assets: Option<bool>,
    ttl_secs: i64,
    secret: &ExitSecret,
    clock: &impl Clock,
) -> Result<ExitClaims, ExitTokenError> {
    let fields = codec::decode(token, EXIT_TOKEN_FIELD_COUNT, secret.signing_key())?;

    let issued_at: i64 = fields[4].parse().map_err(|_| TokenError::Malformed {
        reason: "issue timestamp is not numeric".to_string(),
    })?;
    let has_assets = match fields[2].as_str() {
        "0" => false,
        "1" => true,
        _ => {
            return Err(TokenError::Malformed {
                reason: "asset-presence flag is not 0 or 1".to_string(),
            }
            .into())
        }
    };

    codec::check_age(issued_at, clock.now_unix(), ttl_secs)?;

    if fields[0] != expected_student || fields[1] != expected_operator {
        return Err(ExitTokenError::IdentityMismatch {
            token_student: fields[0].clone(),
            token_operator: fields[1].clone(),
            expected_student: expected_student.to_string(),
            expected_operator: expected_operator.to_string(),
        });
    }

    if let Some(expected) = expected_has_assets {
        if has_assets != expected {
            return Err(ExitTokenError::FlagMismatch {
                expected,
                actual: has_assets,
            });
        }
    }

    Ok(ExitClaims {
        student_id: fields[0].clone(),
        operator_id: fields[1].clone(),
        has_assets,
        nonce: fields[3].clone(),
        issued_at,
    })
}
