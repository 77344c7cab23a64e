//! Token encoding, decoding, and age validation.
//!
//! Wire format: `base64url( f1 + "|" + ... + fN + "|" + hex(hmac_sha256(f1|...|fN, secret)) )`
//! using the padded URL-safe base64 alphabet. Fields must not contain the
//! delimiter; both schemes in `gatewarden-core` only sign ids, serials,
//! hex nonces, and decimal timestamps.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::errors::TokenError;
use crate::secret::SigningSecret;

type HmacSha256 = Hmac<Sha256>;

/// Delimiter between signed fields and the trailing signature.
pub const FIELD_DELIMITER: char = '|';

/// Encodes an ordered field list into a signed token.
///
/// The HMAC-SHA256 signature over the pipe-joined fields is appended as a
/// final hex-encoded component before base64url encoding. Callers supply
/// their own nonce and issue timestamp as trailing fields, which keeps the
/// codec generic across token types.
pub fn encode(fields: &[String], secret: &SigningSecret) -> String {
    let payload = fields.join("|");
    let signature = hex::encode(sign(payload.as_bytes(), secret));
    URL_SAFE.encode(format!("{payload}|{signature}"))
}

/// Decodes a signed token and verifies its signature.
///
/// Fails with [`TokenError::Malformed`] if base64 decoding fails, the
/// payload is not UTF-8, or splitting on the delimiter does not yield
/// exactly `expected_fields + 1` components. Fails with
/// [`TokenError::BadSignature`] when the recomputed HMAC does not match
/// the supplied signature; the comparison has no early exit on mismatch.
///
/// Returns the signed fields (signature excluded) in their original order.
pub fn decode(
    token: &str,
    expected_fields: usize,
    secret: &SigningSecret,
) -> Result<Vec<String>, TokenError> {
    let parts = split_components(token)?;
    if parts.len() != expected_fields + 1 {
        return Err(TokenError::Malformed {
            reason: format!(
                "expected {} components, got {}",
                expected_fields + 1,
                parts.len()
            ),
        });
    }

    let signature = &parts[parts.len() - 1];
    let fields = &parts[..parts.len() - 1];

    let payload = fields.join("|");
    let expected = hex::encode(sign(payload.as_bytes(), secret));
    if !bool::from(signature.as_bytes().ct_eq(expected.as_bytes())) {
        return Err(TokenError::BadSignature);
    }

    Ok(fields.to_vec())
}

/// Decodes a token's components without checking the signature.
///
/// For inspection/debugging only: returns every component including the
/// trailing signature, so the caller can display what a scanned label
/// claims to say. Never use the result to make a trust decision.
pub fn peek(token: &str) -> Result<Vec<String>, TokenError> {
    split_components(token)
}

/// Checks a token's age against a validity window.
///
/// The window is inclusive: a token checked exactly `window_secs` after
/// issuance is still valid; one second later it is [`TokenError::Expired`].
pub fn check_age(issued_at: i64, now: i64, window_secs: i64) -> Result<(), TokenError> {
    if now - issued_at > window_secs {
        return Err(TokenError::Expired {
            issued_at,
            checked_at: now,
        });
    }
    Ok(())
}

fn split_components(token: &str) -> Result<Vec<String>, TokenError> {
    let raw = URL_SAFE.decode(token).map_err(|e| TokenError::Malformed {
        reason: format!("base64 decode failed: {e}"),
    })?;
    let text = String::from_utf8(raw).map_err(|_| TokenError::Malformed {
        reason: "payload is not valid UTF-8".to_string(),
    })?;
    Ok(text
        .split(FIELD_DELIMITER)
        .map(|part| part.to_string())
        .collect())
}

fn sign(payload: &[u8], secret: &SigningSecret) -> [u8; 32] {
    // HMAC accepts keys of any length per RFC 2104; new_from_slice cannot
    // fail for any &[u8].
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac accepts keys of any size");
    mac.update(payload);
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SigningSecret {
        SigningSecret::new("unit-test-secret")
    }

    fn fields() -> Vec<String> {
        vec![
            "42".to_string(),
            "DBU1401234".to_string(),
            "SN-001".to_string(),
            "a1b2c3d4e5f60718".to_string(),
            "1700000000".to_string(),
        ]
    }

    #[test]
    fn round_trip() {
        let token = encode(&fields(), &secret());
        let decoded = decode(&token, 5, &secret()).unwrap();
        assert_eq!(decoded, fields());
    }

    #[test]
    fn wrong_component_count_is_malformed() {
        let token = encode(&fields(), &secret());
        assert!(matches!(
            decode(&token, 4, &secret()),
            Err(TokenError::Malformed { .. })
        ));
    }

    #[test]
    fn garbage_base64_is_malformed() {
        assert!(matches!(
            decode("%%%not-base64%%%", 5, &secret()),
            Err(TokenError::Malformed { .. })
        ));
    }

    #[test]
    fn peek_exposes_components_without_verifying() {
        let token = encode(&fields(), &secret());
        let parts = peek(&token).unwrap();
        assert_eq!(parts.len(), 6);
        assert_eq!(&parts[..5], fields().as_slice());
        assert_eq!(parts[5].len(), 64);
    }
}
