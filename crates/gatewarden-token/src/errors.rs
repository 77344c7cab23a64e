use thiserror::Error;

/// Errors that can occur while decoding or validating a signed token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Token transport or framing is broken: bad base64, wrong component
    /// count, or a numeric field that fails to parse.
    #[error("malformed token: {reason}")]
    Malformed {
        /// What failed to parse.
        reason: String,
    },
    /// Recomputed HMAC does not match the supplied signature.
    #[error("token signature mismatch")]
    BadSignature,
    /// Token is older than its validity window.
    #[error("token expired: issued at {issued_at}, checked at {checked_at}")]
    Expired {
        /// Unix timestamp the token was issued at.
        issued_at: i64,
        /// Unix timestamp the check was performed at.
        checked_at: i64,
    },
}
