//! Signed-token primitives shared by the Gatewarden token schemes.
//!
//! This crate provides:
//! - The pipe-delimited HMAC-SHA256 token codec (encode/decode/peek)
//! - Typed signing secrets with an explicit derive-from option
//! - Cryptographically secure nonce generation
//! - An injectable clock for age checks
//!
//! Core invariants:
//! - Tokens are integrity-protected, not confidential
//! - Signature comparison is constant-time
//! - Decoding never panics on attacker-controlled input; all failures are
//!   values
//!
#![deny(missing_docs)]

/// Injectable clock for token age checks.
pub mod clock;
/// Token encoding, decoding, and age validation.
pub mod codec;
/// Error types for token operations.
pub mod errors;
/// Random nonce generation.
pub mod nonce;
/// Typed signing secrets.
pub mod secret;

pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{check_age, decode, encode, peek, FIELD_DELIMITER};
pub use errors::TokenError;
pub use nonce::generate_nonce;
pub use secret::{ExitSecret, QrSecret, SigningSecret};
