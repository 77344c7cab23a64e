use rand::RngCore;

/// Length of a generated nonce in hex characters.
pub const NONCE_HEX_LEN: usize = 16;

/// Generates a random token nonce: 8 CSPRNG bytes, hex-encoded.
///
/// The nonce makes signatures unique across reissuance of identical field
/// values; it carries no other meaning.
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_HEX_LEN / 2];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
