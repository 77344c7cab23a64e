use std::fmt;

/// Raw HMAC signing key. Zeroed on drop.
///
/// Secrets are deliberately opaque: no `Debug` output of the key bytes and
/// no serde support, so a key cannot leak through a log line or a journal
/// payload.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Creates a secret from raw key material.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self(key.into())
    }

    /// Raw key bytes for HMAC construction.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for SigningSecret {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret(..)")
    }
}

/// Signing key for asset QR signatures.
///
/// A distinct type from [`ExitSecret`] so the two token namespaces stay
/// cryptographically separable if one key leaks.
#[derive(Debug, Clone)]
pub struct QrSecret(SigningSecret);

impl QrSecret {
    /// Creates a QR signing secret from raw key material.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self(SigningSecret::new(key))
    }

    /// The underlying signing key.
    pub fn signing_key(&self) -> &SigningSecret {
        &self.0
    }
}

/// Signing key for short-lived exit tokens.
#[derive(Debug, Clone)]
pub struct ExitSecret(SigningSecret);

impl ExitSecret {
    /// Creates an exit-token signing secret from raw key material.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self(SigningSecret::new(key))
    }

    /// Derives the exit-token secret from the QR secret.
    ///
    /// This is the explicit single-shared-key deployment mode; the
    /// derivation happens only where configuration is assembled, never
    /// silently inside a scheme.
    pub fn derive_from_qr(qr: &QrSecret) -> Self {
        Self(qr.signing_key().clone())
    }

    /// The underlying signing key.
    pub fn signing_key(&self) -> &SigningSecret {
        &self.0
    }
}
