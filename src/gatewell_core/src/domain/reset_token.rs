use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};

/// Entropy of a freshly generated reset token, in bytes.
const TOKEN_BYTES: usize = 32;

/// A single-use password-reset secret.
///
/// The plaintext exists only in memory between generation and the
/// outbound reset email; the credential store only ever sees the
/// SHA-256 digest, so a leaked store snapshot yields nothing usable.
pub struct ResetToken(Secret<String>);

impl ResetToken {
    /// Generate a fresh high-entropy token.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(Secret::from(URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// The plaintext secret, for embedding in the reset email exactly once.
    pub fn plaintext(&self) -> &Secret<String> {
        &self.0
    }

    /// The storable digest of this token.
    pub fn digest(&self) -> String {
        digest(self.0.expose_secret())
    }
}

/// One-way digest of a reset token, as stored in the credential store
/// and recomputed over the caller-supplied plaintext at reset time.
pub fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}
