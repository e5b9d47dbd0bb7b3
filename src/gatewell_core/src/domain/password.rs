use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

/// Minimum plaintext length accepted at signup and at password reset.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,
    #[error("Password must not be blank")]
    Blank,
}

/// A plaintext password that satisfies the password policy.
///
/// The same policy gates signup and reset-password so a credential can
/// never be weakened through the recovery flow.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let plaintext = value.expose_secret();
        if plaintext.trim().is_empty() {
            return Err(PasswordError::Blank);
        }
        if plaintext.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
