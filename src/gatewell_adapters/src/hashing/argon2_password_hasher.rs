use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use gatewell_core::{Password, PasswordHashError, PasswordHasher};

/// Argon2id password hasher.
///
/// Hashing and verification are CPU-bound, so both run under
/// `spawn_blocking` with the current span re-entered; nothing here ever
/// stalls the request-handling executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHashError> {
        let password = password.clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()
                    .map_err(PasswordHashError::UnexpectedError)?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| PasswordHashError::UnexpectedError(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHashError::UnexpectedError(e.to_string()))?
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn verify(
        &self,
        candidate: &Password,
        expected_hash: &Secret<String>,
    ) -> Result<(), PasswordHashError> {
        let candidate = candidate.clone();
        let expected_hash = expected_hash.expose_secret().clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected: PasswordHash<'_> = PasswordHash::new(&expected_hash)
                    .map_err(|e| PasswordHashError::UnexpectedError(e.to_string()))?;

                argon2()
                    .map_err(PasswordHashError::UnexpectedError)?
                    .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
                    .map_err(|_| PasswordHashError::PasswordMismatch)
            })
        })
        .await
        .map_err(|e| PasswordHashError::UnexpectedError(e.to_string()))?
    }
}
