use chrono::Utc;
use thiserror::Error;

use gatewell_core::{
    Password, PasswordHashError, PasswordHasher, PrincipalStore, PrincipalStoreError,
    domain::reset_token,
};

/// Error types specific to the reset-password use case
#[derive(Debug, Error)]
pub enum ResetPasswordError {
    /// Wrong token, expired token and already-consumed token all
    /// collapse here; callers learn nothing about which it was.
    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,
    #[error("Store error: {0}")]
    StoreError(PrincipalStoreError),
    #[error("Password hashing error: {0}")]
    HasherError(#[from] PasswordHashError),
}

/// Reset-password use case - consumes a reset token exactly once.
///
/// The caller-supplied plaintext is digested and matched against the
/// stored digest; on success the new hash is installed and the pending
/// reset cleared in the same store update.
pub struct ResetPasswordUseCase<'a, P, H>
where
    P: PrincipalStore,
    H: PasswordHasher,
{
    principal_store: &'a P,
    password_hasher: &'a H,
}

impl<'a, P, H> ResetPasswordUseCase<'a, P, H>
where
    P: PrincipalStore,
    H: PasswordHasher,
{
    pub fn new(principal_store: &'a P, password_hasher: &'a H) -> Self {
        Self {
            principal_store,
            password_hasher,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: &str,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let digest = reset_token::digest(token);

        let principal = match self.principal_store.find_by_reset_digest(&digest).await {
            Ok(principal) => principal,
            Err(PrincipalStoreError::PrincipalNotFound) => {
                tracing::warn!(
                    target: "auth.password.reset_failed",
                    reason = "unknown_token",
                    "password reset failed"
                );
                return Err(ResetPasswordError::InvalidOrExpiredToken);
            }
            Err(e) => return Err(ResetPasswordError::StoreError(e)),
        };

        let pending = principal
            .pending_reset()
            .ok_or(ResetPasswordError::InvalidOrExpiredToken)?;
        if pending.is_expired(Utc::now()) {
            tracing::warn!(
                target: "auth.password.reset_failed",
                reason = "expired_token",
                principal_id = %principal.id(),
                "password reset failed"
            );
            return Err(ResetPasswordError::InvalidOrExpiredToken);
        }

        let password_hash = self.password_hasher.hash(&new_password).await?;

        self.principal_store
            .set_new_password(principal.id(), password_hash)
            .await
            .map_err(ResetPasswordError::StoreError)?;

        tracing::info!(
            target: "auth.password.reset_completed",
            principal_id = %principal.id(),
            "password reset completed"
        );

        Ok(())
    }
}
