use chrono::{Duration, Utc};
use secrecy::ExposeSecret;
use thiserror::Error;

use gatewell_core::{
    Email, EmailClient, PrincipalStore, PrincipalStoreError, ResetToken,
};

/// Error types specific to the forgot-password use case.
///
/// Note what is absent: there is no "unknown email" variant. That case
/// succeeds silently, which is the whole anti-enumeration contract.
#[derive(Debug, Error)]
pub enum ForgotPasswordError {
    #[error("Store error: {0}")]
    StoreError(PrincipalStoreError),
}

/// Forgot-password use case - initiates credential recovery.
///
/// Generates a fresh reset token, persists only its digest with a fixed
/// deadline, and hands the plaintext to the email collaborator. The
/// outcome is identical for known and unknown addresses, and email
/// delivery failures are logged, never surfaced.
pub struct ForgotPasswordUseCase<'a, P, M>
where
    P: PrincipalStore,
    M: EmailClient,
{
    principal_store: &'a P,
    email_client: &'a M,
    reset_url_base: &'a str,
    token_ttl: Duration,
}

impl<'a, P, M> ForgotPasswordUseCase<'a, P, M>
where
    P: PrincipalStore,
    M: EmailClient,
{
    pub fn new(
        principal_store: &'a P,
        email_client: &'a M,
        reset_url_base: &'a str,
        token_ttl: Duration,
    ) -> Self {
        Self {
            principal_store,
            email_client,
            reset_url_base,
            token_ttl,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), ForgotPasswordError> {
        let principal = match self.principal_store.find_by_email(&email).await {
            Ok(principal) => principal,
            Err(PrincipalStoreError::PrincipalNotFound) => {
                tracing::info!(
                    target: "auth.password.reset_requested",
                    principal_found = false,
                    "password reset requested for unknown email"
                );
                return Ok(());
            }
            Err(e) => return Err(ForgotPasswordError::StoreError(e)),
        };

        let token = ResetToken::generate();
        let expires_at = Utc::now() + self.token_ttl;

        // Overwrites any prior pending reset: last writer wins, and the
        // superseded token simply stops matching.
        self.principal_store
            .store_reset_token(principal.id(), token.digest(), expires_at)
            .await
            .map_err(ForgotPasswordError::StoreError)?;

        let reset_url = format!(
            "{}?token={}",
            self.reset_url_base.trim_end_matches('/'),
            token.plaintext().expose_secret()
        );

        if let Err(e) = self
            .email_client
            .send_password_reset_email(principal.email(), &reset_url, principal.name())
            .await
        {
            tracing::warn!(
                target: "auth.password.reset_requested",
                principal_id = %principal.id(),
                error = %e,
                "reset email was not delivered"
            );
        }

        tracing::info!(
            target: "auth.password.reset_requested",
            principal_id = %principal.id(),
            principal_found = true,
            expires_in_secs = self.token_ttl.num_seconds(),
            "password reset issued"
        );

        Ok(())
    }
}
