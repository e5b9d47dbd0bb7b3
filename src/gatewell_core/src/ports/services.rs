use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{email::Email, password::Password};

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password does not match")]
    PasswordMismatch,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for PasswordHashError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::PasswordMismatch, Self::PasswordMismatch) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// One-way, salted, computationally expensive password hashing.
///
/// The produced hash is all the credential store ever holds; verification
/// recomputes against the candidate. Implementations are expected to run
/// the actual work off the async request path.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHashError>;

    /// Verify a candidate against a stored hash. A wrong password is
    /// `PasswordMismatch`; anything else is an infrastructure failure.
    async fn verify(
        &self,
        candidate: &Password,
        expected_hash: &Secret<String>,
    ) -> Result<(), PasswordHashError>;
}

// EmailClient port trait and errors
#[derive(Debug, Error)]
pub enum EmailClientError {
    #[error("Email delivery is not configured")]
    NotConfigured,
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Outbound mail collaborator for the credential-recovery flow.
///
/// Callers treat failure as log-only: a delivery error must never change
/// the HTTP response of forgot-password.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        reset_url: &str,
        display_name: &str,
    ) -> Result<(), EmailClientError>;
}
