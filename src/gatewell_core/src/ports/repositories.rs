use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    principal::{Principal, PrincipalId},
    role::Role,
};

// PrincipalStore port trait and errors
#[derive(Debug, Error)]
pub enum PrincipalStoreError {
    #[error("Email already registered")]
    EmailAlreadyExists,
    #[error("Principal not found")]
    PrincipalNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for PrincipalStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmailAlreadyExists, Self::EmailAlreadyExists) => true,
            (Self::PrincipalNotFound, Self::PrincipalNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Durable record of principals, keyed by id with a uniqueness guarantee
/// on the normalized email.
///
/// Implementations must apply each mutation as an atomic read-modify-write
/// of the single affected record; no cross-record transactions are
/// assumed anywhere in the auth core. Concurrent reset-token writes for
/// the same principal are last-writer-wins by design.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Insert a new principal. Fails with `EmailAlreadyExists` when the
    /// normalized email is taken, regardless of role.
    async fn add_principal(&self, principal: Principal) -> Result<(), PrincipalStoreError>;

    async fn find_by_email(&self, email: &Email) -> Result<Principal, PrincipalStoreError>;

    /// Lookup filtered by both email and role. A principal stored under
    /// a different role is reported as `PrincipalNotFound`, which is
    /// what keeps the login entry points enumeration-safe.
    async fn find_by_email_and_role(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<Principal, PrincipalStoreError>;

    async fn find_by_id(&self, id: &PrincipalId) -> Result<Principal, PrincipalStoreError>;

    /// Lookup by the digest of an outstanding reset token. Expiry is the
    /// caller's concern; the store only matches on the digest.
    async fn find_by_reset_digest(&self, digest: &str) -> Result<Principal, PrincipalStoreError>;

    /// Successful-login bookkeeping: set `last_login`, bump `login_count`.
    async fn record_login(
        &self,
        id: &PrincipalId,
        at: DateTime<Utc>,
    ) -> Result<(), PrincipalStoreError>;

    /// Store a reset-token digest and deadline, overwriting any pending
    /// reset for this principal.
    async fn store_reset_token(
        &self,
        id: &PrincipalId,
        token_digest: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PrincipalStoreError>;

    /// Replace the password hash and clear the pending reset in one
    /// atomic update (single-use enforcement for the consumed token).
    async fn set_new_password(
        &self,
        id: &PrincipalId,
        password_hash: Secret<String>,
    ) -> Result<(), PrincipalStoreError>;
}
