//! Shared in-memory doubles for use-case tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use gatewell_core::{
    Email, EmailClient, EmailClientError, Password, PasswordHashError, PasswordHasher, Principal,
    PrincipalId, PrincipalStore, PrincipalStoreError, Role,
};

pub fn email(s: &str) -> Email {
    Email::try_from(Secret::from(s.to_owned())).unwrap()
}

pub fn password(s: &str) -> Password {
    Password::try_from(Secret::from(s.to_owned())).unwrap()
}

/// A principal whose password hash matches `MockPasswordHasher`.
pub fn seeded_principal(email_addr: &str, plaintext: &str, role: Role) -> Principal {
    Principal::new(
        "Test Principal".to_owned(),
        email(email_addr),
        Secret::from(format!("mock-hash::{plaintext}")),
        role,
    )
}

#[derive(Clone, Default)]
pub struct MockPrincipalStore {
    principals: Arc<RwLock<HashMap<PrincipalId, Principal>>>,
    record_login_fails: Arc<RwLock<bool>>,
}

impl MockPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, principal: Principal) {
        self.principals
            .write()
            .await
            .insert(*principal.id(), principal);
    }

    pub async fn len(&self) -> usize {
        self.principals.read().await.len()
    }

    /// Make subsequent `record_login` calls fail, to exercise the
    /// best-effort bookkeeping contract.
    pub async fn fail_record_login(&self) {
        *self.record_login_fails.write().await = true;
    }
}

#[async_trait]
impl PrincipalStore for MockPrincipalStore {
    async fn add_principal(&self, principal: Principal) -> Result<(), PrincipalStoreError> {
        let mut principals = self.principals.write().await;
        if principals.values().any(|p| p.email() == principal.email()) {
            return Err(PrincipalStoreError::EmailAlreadyExists);
        }
        principals.insert(*principal.id(), principal);
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Principal, PrincipalStoreError> {
        self.principals
            .read()
            .await
            .values()
            .find(|p| p.email() == email)
            .cloned()
            .ok_or(PrincipalStoreError::PrincipalNotFound)
    }

    async fn find_by_email_and_role(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<Principal, PrincipalStoreError> {
        self.principals
            .read()
            .await
            .values()
            .find(|p| p.email() == email && p.role() == role)
            .cloned()
            .ok_or(PrincipalStoreError::PrincipalNotFound)
    }

    async fn find_by_id(&self, id: &PrincipalId) -> Result<Principal, PrincipalStoreError> {
        self.principals
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(PrincipalStoreError::PrincipalNotFound)
    }

    async fn find_by_reset_digest(&self, digest: &str) -> Result<Principal, PrincipalStoreError> {
        self.principals
            .read()
            .await
            .values()
            .find(|p| {
                p.pending_reset()
                    .is_some_and(|r| r.token_digest == digest)
            })
            .cloned()
            .ok_or(PrincipalStoreError::PrincipalNotFound)
    }

    async fn record_login(
        &self,
        id: &PrincipalId,
        at: DateTime<Utc>,
    ) -> Result<(), PrincipalStoreError> {
        if *self.record_login_fails.read().await {
            return Err(PrincipalStoreError::UnexpectedError(
                "record_login disabled by test".to_owned(),
            ));
        }
        let mut principals = self.principals.write().await;
        let principal = principals
            .get_mut(id)
            .ok_or(PrincipalStoreError::PrincipalNotFound)?;
        principal.record_login(at);
        Ok(())
    }

    async fn store_reset_token(
        &self,
        id: &PrincipalId,
        token_digest: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PrincipalStoreError> {
        let mut principals = self.principals.write().await;
        let principal = principals
            .get_mut(id)
            .ok_or(PrincipalStoreError::PrincipalNotFound)?;
        principal.set_pending_reset(token_digest, expires_at);
        Ok(())
    }

    async fn set_new_password(
        &self,
        id: &PrincipalId,
        password_hash: Secret<String>,
    ) -> Result<(), PrincipalStoreError> {
        let mut principals = self.principals.write().await;
        let principal = principals
            .get_mut(id)
            .ok_or(PrincipalStoreError::PrincipalNotFound)?;
        principal.set_password_hash(password_hash);
        Ok(())
    }
}

/// Deterministic stand-in for the argon2 hasher: fast, reversible by
/// inspection, and obviously not the plaintext.
#[derive(Clone, Copy)]
pub struct MockPasswordHasher;

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHashError> {
        Ok(Secret::from(format!(
            "mock-hash::{}",
            password.as_ref().expose_secret()
        )))
    }

    async fn verify(
        &self,
        candidate: &Password,
        expected_hash: &Secret<String>,
    ) -> Result<(), PasswordHashError> {
        let recomputed = format!("mock-hash::{}", candidate.as_ref().expose_secret());
        if &recomputed == expected_hash.expose_secret() {
            Ok(())
        } else {
            Err(PasswordHashError::PasswordMismatch)
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub reset_url: String,
    pub display_name: String,
}

#[derive(Clone, Default)]
pub struct CapturingEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl CapturingEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailClient for CapturingEmailClient {
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        reset_url: &str,
        display_name: &str,
    ) -> Result<(), EmailClientError> {
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            reset_url: reset_url.to_owned(),
            display_name: display_name.to_owned(),
        });
        Ok(())
    }
}

/// Always fails delivery, for the fire-and-forget contract.
#[derive(Clone, Copy)]
pub struct FailingEmailClient;

#[async_trait]
impl EmailClient for FailingEmailClient {
    async fn send_password_reset_email(
        &self,
        _recipient: &Email,
        _reset_url: &str,
        _display_name: &str,
    ) -> Result<(), EmailClientError> {
        Err(EmailClientError::DeliveryFailed(
            "smtp unreachable".to_owned(),
        ))
    }
}
