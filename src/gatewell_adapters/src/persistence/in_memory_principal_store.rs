use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use tokio::sync::RwLock;

use gatewell_core::{
    Email, Principal, PrincipalId, PrincipalStore, PrincipalStoreError, Role,
};

/// Process-local credential store, used in tests and for running the
/// service without a database. Every mutation happens under one write
/// lock, which gives the per-record atomicity the core assumes.
#[derive(Default, Clone)]
pub struct InMemoryPrincipalStore {
    principals: Arc<RwLock<HashMap<PrincipalId, Principal>>>,
}

impl InMemoryPrincipalStore {
    pub fn new() -> Self {
        Self {
            principals: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Administrative deactivation, outside the auth core's own
    /// surface: the surrounding product flips accounts off by writing
    /// the store directly, and tests use this to simulate that.
    pub async fn deactivate(&self, id: &PrincipalId) -> Result<(), PrincipalStoreError> {
        let mut principals = self.principals.write().await;
        let principal = principals
            .get_mut(id)
            .ok_or(PrincipalStoreError::PrincipalNotFound)?;
        principal.deactivate();
        Ok(())
    }
}

#[async_trait]
impl PrincipalStore for InMemoryPrincipalStore {
    async fn add_principal(&self, principal: Principal) -> Result<(), PrincipalStoreError> {
        let mut principals = self.principals.write().await;
        if principals.values().any(|p| p.email() == principal.email()) {
            return Err(PrincipalStoreError::EmailAlreadyExists);
        }
        principals.insert(*principal.id(), principal);
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Principal, PrincipalStoreError> {
        let principals = self.principals.read().await;
        principals
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
        let principals = self.principals.read().await;
        principals
            .values()
            .find(|p| p.email() == email && p.role() == role)
            .cloned()
            .ok_or(PrincipalStoreError::PrincipalNotFound)
    }

    async fn find_by_id(&self, id: &PrincipalId) -> Result<Principal, PrincipalStoreError> {
        let principals = self.principals.read().await;
        principals
            .get(id)
            .cloned()
            .ok_or(PrincipalStoreError::PrincipalNotFound)
    }

    async fn find_by_reset_digest(&self, digest: &str) -> Result<Principal, PrincipalStoreError> {
        let principals = self.principals.read().await;
        principals
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
