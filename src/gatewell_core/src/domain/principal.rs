use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use uuid::Uuid;

use super::{email::Email, role::Role};

/// Opaque identifier of a principal, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PrincipalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

impl From<Uuid> for PrincipalId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<PrincipalId> for Uuid {
    fn from(value: PrincipalId) -> Self {
        value.0
    }
}

/// An outstanding password reset: the token digest plus its deadline.
///
/// A reset is pending iff the record carries one of these and the
/// deadline is in the future. Consumption or a newer request replaces
/// it; expiry just leaves it dead in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReset {
    pub token_digest: String,
    pub expires_at: DateTime<Utc>,
}

impl PendingReset {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// A stored identity with credentials and a role.
///
/// Field access goes through methods so the only way to mutate login
/// bookkeeping or the pending reset is through the operations the auth
/// core actually performs.
#[derive(Debug, Clone)]
pub struct Principal {
    id: PrincipalId,
    name: String,
    email: Email,
    password_hash: Secret<String>,
    role: Role,
    is_active: bool,
    last_login: Option<DateTime<Utc>>,
    login_count: i64,
    pending_reset: Option<PendingReset>,
}

impl Principal {
    /// Create a brand-new principal at signup.
    pub fn new(name: String, email: Email, password_hash: Secret<String>, role: Role) -> Self {
        Self {
            id: PrincipalId::new(),
            name,
            email,
            password_hash,
            role,
            is_active: true,
            last_login: None,
            login_count: 0,
            pending_reset: None,
        }
    }

    /// Rehydrate a principal from stored state.
    #[allow(clippy::too_many_arguments)]
    pub fn parse(
        id: PrincipalId,
        name: String,
        email: Email,
        password_hash: Secret<String>,
        role: Role,
        is_active: bool,
        last_login: Option<DateTime<Utc>>,
        login_count: i64,
        pending_reset: Option<PendingReset>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            role,
            is_active,
            last_login,
            login_count,
            pending_reset,
        }
    }

    pub fn id(&self) -> &PrincipalId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    pub fn login_count(&self) -> i64 {
        self.login_count
    }

    pub fn pending_reset(&self) -> Option<&PendingReset> {
        self.pending_reset.as_ref()
    }

    /// Apply successful-login bookkeeping.
    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login = Some(at);
        self.login_count += 1;
    }

    /// Replace any outstanding reset with a fresh digest and deadline.
    pub fn set_pending_reset(&mut self, token_digest: String, expires_at: DateTime<Utc>) {
        self.pending_reset = Some(PendingReset {
            token_digest,
            expires_at,
        });
    }

    /// Install a new password hash and clear the pending reset, making
    /// the consumed token permanently unusable.
    pub fn set_password_hash(&mut self, password_hash: Secret<String>) {
        self.password_hash = password_hash;
        self.pending_reset = None;
    }

    /// Deactivate this principal, suppressing login and session validation.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// The sanitized projection safe for response bodies.
    pub fn to_view(&self) -> PrincipalView {
        PrincipalView {
            id: self.id.to_string(),
            name: self.name.clone(),
            email: self.email.as_ref().expose_secret().clone(),
            role: self.role,
            is_active: self.is_active,
            last_login: self.last_login,
            login_count: self.login_count,
        }
    }
}

/// What the outside world is allowed to see of a principal.
///
/// The password hash and reset-token fields have no representation here
/// at all, so they cannot leak through serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub login_count: i64,
}
