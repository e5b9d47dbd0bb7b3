use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use gatewell_core::{
    Email, PendingReset, Principal, PrincipalId, PrincipalStore, PrincipalStoreError, Role,
};

/// Credential store backed by a single `principals` table with a unique
/// index on email. Each statement touches one row, matching the
/// per-record atomicity the core assumes.
#[derive(Clone)]
pub struct PostgresPrincipalStore {
    pool: PgPool,
}

impl PostgresPrincipalStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresPrincipalStore { pool }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, email, password_hash, role, is_active, \
     last_login, login_count, reset_token_digest, reset_token_expires_at FROM principals";

#[async_trait]
impl PrincipalStore for PostgresPrincipalStore {
    #[tracing::instrument(name = "Adding principal to PostgreSQL", skip_all)]
    async fn add_principal(&self, principal: Principal) -> Result<(), PrincipalStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO principals
                    (id, name, email, password_hash, role, is_active, login_count)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::from(*principal.id()))
        .bind(principal.name())
        .bind(principal.email().as_ref().expose_secret())
        .bind(principal.password_hash().expose_secret())
        .bind(principal.role().as_str())
        .bind(principal.is_active())
        .bind(principal.login_count());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return PrincipalStoreError::EmailAlreadyExists;
                }
            }
            PrincipalStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving principal by email", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Principal, PrincipalStoreError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE email = $1"))
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PrincipalStoreError::UnexpectedError(e.to_string()))?;

        row.map(row_to_principal)
            .transpose()?
            .ok_or(PrincipalStoreError::PrincipalNotFound)
    }

    #[tracing::instrument(name = "Retrieving principal by email and role", skip_all)]
    async fn find_by_email_and_role(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<Principal, PrincipalStoreError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE email = $1 AND role = $2"))
            .bind(email.as_ref().expose_secret())
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PrincipalStoreError::UnexpectedError(e.to_string()))?;

        row.map(row_to_principal)
            .transpose()?
            .ok_or(PrincipalStoreError::PrincipalNotFound)
    }

    #[tracing::instrument(name = "Retrieving principal by id", skip_all)]
    async fn find_by_id(&self, id: &PrincipalId) -> Result<Principal, PrincipalStoreError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(Uuid::from(*id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PrincipalStoreError::UnexpectedError(e.to_string()))?;

        row.map(row_to_principal)
            .transpose()?
            .ok_or(PrincipalStoreError::PrincipalNotFound)
    }

    #[tracing::instrument(name = "Retrieving principal by reset digest", skip_all)]
    async fn find_by_reset_digest(&self, digest: &str) -> Result<Principal, PrincipalStoreError> {
        let row = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE reset_token_digest = $1"
        ))
        .bind(digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PrincipalStoreError::UnexpectedError(e.to_string()))?;

        row.map(row_to_principal)
            .transpose()?
            .ok_or(PrincipalStoreError::PrincipalNotFound)
    }

    #[tracing::instrument(name = "Recording login bookkeeping", skip_all)]
    async fn record_login(
        &self,
        id: &PrincipalId,
        at: DateTime<Utc>,
    ) -> Result<(), PrincipalStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE principals
                SET last_login = $1, login_count = login_count + 1
                WHERE id = $2
            "#,
        )
        .bind(at)
        .bind(Uuid::from(*id))
        .execute(&self.pool)
        .await
        .map_err(|e| PrincipalStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PrincipalStoreError::PrincipalNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Storing reset token digest", skip_all)]
    async fn store_reset_token(
        &self,
        id: &PrincipalId,
        token_digest: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PrincipalStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE principals
                SET reset_token_digest = $1, reset_token_expires_at = $2
                WHERE id = $3
            "#,
        )
        .bind(token_digest)
        .bind(expires_at)
        .bind(Uuid::from(*id))
        .execute(&self.pool)
        .await
        .map_err(|e| PrincipalStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PrincipalStoreError::PrincipalNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Setting new password", skip_all)]
    async fn set_new_password(
        &self,
        id: &PrincipalId,
        password_hash: Secret<String>,
    ) -> Result<(), PrincipalStoreError> {
        // One statement: the hash swap and the reset-token clear are
        // atomic, so a consumed token can never be replayed.
        let result = sqlx::query(
            r#"
                UPDATE principals
                SET password_hash = $1,
                    reset_token_digest = NULL,
                    reset_token_expires_at = NULL
                WHERE id = $2
            "#,
        )
        .bind(password_hash.expose_secret())
        .bind(Uuid::from(*id))
        .execute(&self.pool)
        .await
        .map_err(|e| PrincipalStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PrincipalStoreError::PrincipalNotFound);
        }
        Ok(())
    }
}

fn row_to_principal(row: PgRow) -> Result<Principal, PrincipalStoreError> {
    let unexpected = |e: &dyn std::fmt::Display| PrincipalStoreError::UnexpectedError(e.to_string());

    let id: Uuid = row.try_get("id").map_err(|e| unexpected(&e))?;
    let name: String = row.try_get("name").map_err(|e| unexpected(&e))?;
    let email: String = row.try_get("email").map_err(|e| unexpected(&e))?;
    let password_hash: String = row.try_get("password_hash").map_err(|e| unexpected(&e))?;
    let role: String = row.try_get("role").map_err(|e| unexpected(&e))?;
    let is_active: bool = row.try_get("is_active").map_err(|e| unexpected(&e))?;
    let last_login: Option<DateTime<Utc>> =
        row.try_get("last_login").map_err(|e| unexpected(&e))?;
    let login_count: i64 = row.try_get("login_count").map_err(|e| unexpected(&e))?;
    let reset_token_digest: Option<String> = row
        .try_get("reset_token_digest")
        .map_err(|e| unexpected(&e))?;
    let reset_token_expires_at: Option<DateTime<Utc>> = row
        .try_get("reset_token_expires_at")
        .map_err(|e| unexpected(&e))?;

    let email = Email::try_from(Secret::from(email)).map_err(|e| unexpected(&e))?;
    let role: Role = role.parse().map_err(|e| unexpected(&e))?;

    // A digest without a deadline (or vice versa) cannot round-trip
    // through this store; treat a half-present pair as no pending reset.
    let pending_reset = match (reset_token_digest, reset_token_expires_at) {
        (Some(token_digest), Some(expires_at)) => Some(PendingReset {
            token_digest,
            expires_at,
        }),
        _ => None,
    };

    Ok(Principal::parse(
        PrincipalId::from(id),
        name,
        email,
        Secret::from(password_hash),
        role,
        is_active,
        last_login,
        login_count,
        pending_reset,
    ))
}
