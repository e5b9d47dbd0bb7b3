use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gatewell_core::{Principal, PrincipalId, Role};

#[derive(Clone)]
pub struct JwtConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("Invalid token")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Claims carried by a session token.
///
/// Self-contained by design: signature plus expiry make the token
/// verifiable without a server-side session store. Live principal state
/// (is the account still active?) is deliberately NOT trusted from here;
/// session validation re-reads the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Principal id
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub admin: bool,
    pub iat: usize,
    pub exp: usize,
}

impl SessionClaims {
    pub fn principal_id(&self) -> Result<PrincipalId, SessionTokenError> {
        self.sub
            .parse()
            .map_err(|_| SessionTokenError::UnexpectedError("Malformed subject claim".to_owned()))
    }
}

/// Issue a signed session token for an authenticated principal.
pub fn generate_session_token(
    principal: &Principal,
    config: &JwtConfig,
) -> Result<String, SessionTokenError> {
    let delta = chrono::Duration::try_seconds(config.token_ttl_in_seconds).ok_or(
        SessionTokenError::UnexpectedError("Failed to create token duration".to_owned()),
    )?;

    let now = Utc::now();
    let exp = now
        .checked_add_signed(delta)
        .ok_or(SessionTokenError::UnexpectedError(
            "Duration out of range".to_owned(),
        ))?
        .timestamp();

    let iat: usize = now
        .timestamp()
        .try_into()
        .map_err(|_| SessionTokenError::UnexpectedError("Failed to cast i64 to usize".to_owned()))?;
    let exp: usize = exp
        .try_into()
        .map_err(|_| SessionTokenError::UnexpectedError("Failed to cast i64 to usize".to_owned()))?;

    let claims = SessionClaims {
        sub: principal.id().to_string(),
        email: principal.email().as_ref().expose_secret().clone(),
        role: principal.role(),
        admin: principal.role().is_admin(),
        iat,
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.as_bytes()),
    )
    .map_err(SessionTokenError::TokenError)
}

/// Check a presented token: signature and expiry only. Liveness of the
/// principal is the caller's next step.
pub fn validate_session_token(
    token: &str,
    config: &JwtConfig,
) -> Result<SessionClaims, SessionTokenError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(SessionTokenError::TokenError)
}
