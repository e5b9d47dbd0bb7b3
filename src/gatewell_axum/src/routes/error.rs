use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gatewell_application::{
    ForgotPasswordError, LoginError, ResetPasswordError, SignupError, ValidateSessionError,
};
use gatewell_adapters::SessionTokenError;
use gatewell_core::{EmailError, PasswordError};

/// Wire shape of every error body: a human message plus a stable
/// machine-readable kind.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

/// The one client-facing error taxonomy.
///
/// Enumeration-sensitive operations collapse their internal failure
/// causes into a single variant before reaching this type, so the
/// mapping below cannot reintroduce a distinguishing response.
#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("An account with this email already exists")]
    EmailExists,

    #[error("Invalid admin provisioning secret")]
    InvalidAdminSecret,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("This account has been deactivated")]
    AccountInactive,

    #[error("Invalid or expired session token")]
    InvalidToken,

    #[error("User is inactive")]
    UserInactive,

    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,

    #[error("Too many requests. Please try again in {retry_after_secs} seconds")]
    RateLimitExceeded { retry_after_secs: u64 },

    #[error("An unexpected error occurred")]
    UnexpectedError(String),
}

impl AuthApiError {
    fn kind(&self) -> &'static str {
        match self {
            AuthApiError::ValidationError(_) => "validation_error",
            AuthApiError::EmailExists => "email_exists",
            AuthApiError::InvalidAdminSecret => "invalid_admin_secret",
            AuthApiError::InvalidCredentials => "invalid_credentials",
            AuthApiError::AccountInactive => "account_inactive",
            AuthApiError::InvalidToken => "invalid_token",
            AuthApiError::UserInactive => "user_inactive",
            AuthApiError::InvalidOrExpiredToken => "invalid_or_expired_token",
            AuthApiError::RateLimitExceeded { .. } => "rate_limit_exceeded",
            AuthApiError::UnexpectedError(_) => "internal_error",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AuthApiError::ValidationError(_)
            | AuthApiError::EmailExists
            | AuthApiError::InvalidOrExpiredToken => StatusCode::BAD_REQUEST,

            AuthApiError::InvalidCredentials
            | AuthApiError::InvalidToken
            | AuthApiError::UserInactive => StatusCode::UNAUTHORIZED,

            AuthApiError::InvalidAdminSecret | AuthApiError::AccountInactive => {
                StatusCode::FORBIDDEN
            }

            AuthApiError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,

            AuthApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        // Internal detail is logged here and never serialized; callers
        // only ever see the generic message.
        if let AuthApiError::UnexpectedError(detail) = &self {
            tracing::error!(error = %detail, "unexpected error while handling request");
        }

        let status_code = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_owned(),
        });

        if let AuthApiError::RateLimitExceeded { retry_after_secs } = &self {
            let headers = [("retry-after", retry_after_secs.to_string())];
            return (status_code, headers, body).into_response();
        }

        (status_code, body).into_response()
    }
}

impl From<EmailError> for AuthApiError {
    fn from(error: EmailError) -> Self {
        AuthApiError::ValidationError(error.to_string())
    }
}

impl From<PasswordError> for AuthApiError {
    fn from(error: PasswordError) -> Self {
        AuthApiError::ValidationError(error.to_string())
    }
}

impl From<SessionTokenError> for AuthApiError {
    fn from(_: SessionTokenError) -> Self {
        AuthApiError::InvalidToken
    }
}

impl From<SignupError> for AuthApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::EmailExists => AuthApiError::EmailExists,
            SignupError::InvalidAdminSecret => AuthApiError::InvalidAdminSecret,
            SignupError::StoreError(e) => AuthApiError::UnexpectedError(e.to_string()),
            SignupError::HasherError(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => AuthApiError::InvalidCredentials,
            LoginError::AccountInactive => AuthApiError::AccountInactive,
            LoginError::StoreError(e) => AuthApiError::UnexpectedError(e.to_string()),
            LoginError::HasherError(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ValidateSessionError> for AuthApiError {
    fn from(error: ValidateSessionError) -> Self {
        match error {
            ValidateSessionError::UserInactive => AuthApiError::UserInactive,
            ValidateSessionError::StoreError(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ForgotPasswordError> for AuthApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::StoreError(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ResetPasswordError> for AuthApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::InvalidOrExpiredToken => AuthApiError::InvalidOrExpiredToken,
            ResetPasswordError::StoreError(e) => AuthApiError::UnexpectedError(e.to_string()),
            ResetPasswordError::HasherError(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}
