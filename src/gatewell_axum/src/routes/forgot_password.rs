use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::HeaderMap,
    response::IntoResponse,
};
use secrecy::Secret;
use serde::Deserialize;

use gatewell_adapters::ratelimit::client_origin;
use gatewell_application::ForgotPasswordUseCase;
use gatewell_core::{Email, EmailClient, PasswordHasher, PrincipalStore};

use crate::state::AppState;

use super::MessageResponse;
use super::error::AuthApiError;

/// The one body every forgot-password request receives, byte for byte,
/// whether or not the email matched a principal.
const GENERIC_RESET_MESSAGE: &str =
    "If that email address is registered, a password reset link has been sent.";

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

/// Initiate credential recovery.
///
/// Rate limited per client origin before any work happens; past the
/// limiter, the response is indistinguishable for known, unknown and
/// unparseable addresses.
#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<P, H, M>(
    State(state): State<AppState<P, H, M>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    P: PrincipalStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    M: EmailClient + Clone + 'static,
{
    let origin = client_origin(&headers, Some(peer), state.config.trust_proxy);
    if let Err(retry_after_secs) = state.rate_limiter.check(&origin) {
        tracing::warn!(
            target: "auth.password.rate_limited",
            origin = %origin,
            retry_after_secs,
            "forgot-password rate limited"
        );
        return Err(AuthApiError::RateLimitExceeded { retry_after_secs });
    }

    // An address that cannot parse cannot match a principal; it takes
    // the same silent-success path as an unknown one.
    let Ok(email) = Email::try_from(request.email) else {
        return Ok(Json(MessageResponse::new(GENERIC_RESET_MESSAGE)));
    };

    let token_ttl = chrono::Duration::seconds(state.config.reset_token_ttl_seconds);
    let use_case = ForgotPasswordUseCase::new(
        &state.principal_store,
        &state.email_client,
        &state.config.reset_url_base,
        token_ttl,
    );
    use_case.execute(email).await?;

    Ok(Json(MessageResponse::new(GENERIC_RESET_MESSAGE)))
}
