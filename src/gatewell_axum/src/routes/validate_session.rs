use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};

use gatewell_adapters::authentication::jwt_session::validate_session_token;
use gatewell_application::ValidateSessionUseCase;
use gatewell_core::{EmailClient, PasswordHasher, PrincipalStore};

use crate::extract::bearer_token;
use crate::state::AppState;

use super::SessionResponse;
use super::error::AuthApiError;

/// Validate a bearer token and re-check the principal against the live
/// store: a deactivated or deleted principal fails here even while its
/// token is cryptographically valid. The response carries current store
/// state, not the (possibly stale) token claims.
#[tracing::instrument(name = "Validate session", skip_all)]
pub async fn validate_session<P, H, M>(
    State(state): State<AppState<P, H, M>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthApiError>
where
    P: PrincipalStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    M: EmailClient + Clone + 'static,
{
    let token = bearer_token(&headers).ok_or(AuthApiError::InvalidToken)?;

    let claims = validate_session_token(token, &state.config.jwt)?;
    let principal_id = claims.principal_id()?;

    let use_case = ValidateSessionUseCase::new(&state.principal_store);
    let principal = use_case.execute(&principal_id).await?;

    Ok(Json(SessionResponse {
        user: principal.to_view(),
    }))
}
