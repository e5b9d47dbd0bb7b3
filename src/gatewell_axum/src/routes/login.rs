use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use gatewell_adapters::authentication::jwt_session::generate_session_token;
use gatewell_application::LoginUseCase;
use gatewell_core::{Email, EmailClient, Password, PasswordHasher, PrincipalStore, Role};

use crate::state::AppState;

use super::AuthResponse;
use super::error::AuthApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "User login", skip_all)]
pub async fn user_login<P, H, M>(
    State(state): State<AppState<P, H, M>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    P: PrincipalStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    M: EmailClient + Clone + 'static,
{
    login(&state, request, Role::User).await
}

#[tracing::instrument(name = "Admin login", skip_all)]
pub async fn admin_login<P, H, M>(
    State(state): State<AppState<P, H, M>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    P: PrincipalStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    M: EmailClient + Clone + 'static,
{
    login(&state, request, Role::Admin).await
}

/// The single login path both entry points share. A malformed email is
/// reported as invalid credentials, not a validation error: the lookup
/// could never match, and the failure must read the same as any other
/// bad credential.
async fn login<P, H, M>(
    state: &AppState<P, H, M>,
    request: LoginRequest,
    role: Role,
) -> Result<Json<AuthResponse>, AuthApiError>
where
    P: PrincipalStore,
    H: PasswordHasher,
{
    let email = Email::try_from(request.email).map_err(|_| AuthApiError::InvalidCredentials)?;
    let password =
        Password::try_from(request.password).map_err(|_| AuthApiError::InvalidCredentials)?;

    let use_case = LoginUseCase::new(&state.principal_store, &state.password_hasher);
    let principal = use_case.execute(email, password, role).await?;

    let token = generate_session_token(&principal, &state.config.jwt)
        .map_err(|e| AuthApiError::UnexpectedError(e.to_string()))?;

    Ok(Json(AuthResponse {
        user: principal.to_view(),
        token,
    }))
}
