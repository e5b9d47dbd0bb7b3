use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use gatewell_adapters::authentication::jwt_session::generate_session_token;
use gatewell_application::SignupUseCase;
use gatewell_core::{Email, EmailClient, Password, PasswordHasher, PrincipalStore, Role};

use crate::state::AppState;

use super::AuthResponse;
use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Deserialize)]
pub struct AdminSignupRequest {
    pub name: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
    #[serde(rename = "adminSecret")]
    pub admin_secret: Secret<String>,
}

#[tracing::instrument(name = "User signup", skip_all)]
pub async fn user_signup<P, H, M>(
    State(state): State<AppState<P, H, M>>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    P: PrincipalStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    M: EmailClient + Clone + 'static,
{
    signup(
        &state,
        request.name,
        request.email,
        request.password,
        Role::User,
        None,
    )
    .await
}

#[tracing::instrument(name = "Admin signup", skip_all)]
pub async fn admin_signup<P, H, M>(
    State(state): State<AppState<P, H, M>>,
    Json(request): Json<AdminSignupRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    P: PrincipalStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    M: EmailClient + Clone + 'static,
{
    signup(
        &state,
        request.name,
        request.email,
        request.password,
        Role::Admin,
        Some(request.admin_secret),
    )
    .await
}

async fn signup<P, H, M>(
    state: &AppState<P, H, M>,
    name: String,
    email: Secret<String>,
    password: Secret<String>,
    role: Role,
    admin_secret: Option<Secret<String>>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthApiError>
where
    P: PrincipalStore,
    H: PasswordHasher,
{
    let email = Email::try_from(email)?;
    let password = Password::try_from(password)?;

    if name.trim().is_empty() {
        return Err(AuthApiError::ValidationError(
            "Name must not be blank".to_owned(),
        ));
    }

    let use_case = SignupUseCase::new(
        &state.principal_store,
        &state.password_hasher,
        state.config.admin_signup_secret.as_ref(),
    );

    let principal = use_case
        .execute(name.trim().to_owned(), email, password, role, admin_secret.as_ref())
        .await?;

    let token = generate_session_token(&principal, &state.config.jwt)
        .map_err(|e| AuthApiError::UnexpectedError(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: principal.to_view(),
            token,
        }),
    ))
}
