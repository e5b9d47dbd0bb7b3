use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use gatewell_application::ResetPasswordUseCase;
use gatewell_core::{EmailClient, Password, PasswordHasher, PrincipalStore};

use crate::state::AppState;

use super::MessageResponse;
use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: Secret<String>,
}

/// Consume a reset token and install a new password. The new password
/// is held to the same policy as signup; token failures of every flavor
/// come back as one uniform 400.
#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<P, H, M>(
    State(state): State<AppState<P, H, M>>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    P: PrincipalStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    M: EmailClient + Clone + 'static,
{
    let password = Password::try_from(request.password)?;

    let use_case = ResetPasswordUseCase::new(&state.principal_store, &state.password_hasher);
    use_case.execute(&request.token, password).await?;

    Ok(Json(MessageResponse::new(
        "Password updated. Please log in with your new password.",
    )))
}
