use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};

use gatewell_adapters::authentication::jwt_session::validate_session_token;
use gatewell_core::{EmailClient, PasswordHasher, PrincipalStore};

use crate::extract::bearer_token;
use crate::state::AppState;

use super::MessageResponse;

/// Advisory logout: the event is logged when the token decodes, and the
/// call always succeeds. Session tokens are stateless with no
/// revocation list, so the presented token stays valid for any holder
/// until it expires; clients discard their copy and move on.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<P, H, M>(
    State(state): State<AppState<P, H, M>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    P: PrincipalStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    M: EmailClient + Clone + 'static,
{
    match bearer_token(&headers) {
        Some(token) => match validate_session_token(token, &state.config.jwt) {
            Ok(claims) => {
                tracing::info!(
                    target: "auth.logout",
                    principal_id = %claims.sub,
                    "principal logged out"
                );
            }
            Err(_) => {
                tracing::debug!(target: "auth.logout", "logout with undecodable token");
            }
        },
        None => {
            tracing::debug!(target: "auth.logout", "logout without token");
        }
    }

    Json(MessageResponse::new("Logged out"))
}
