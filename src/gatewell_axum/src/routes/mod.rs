pub mod error;
pub mod forgot_password;
pub mod health;
pub mod login;
pub mod logout;
pub mod reset_password;
pub mod signup;
pub mod validate_session;

pub use forgot_password::forgot_password;
pub use health::health;
pub use login::{admin_login, user_login};
pub use logout::logout;
pub use reset_password::reset_password;
pub use signup::{admin_signup, user_signup};
pub use validate_session::validate_session;

use serde::Serialize;

use gatewell_core::PrincipalView;

/// Body returned by signup and login: the sanitized principal plus a
/// freshly issued session token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: PrincipalView,
    pub token: String,
}

/// Body returned by session validation.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: PrincipalView,
}

/// Generic one-line message body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
