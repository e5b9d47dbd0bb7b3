use std::sync::Arc;

use secrecy::Secret;

use gatewell_adapters::{JwtConfig, SlidingWindowRateLimiter};

/// Runtime configuration shared by every route handler.
#[derive(Clone)]
pub struct ServiceConfig {
    pub jwt: JwtConfig,
    /// Shared secret gating admin signup; `None` closes the admin path.
    pub admin_signup_secret: Option<Secret<String>>,
    /// Base URL the reset token is appended to in outbound email.
    pub reset_url_base: String,
    pub reset_token_ttl_seconds: i64,
    /// Forgot-password sliding window: admitted requests per origin.
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_seconds: u64,
    /// Honor forwarding headers when keying the rate limiter.
    pub trust_proxy: bool,
}

/// Per-request handler state: the collaborator set plus configuration.
///
/// Store, hasher and mailer are injected as generics so tests can swap
/// any of them without touching the routes.
#[derive(Clone)]
pub struct AppState<P, H, M> {
    pub principal_store: P,
    pub password_hasher: H,
    pub email_client: M,
    pub config: ServiceConfig,
    pub rate_limiter: Arc<SlidingWindowRateLimiter>,
}
