use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use gatewell_adapters::{SlidingWindowRateLimiter, config::AllowedOrigins};
use gatewell_axum::{
    AppState, ServiceConfig,
    routes::{
        admin_login, admin_signup, forgot_password, health, logout, reset_password, user_login,
        user_signup, validate_session,
    },
};
use gatewell_core::{EmailClient, PasswordHasher, PrincipalStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main authentication service that provides all auth-related routes
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService with the provided collaborators
    ///
    /// # Arguments
    /// * `principal_store` - Credential store (must be Clone)
    /// * `password_hasher` - One-way password hasher (must be Clone)
    /// * `email_client` - Outbound mail for credential recovery (must be Clone)
    /// * `config` - Token, reset and rate-limit configuration
    ///
    /// # Note on Architecture
    /// Collaborators implement Clone via internal Arc state for
    /// thread-safe sharing; one `AppState` clone per request is cheap.
    /// The rate limiter guards only the forgot-password entry point.
    pub fn new<P, H, M>(
        principal_store: P,
        password_hasher: H,
        email_client: M,
        config: ServiceConfig,
    ) -> Self
    where
        P: PrincipalStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        M: EmailClient + Clone + 'static,
    {
        let rate_limiter = Arc::new(SlidingWindowRateLimiter::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window_seconds),
        ));

        let state = AppState {
            principal_store,
            password_hasher,
            email_client,
            config,
            rate_limiter,
        };

        let router = Router::new()
            .route("/auth/user/signup", post(user_signup::<P, H, M>))
            .route("/auth/admin/signup", post(admin_signup::<P, H, M>))
            .route("/auth/user/login", post(user_login::<P, H, M>))
            .route("/auth/admin/login", post(admin_login::<P, H, M>))
            .route("/auth/validate-session", get(validate_session::<P, H, M>))
            .route("/auth/logout", post(logout::<P, H, M>))
            .route("/auth/forgot-password", post(forgot_password::<P, H, M>))
            .route("/auth/reset-password", post(reset_password::<P, H, M>))
            .route("/health", get(health))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a nested router that can be mounted
    /// on another application's router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        // ConnectInfo feeds the rate limiter its per-origin key
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }
}
