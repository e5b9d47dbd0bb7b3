use std::time::Duration;

use color_eyre::eyre::Result;
use gatewell::{
    Argon2PasswordHasher, AuthService, Email, EmailDelivery, ExposeSecret, InMemoryPrincipalStore,
    JwtConfig, PostgresPrincipalStore, PostmarkEmailClient, Secret, ServiceConfig,
    adapters::config::Settings,
};
use reqwest::Client as HttpClient;
use sqlx::postgres::PgPoolOptions;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let settings = Settings::load()?;

    // Email delivery is optional; running without it is a supported
    // state in which reset emails are dropped with a log line.
    let email_client = match &settings.email {
        Some(email) => {
            let http_client = HttpClient::builder()
                .timeout(Duration::from_millis(email.timeout_millis))
                .build()?;

            EmailDelivery::Configured(PostmarkEmailClient::new(
                email.base_url.clone(),
                Email::try_from(Secret::from(email.sender.clone()))?,
                email.auth_token.clone(),
                http_client,
            ))
        }
        None => {
            tracing::warn!("email is not configured; password reset emails will not be delivered");
            EmailDelivery::Disabled
        }
    };

    let config = ServiceConfig {
        jwt: JwtConfig {
            jwt_secret: settings.auth.jwt_secret.clone(),
            token_ttl_in_seconds: settings.auth.token_ttl_seconds,
        },
        admin_signup_secret: settings.auth.admin_signup_secret.clone(),
        reset_url_base: settings.reset.url_base.clone(),
        reset_token_ttl_seconds: settings.reset.token_ttl_seconds,
        rate_limit_max_requests: settings.rate_limit.max_requests,
        rate_limit_window_seconds: settings.rate_limit.window_seconds,
        trust_proxy: settings.rate_limit.trust_proxy,
    };

    let allowed_origins = (!settings.auth.allowed_origins.is_empty())
        .then(|| settings.auth.allowed_origins.clone());

    let listener =
        tokio::net::TcpListener::bind((settings.server.host.as_str(), settings.server.port))
            .await?;

    match &settings.postgres.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url.expose_secret())
                .await?;

            // Run database migrations
            sqlx::migrate!().run(&pg_pool).await?;

            let service = AuthService::new(
                PostgresPrincipalStore::new(pg_pool),
                Argon2PasswordHasher::new(),
                email_client,
                config,
            );
            service.run_standalone(listener, allowed_origins).await?;
        }
        None => {
            tracing::warn!(
                "postgres is not configured; principals will live in process memory only"
            );

            let service = AuthService::new(
                InMemoryPrincipalStore::new(),
                Argon2PasswordHasher::new(),
                email_client,
                config,
            );
            service.run_standalone(listener, allowed_origins).await?;
        }
    }

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
