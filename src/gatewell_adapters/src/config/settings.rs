use axum::http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

/// Service configuration, loaded from an optional `gatewell.toml` plus
/// `GATEWELL_`-prefixed environment overrides (`GATEWELL__AUTH__JWT_SECRET`
/// and friends). Secrets stay wrapped from deserialization onward.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub reset: ResetSettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    /// Absent section = email delivery disabled, which is a valid state.
    #[serde(default)]
    pub email: Option<EmailSettings>,
    #[serde(default)]
    pub postgres: PostgresSettings,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .add_source(config::File::with_name("gatewell").required(false))
            .add_source(config::Environment::with_prefix("GATEWELL").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: i64,
    /// Shared secret gating the admin signup path; absent = path closed.
    #[serde(default)]
    pub admin_signup_secret: Option<Secret<String>>,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetSettings {
    #[serde(default = "default_reset_ttl_seconds")]
    pub token_ttl_seconds: i64,
    #[serde(default = "default_reset_url_base")]
    pub url_base: String,
}

impl Default for ResetSettings {
    fn default() -> Self {
        Self {
            token_ttl_seconds: default_reset_ttl_seconds(),
            url_base: default_reset_url_base(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_rate_limit_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_rate_limit_window_seconds")]
    pub window_seconds: u64,
    /// Honor X-Forwarded-For / X-Real-Ip when resolving the client
    /// origin. Only safe behind a proxy that overwrites those headers;
    /// enabling it anywhere else hands callers a rate-limit bypass.
    #[serde(default)]
    pub trust_proxy: bool,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: default_rate_limit_max_requests(),
            window_seconds: default_rate_limit_window_seconds(),
            trust_proxy: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    #[serde(default = "default_email_timeout_millis")]
    pub timeout_millis: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostgresSettings {
    /// Absent = run on the in-memory store (development only).
    #[serde(default)]
    pub url: Option<Secret<String>>,
}

/// CORS allow-list of exact origins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|candidate| self.0.iter().any(|allowed| allowed == candidate))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    3000
}

// 7 days
fn default_token_ttl_seconds() -> i64 {
    7 * 24 * 60 * 60
}

// 1 hour
fn default_reset_ttl_seconds() -> i64 {
    3600
}

fn default_reset_url_base() -> String {
    "http://localhost:3000/reset-password".to_owned()
}

fn default_rate_limit_max_requests() -> u32 {
    3
}

// 15 minutes
fn default_rate_limit_window_seconds() -> u64 {
    900
}

fn default_email_timeout_millis() -> u64 {
    10_000
}
