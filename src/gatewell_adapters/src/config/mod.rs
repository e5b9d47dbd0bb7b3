pub mod settings;

pub use settings::{
    AllowedOrigins, AuthSettings, EmailSettings, PostgresSettings, RateLimitSettings,
    ResetSettings, ServerSettings, Settings,
};
