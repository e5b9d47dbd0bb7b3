pub mod authentication;
pub mod config;
pub mod email;
pub mod hashing;
pub mod persistence;
pub mod ratelimit;

pub use authentication::jwt_session::{JwtConfig, SessionClaims, SessionTokenError};
pub use email::{EmailDelivery, MockEmailClient, PostmarkEmailClient};
pub use hashing::Argon2PasswordHasher;
pub use persistence::{InMemoryPrincipalStore, PostgresPrincipalStore};
pub use ratelimit::SlidingWindowRateLimiter;
