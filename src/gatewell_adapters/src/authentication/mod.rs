pub mod jwt_session;

pub use jwt_session::{JwtConfig, SessionClaims, SessionTokenError};
