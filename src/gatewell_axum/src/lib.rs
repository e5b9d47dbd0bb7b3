//! Axum surface for the Gatewell authentication core.
//!
//! Handlers here are thin: they parse the wire shapes, run the matching
//! use case, and translate layer errors into the one client-facing
//! error type. Everything enumeration-sensitive (login, forgot/reset
//! password) funnels through a single code path per operation so the
//! uniform-failure contract holds structurally.

pub mod extract;
pub mod routes;
pub mod state;

pub use routes::error::{AuthApiError, ErrorResponse};
pub use state::{AppState, ServiceConfig};
