//! # Gatewell - Authentication Service Library
//!
//! This is a facade crate that re-exports all public APIs from the
//! Gatewell auth service components. Use this crate to get access to
//! the full authentication and credential-recovery functionality in one
//! place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Principal`, `Role`, etc.
//! - **Ports**: `PrincipalStore`, `PasswordHasher`, `EmailClient`
//! - **Use cases**: `SignupUseCase`, `LoginUseCase`, `ForgotPasswordUseCase`, etc.
//! - **Adapters**: `PostgresPrincipalStore`, `Argon2PasswordHasher`,
//!   `PostmarkEmailClient`, `SlidingWindowRateLimiter`, etc.
//! - **Service**: `AuthService` - the composed HTTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gatewell_core::*;
}

// Re-export most commonly used core types at the root level
pub use gatewell_core::{
    Email, EmailError, Password, PasswordError, PendingReset, Principal, PrincipalId,
    PrincipalView, ResetToken, Role,
};

// ============================================================================
// Ports
// ============================================================================

/// Collaborator trait definitions
pub mod ports {
    pub use gatewell_core::{
        EmailClient, EmailClientError, PasswordHashError, PasswordHasher, PrincipalStore,
        PrincipalStoreError,
    };
}

// Re-export ports at root level
pub use gatewell_core::{
    EmailClient, EmailClientError, PasswordHashError, PasswordHasher, PrincipalStore,
    PrincipalStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatewell_application::*;
}

// Re-export use cases at root level
pub use gatewell_application::{
    ForgotPasswordUseCase, LoginUseCase, ResetPasswordUseCase, SignupUseCase,
    ValidateSessionUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use gatewell_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use gatewell_adapters::email::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use gatewell_adapters::hashing::*;
    }

    /// Session token issuing and validation
    pub mod authentication {
        pub use gatewell_adapters::authentication::*;
    }

    /// Rate limiting
    pub mod ratelimit {
        pub use gatewell_adapters::ratelimit::*;
    }

    /// Configuration
    pub mod config {
        pub use gatewell_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use gatewell_adapters::{
    Argon2PasswordHasher, EmailDelivery, InMemoryPrincipalStore, JwtConfig, MockEmailClient,
    PostgresPrincipalStore, PostmarkEmailClient, SessionClaims, SlidingWindowRateLimiter,
};

// ============================================================================
// HTTP Surface
// ============================================================================

/// Axum routes and API error type
pub mod http {
    pub use gatewell_axum::*;
}

pub use gatewell_axum::{AppState, AuthApiError, ServiceConfig};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use gatewell_auth_service::AuthService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing collaborator traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

/// Re-export axum for nesting the service router into a host application
pub use axum;
