pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    password::{Password, PasswordError},
    principal::{PendingReset, Principal, PrincipalId, PrincipalView},
    reset_token::ResetToken,
    role::Role,
};

pub use ports::{
    repositories::{PrincipalStore, PrincipalStoreError},
    services::{EmailClient, EmailClientError, PasswordHashError, PasswordHasher},
};
