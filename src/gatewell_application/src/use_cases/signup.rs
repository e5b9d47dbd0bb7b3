use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use gatewell_core::{
    Email, Password, PasswordHashError, PasswordHasher, Principal, PrincipalStore,
    PrincipalStoreError, Role,
};

/// Error types specific to the signup use case
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Email already registered")]
    EmailExists,
    #[error("Invalid admin provisioning secret")]
    InvalidAdminSecret,
    #[error("Store error: {0}")]
    StoreError(PrincipalStoreError),
    #[error("Password hashing error: {0}")]
    HasherError(#[from] PasswordHashError),
}

/// Signup use case - creates a principal with the requested role.
///
/// The admin path is gated by a shared provisioning secret which is
/// checked before any store mutation; when no secret is configured the
/// admin path is closed entirely.
pub struct SignupUseCase<'a, P, H>
where
    P: PrincipalStore,
    H: PasswordHasher,
{
    principal_store: &'a P,
    password_hasher: &'a H,
    admin_signup_secret: Option<&'a Secret<String>>,
}

impl<'a, P, H> SignupUseCase<'a, P, H>
where
    P: PrincipalStore,
    H: PasswordHasher,
{
    pub fn new(
        principal_store: &'a P,
        password_hasher: &'a H,
        admin_signup_secret: Option<&'a Secret<String>>,
    ) -> Self {
        Self {
            principal_store,
            password_hasher,
            admin_signup_secret,
        }
    }

    /// Execute the signup use case
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `email` - Validated, normalized email address
    /// * `password` - Validated password
    /// * `role` - Role of the new principal
    /// * `admin_secret` - Provisioning secret supplied by the caller (admin path)
    ///
    /// # Returns
    /// The newly created principal, ready for token issuance
    #[tracing::instrument(name = "SignupUseCase::execute", skip_all, fields(role = %role))]
    pub async fn execute(
        &self,
        name: String,
        email: Email,
        password: Password,
        role: Role,
        admin_secret: Option<&Secret<String>>,
    ) -> Result<Principal, SignupError> {
        if role.is_admin() {
            self.check_admin_secret(admin_secret)?;
        }

        let password_hash = self.password_hasher.hash(&password).await?;
        let principal = Principal::new(name, email, password_hash, role);

        match self.principal_store.add_principal(principal.clone()).await {
            Ok(()) => Ok(principal),
            Err(PrincipalStoreError::EmailAlreadyExists) => Err(SignupError::EmailExists),
            Err(e) => Err(SignupError::StoreError(e)),
        }
    }

    fn check_admin_secret(&self, provided: Option<&Secret<String>>) -> Result<(), SignupError> {
        match (self.admin_signup_secret, provided) {
            (Some(expected), Some(provided))
                if expected.expose_secret() == provided.expose_secret() =>
            {
                Ok(())
            }
            _ => Err(SignupError::InvalidAdminSecret),
        }
    }
}
