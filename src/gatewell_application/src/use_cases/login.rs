use chrono::Utc;
use thiserror::Error;

use gatewell_core::{
    Email, Password, PasswordHashError, PasswordHasher, Principal, PrincipalStore,
    PrincipalStoreError, Role,
};

/// Error types specific to the login use case
#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown email, role mismatch and wrong password all collapse here
    /// so none of them is distinguishable from outside.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is deactivated")]
    AccountInactive,
    #[error("Store error: {0}")]
    StoreError(PrincipalStoreError),
    #[error("Password hashing error: {0}")]
    HasherError(PasswordHashError),
}

/// Login use case - authenticates a principal against one role.
///
/// There is exactly one of these; the user and admin entry points differ
/// only in the `Role` they pass, which keeps their failure behavior
/// identical by construction rather than by convention.
pub struct LoginUseCase<'a, P, H>
where
    P: PrincipalStore,
    H: PasswordHasher,
{
    principal_store: &'a P,
    password_hasher: &'a H,
}

impl<'a, P, H> LoginUseCase<'a, P, H>
where
    P: PrincipalStore,
    H: PasswordHasher,
{
    pub fn new(principal_store: &'a P, password_hasher: &'a H) -> Self {
        Self {
            principal_store,
            password_hasher,
        }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `email` - Validated, normalized email address
    /// * `password` - Candidate password
    /// * `role` - Role of the entry point being used
    ///
    /// # Returns
    /// The authenticated principal with login bookkeeping applied
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all, fields(role = %role))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        role: Role,
    ) -> Result<Principal, LoginError> {
        let mut principal = match self
            .principal_store
            .find_by_email_and_role(&email, role)
            .await
        {
            Ok(principal) => principal,
            Err(PrincipalStoreError::PrincipalNotFound) => {
                return Err(LoginError::InvalidCredentials);
            }
            Err(e) => return Err(LoginError::StoreError(e)),
        };

        match self
            .password_hasher
            .verify(&password, principal.password_hash())
            .await
        {
            Ok(()) => {}
            Err(PasswordHashError::PasswordMismatch) => {
                return Err(LoginError::InvalidCredentials);
            }
            Err(e) => return Err(LoginError::HasherError(e)),
        }

        if !principal.is_active() {
            return Err(LoginError::AccountInactive);
        }

        // Bookkeeping is best-effort: a store hiccup here must not turn a
        // correct login into a failure.
        let now = Utc::now();
        if let Err(e) = self.principal_store.record_login(principal.id(), now).await {
            tracing::warn!(
                principal_id = %principal.id(),
                error = %e,
                "failed to persist login bookkeeping"
            );
        }
        principal.record_login(now);

        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        MockPasswordHasher, MockPrincipalStore, email, password, seeded_principal,
    };

    #[tokio::test]
    async fn login_succeeds_and_records_bookkeeping() {
        let store = MockPrincipalStore::new();
        let hasher = MockPasswordHasher;
        store
            .seed(seeded_principal("client@example.com", "pw123456", Role::User))
            .await;

        let use_case = LoginUseCase::new(&store, &hasher);
        let principal = use_case
            .execute(email("client@example.com"), password("pw123456"), Role::User)
            .await
            .unwrap();

        assert_eq!(principal.login_count(), 1);
        assert!(principal.last_login().is_some());

        // Durable state was updated too
        let stored = store.find_by_email(&email("client@example.com")).await.unwrap();
        assert_eq!(stored.login_count(), 1);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let store = MockPrincipalStore::new();
        let hasher = MockPasswordHasher;
        store
            .seed(seeded_principal("client@example.com", "pw123456", Role::User))
            .await;

        let use_case = LoginUseCase::new(&store, &hasher);
        let result = use_case
            .execute(email("client@example.com"), password("different"), Role::User)
            .await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_role_fail_identically() {
        let store = MockPrincipalStore::new();
        let hasher = MockPasswordHasher;
        // An admin credential presented at the user entry point...
        store
            .seed(seeded_principal("admin@example.com", "pw123456", Role::Admin))
            .await;

        let use_case = LoginUseCase::new(&store, &hasher);

        let wrong_role = use_case
            .execute(email("admin@example.com"), password("pw123456"), Role::User)
            .await
            .unwrap_err();
        let unknown = use_case
            .execute(email("ghost@example.com"), password("pw123456"), Role::User)
            .await
            .unwrap_err();

        // ...must be indistinguishable from an email that never existed
        assert!(matches!(wrong_role, LoginError::InvalidCredentials));
        assert!(matches!(unknown, LoginError::InvalidCredentials));
        assert_eq!(wrong_role.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn inactive_account_is_rejected_after_password_check() {
        let store = MockPrincipalStore::new();
        let hasher = MockPasswordHasher;
        let mut principal = seeded_principal("client@example.com", "pw123456", Role::User);
        principal.deactivate();
        store.seed(principal).await;

        let use_case = LoginUseCase::new(&store, &hasher);
        let result = use_case
            .execute(email("client@example.com"), password("pw123456"), Role::User)
            .await;
        assert!(matches!(result, Err(LoginError::AccountInactive)));

        // But a wrong password on an inactive account still reads as
        // invalid credentials, not as an inactive account
        let result = use_case
            .execute(email("client@example.com"), password("different"), Role::User)
            .await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn bookkeeping_failure_does_not_fail_login() {
        let store = MockPrincipalStore::new();
        let hasher = MockPasswordHasher;
        store
            .seed(seeded_principal("client@example.com", "pw123456", Role::User))
            .await;
        store.fail_record_login().await;

        let use_case = LoginUseCase::new(&store, &hasher);
        let result = use_case
            .execute(email("client@example.com"), password("pw123456"), Role::User)
            .await;
        assert!(result.is_ok());
    }
}
