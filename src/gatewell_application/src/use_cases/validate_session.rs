use thiserror::Error;

use gatewell_core::{Principal, PrincipalId, PrincipalStore, PrincipalStoreError};

/// Error types specific to session validation
#[derive(Debug, Error)]
pub enum ValidateSessionError {
    /// The principal behind a still-valid token no longer exists or has
    /// been deactivated. Both read the same from outside.
    #[error("User is inactive")]
    UserInactive,
    #[error("Store error: {0}")]
    StoreError(PrincipalStoreError),
}

/// Session validation use case - re-checks live principal state.
///
/// Token signature and expiry are verified before this point; what
/// remains is confirming the principal is still present and active so a
/// deactivation takes effect on the next validation call instead of at
/// token expiry.
pub struct ValidateSessionUseCase<'a, P>
where
    P: PrincipalStore,
{
    principal_store: &'a P,
}

impl<'a, P> ValidateSessionUseCase<'a, P>
where
    P: PrincipalStore,
{
    pub fn new(principal_store: &'a P) -> Self {
        Self { principal_store }
    }

    /// Returns the current principal record, not the token claims, so
    /// callers always see live name/email/role state.
    #[tracing::instrument(name = "ValidateSessionUseCase::execute", skip_all)]
    pub async fn execute(&self, principal_id: &PrincipalId) -> Result<Principal, ValidateSessionError> {
        let principal = match self.principal_store.find_by_id(principal_id).await {
            Ok(principal) => principal,
            Err(PrincipalStoreError::PrincipalNotFound) => {
                return Err(ValidateSessionError::UserInactive);
            }
            Err(e) => return Err(ValidateSessionError::StoreError(e)),
        };

        if !principal.is_active() {
            return Err(ValidateSessionError::UserInactive);
        }

        Ok(principal)
    }
}
