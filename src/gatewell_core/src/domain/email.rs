use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

// Deliberately loose: one local part, one @, a domain with a dot. The
// mail provider is the real authority on deliverability.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Invalid email address")]
    InvalidFormat,
}

/// A validated, normalized email address.
///
/// Construction trims surrounding whitespace and lowercases the input so
/// the same mailbox always maps to the same `Email` value. Signup and
/// login both go through this constructor, which is what makes the
/// store's per-email uniqueness meaningful.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let normalized = value.expose_secret().trim().to_lowercase();
        if !EMAIL_SHAPE.is_match(&normalized) {
            return Err(EmailError::InvalidFormat);
        }
        Ok(Self(Secret::from(normalized)))
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
