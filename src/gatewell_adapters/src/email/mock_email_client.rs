use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use gatewell_core::{Email, EmailClient, EmailClientError};

/// A password-reset email as captured by [`MockEmailClient`].
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub recipient: String,
    pub reset_url: String,
    pub display_name: String,
}

impl CapturedEmail {
    /// Pull the reset token back out of the mailed URL.
    pub fn reset_token(&self) -> Option<String> {
        self.reset_url
            .split_once("token=")
            .map(|(_, token)| token.to_owned())
    }
}

/// Capturing email client for tests: records every delivery instead of
/// sending it, so a test can fish the reset token out of the "mailbox".
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<CapturedEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<CapturedEmail> {
        self.sent.read().await.clone()
    }

    pub async fn last_sent(&self) -> Option<CapturedEmail> {
        self.sent.read().await.last().cloned()
    }
}

#[async_trait]
impl EmailClient for MockEmailClient {
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        reset_url: &str,
        display_name: &str,
    ) -> Result<(), EmailClientError> {
        self.sent.write().await.push(CapturedEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            reset_url: reset_url.to_owned(),
            display_name: display_name.to_owned(),
        });
        Ok(())
    }
}
