pub mod mock_email_client;
pub mod postmark_email_client;

use async_trait::async_trait;

use gatewell_core::{Email, EmailClient, EmailClientError};

pub use mock_email_client::MockEmailClient;
pub use postmark_email_client::PostmarkEmailClient;

/// Email delivery as an explicit state, not a lazily-initialized global.
///
/// An unconfigured mailer is a valid deployment (local development, test
/// environments): delivery short-circuits with a log line and the
/// forgot-password flow proceeds unchanged. Only delivery *attempts*
/// can fail.
#[derive(Clone)]
pub enum EmailDelivery {
    Configured(PostmarkEmailClient),
    Disabled,
}

#[async_trait]
impl EmailClient for EmailDelivery {
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        reset_url: &str,
        display_name: &str,
    ) -> Result<(), EmailClientError> {
        match self {
            EmailDelivery::Configured(client) => {
                client
                    .send_password_reset_email(recipient, reset_url, display_name)
                    .await
            }
            EmailDelivery::Disabled => {
                tracing::info!("email delivery disabled; dropping password reset email");
                Err(EmailClientError::NotConfigured)
            }
        }
    }
}
