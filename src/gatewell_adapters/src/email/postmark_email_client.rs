use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use gatewell_core::{Email, EmailClient, EmailClientError};

/// Postmark-backed email client for the credential-recovery flow.
///
/// The `reqwest::Client` carries the delivery timeout, so a slow mail
/// API can never hold an HTTP response hostage.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending password reset email", skip_all)]
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        reset_url: &str,
        display_name: &str,
    ) -> Result<(), EmailClientError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| EmailClientError::DeliveryFailed(e.to_string()))?;
        let url = base
            .join("/email")
            .map_err(|e| EmailClientError::DeliveryFailed(e.to_string()))?;

        let html_body = format!(
            "<p>Hi {display_name},</p>\
             <p>We received a request to reset your password. The link below is \
             valid for one hour and can be used once:</p>\
             <p><a href=\"{reset_url}\">{reset_url}</a></p>\
             <p>If you did not request this, you can ignore this email.</p>"
        );
        let text_body = format!(
            "Hi {display_name},\n\n\
             We received a request to reset your password. The link below is \
             valid for one hour and can be used once:\n\n{reset_url}\n\n\
             If you did not request this, you can ignore this email.\n"
        );

        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject: PASSWORD_RESET_SUBJECT,
            html_body: &html_body,
            text_body: &text_body,
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| EmailClientError::DeliveryFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| EmailClientError::DeliveryFailed(e.to_string()))?;

        Ok(())
    }
}

const PASSWORD_RESET_SUBJECT: &str = "Reset your password";
const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
