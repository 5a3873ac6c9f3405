//! Transactional-email relay client for the contact form.
//!
//! Fire-and-forget: one POST per submission, no retry. Success or failure
//! surfaces to the UI only as a transient notification.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;

use crate::config::MailRelayConfig;

/// Errors that can occur when submitting a message to the relay.
#[derive(Debug, Error)]
pub enum MailError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// A contact-form submission.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Client for the transactional-email relay.
#[derive(Clone)]
pub struct MailClient {
    client: reqwest::Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    api_key: SecretString,
}

impl MailClient {
    /// Create a new relay client.
    #[must_use]
    pub fn new(config: &MailRelayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Submit a contact message to the relay.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the relay rejects it. The
    /// caller surfaces this as a notification; nothing is retried.
    #[instrument(skip(self, message), fields(email = %message.email))]
    pub async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), MailError> {
        let body = self.build_payload(message);

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "Mail relay rejected contact message"
            );
            return Err(MailError::Api {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        tracing::info!("contact message submitted");
        Ok(())
    }

    fn build_payload(&self, message: &ContactMessage) -> serde_json::Value {
        serde_json::json!({
            "service_id": self.service_id,
            "template_id": self.template_id,
            "user_id": self.api_key.expose_secret(),
            "template_params": {
                "from_name": message.name.trim(),
                "from_email": message.email.trim(),
                "subject": message.subject.trim(),
                "message": message.message.trim(),
            }
        })
    }
}

/// Minimal email syntax check for the contact-form boundary.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}
