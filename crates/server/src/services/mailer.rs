//! Transactional mail client.
//!
//! Sends verification-code emails through the configured mail provider.
//! Delivery failures are reported to the caller, which decides whether they
//! fail the request; signup treats a lost email as recoverable because the
//! code can be resent.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MailerConfig;

/// Errors that can occur when sending mail.
#[derive(Debug, Error)]
pub enum MailerError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error response.
    #[error("provider error: {status} - {message}")]
    Provider { status: u16, message: String },

    /// Failed to build or parse a request/response.
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    name: &'a str,
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    success: bool,
    #[serde(rename = "messageId")]
    message_id: Option<String>,
    error: Option<String>,
}

/// HTTP client for the transactional mail provider.
#[derive(Clone)]
pub struct MailerClient {
    client: reqwest::Client,
    endpoint: String,
}

impl MailerClient {
    /// Create a new mail client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &MailerConfig) -> Result<Self, MailerError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| MailerError::Parse(format!("invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Send a verification-code email. Returns the provider's message ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects it.
    pub async fn send_verification_code(
        &self,
        to: &str,
        name: &str,
        code: &str,
    ) -> Result<Option<String>, MailerError> {
        let url = format!("{}/v1/send", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(&SendRequest { to, name, code })
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailerError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: SendResponse = response
            .json()
            .await
            .map_err(|e| MailerError::Parse(e.to_string()))?;

        if !body.success {
            return Err(MailerError::Provider {
                status: status.as_u16(),
                message: body.error.unwrap_or_else(|| "send failed".to_string()),
            });
        }

        Ok(body.message_id)
    }
}
