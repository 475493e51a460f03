use std::time::Duration;

use anyhow::Context as _;
use serde::Serialize;

use crate::config::MailConfig;
use crate::domain::repository::NotificationSender;
use crate::error::AuthServiceError;

const RELAY_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends plain-text mail through an HTTP relay (`POST {from, to, subject, text}`,
/// bearer-authenticated). Anything but a 2xx is a delivery failure.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(config: &MailConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(RELAY_TIMEOUT)
            .build()
            .context("build mail relay client")?;
        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from_address.clone(),
        })
    }
}

impl NotificationSender for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AuthServiceError> {
        let request = MailRequest {
            from: &self.from,
            to,
            subject,
            text: body,
        };
        self.client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .context("mail relay request")
            .map_err(AuthServiceError::DeliveryFailed)?;
        Ok(())
    }
}
