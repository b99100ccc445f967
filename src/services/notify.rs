use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Client for the outbound mail relay. When no endpoint is configured the
/// notification is logged and dropped, which keeps local development working
/// without a relay.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    endpoint: Option<String>,
    sender: String,
}

impl Notifier {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.notify_endpoint.clone(),
            sender: config.notify_sender.clone(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let Some(endpoint) = &self.endpoint else {
            tracing::info!(to = %to, subject = %subject, "Mail relay not configured, dropping notification");
            return Ok(());
        };

        let payload = MailPayload {
            from: &self.sender,
            to,
            subject,
            body,
        };

        let response = self
            .client
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reach mail relay: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Mail relay rejected notification: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Send on a detached task. The caller's state change is already durable,
    /// so a delivery failure is logged and goes no further.
    pub fn dispatch(&self, to: String, subject: String, body: String) {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send(&to, &subject, &body).await {
                tracing::warn!(to = %to, subject = %subject, error = %e, "Notification dispatch failed");
            }
        });
    }
}
