//! Slack incoming-webhook adapter

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

use crate::application::errors::SendError;
use crate::domain::entities::WebhookPayload;
use crate::domain::traits::ChatSender;

/// Form field the JSON document is posted under
const PAYLOAD_FIELD: &str = "payload";

/// JSON document Slack expects inside the `payload` field
#[derive(Debug, Serialize)]
struct WirePayload<'a> {
    channel: &'a str,
    text: &'a str,
    icon_emoji: &'a str,
    username: &'a str,
}

/// Posts payloads to a Slack incoming webhook
pub struct SlackWebhook {
    webhook_url: String,
    client: Client,
}

impl SlackWebhook {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self, SendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SendError::Transport(e.to_string()))?;

        Ok(Self {
            webhook_url: webhook_url.into(),
            client,
        })
    }

    /// Serialize a payload to the JSON carried in the form body
    pub fn encode(payload: &WebhookPayload) -> Result<String, SendError> {
        let wire = WirePayload {
            channel: &payload.channel,
            text: &payload.text,
            icon_emoji: payload.icon_emoji(),
            username: &payload.username,
        };
        serde_json::to_string(&wire).map_err(|e| SendError::Encode(e.to_string()))
    }
}

#[async_trait]
impl ChatSender for SlackWebhook {
    async fn post(&self, payload: &WebhookPayload) -> Result<(), SendError> {
        let json = Self::encode(payload)?;
        tracing::debug!("Posting to slack: {}", json);

        let response = self.client
            .post(&self.webhook_url)
            .form(&[(PAYLOAD_FIELD, json.as_str())])
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        Err(SendError::Rejected(status.as_u16(), body))
    }
}
