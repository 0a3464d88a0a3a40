//! Inbound receiver - Turns Slack outgoing-webhook calls into queued payloads

use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use crate::domain::entities::WebhookPayload;

/// Capacity of the queue between the HTTP receiver and the relay loop
pub const QUEUE_CAPACITY: usize = 10;

/// Create the bounded queue feeding the relay loop
pub fn relay_queue(capacity: usize) -> (mpsc::Sender<WebhookPayload>, mpsc::Receiver<WebhookPayload>) {
    mpsc::channel(capacity.max(1))
}

/// Form fields posted by a Slack outgoing webhook. Missing fields read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutgoingWebhook {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub text: String,
}

/// What happened to an inbound call. Never reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundOutcome {
    Enqueued,
    InvalidToken,
    FromBot,
    QueueFull,
    QueueClosed,
}

#[derive(Clone)]
pub struct InboundReceiver {
    token: String,
    irc_channel: String,
    queue: mpsc::Sender<WebhookPayload>,
}

impl InboundReceiver {
    pub fn new(token: impl Into<String>, irc_channel: impl Into<String>, queue: mpsc::Sender<WebhookPayload>) -> Self {
        Self {
            token: token.into(),
            irc_channel: irc_channel.into(),
            queue,
        }
    }

    /// Validate and enqueue without blocking. A full queue drops the message.
    pub fn accept(&self, hook: &OutgoingWebhook) -> InboundOutcome {
        if hook.token != self.token {
            return InboundOutcome::InvalidToken;
        }

        let Some(payload) = WebhookPayload::from_slack(&self.irc_channel, &hook.user_name, &hook.text) else {
            return InboundOutcome::FromBot;
        };

        match self.queue.try_send(payload) {
            Ok(()) => InboundOutcome::Enqueued,
            Err(TrySendError::Full(_)) => InboundOutcome::QueueFull,
            Err(TrySendError::Closed(_)) => InboundOutcome::QueueClosed,
        }
    }
}
