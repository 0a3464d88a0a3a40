use std::time::Duration;
use tokio::sync::mpsc;
use crate::domain::entities::WebhookPayload;
use crate::domain::traits::IrcSender;

/// Pause after every message written to IRC
pub const DEFAULT_SEND_DELAY: Duration = Duration::from_secs(1);

/// Relay loop - drains the inbound queue into IRC, one message per delay
pub struct RelayService<S: IrcSender> {
    irc: S,
    queue: mpsc::Receiver<WebhookPayload>,
    delay: Duration,
}

impl<S: IrcSender> RelayService<S> {
    pub fn new(irc: S, queue: mpsc::Receiver<WebhookPayload>) -> Self {
        Self {
            irc,
            queue,
            delay: DEFAULT_SEND_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Run until every queue sender is gone
    pub async fn run(mut self) {
        tracing::info!("Relay loop started (delay {:?})", self.delay);

        while let Some(payload) = self.queue.recv().await {
            tracing::debug!("Relaying to {}: {}", payload.channel, payload.text);
            self.irc.send(&payload.channel, &payload.text);
            tokio::time::sleep(self.delay).await;
        }

        tracing::info!("Relay queue closed, stopping relay loop");
    }
}
