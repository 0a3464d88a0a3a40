use async_trait::async_trait;
use crate::domain::entities::WebhookPayload;
use crate::application::errors::SendError;

/// Chat sender - posts payloads to a remote chat webhook
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Post a payload once. Failures are returned, never retried.
    async fn post(&self, payload: &WebhookPayload) -> Result<(), SendError>;
}
