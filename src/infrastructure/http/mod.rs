//! HTTP receiver for Slack outgoing webhooks

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::application::messaging::{InboundOutcome, InboundReceiver, OutgoingWebhook};

/// Build the router serving the outgoing-webhook endpoint at `path`
pub fn router(receiver: InboundReceiver, path: &str) -> Router {
    Router::new()
        .route(path, post(outgoing_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(receiver)
}

pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    axum::serve(listener, router).await
}

/// Always answers 200 with an empty body; the caller learns nothing about
/// whether the message was relayed.
async fn outgoing_webhook(
    State(receiver): State<InboundReceiver>,
    form: Result<Form<OutgoingWebhook>, FormRejection>,
) {
    let hook = match form {
        Ok(Form(hook)) => hook,
        Err(e) => {
            tracing::warn!("Unreadable webhook call: {}", e);
            return;
        }
    };

    match receiver.accept(&hook) {
        InboundOutcome::Enqueued | InboundOutcome::FromBot => {}
        InboundOutcome::InvalidToken => tracing::warn!("Invalid token: {}", hook.token),
        InboundOutcome::QueueFull => tracing::debug!("Relay queue full, dropping message"),
        InboundOutcome::QueueClosed => tracing::warn!("Relay queue closed, dropping message"),
    }
}
