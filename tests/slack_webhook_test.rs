//! Slack webhook sender tests against a local HTTP server
//!
//! Run with: cargo test --test slack_webhook_test

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;

use sirbot::application::errors::SendError;
use sirbot::domain::entities::WebhookPayload;
use sirbot::domain::traits::ChatSender;
use sirbot::infrastructure::adapters::slack::SlackWebhook;

#[derive(Clone)]
struct FakeHook {
    received: Arc<Mutex<Vec<String>>>,
    status: StatusCode,
    body: &'static str,
    delay: Duration,
}

async fn capture(State(hook): State<FakeHook>, Form(form): Form<HashMap<String, String>>) -> (StatusCode, &'static str) {
    hook.received
        .lock()
        .unwrap()
        .push(form.get("payload").cloned().unwrap_or_default());
    tokio::time::sleep(hook.delay).await;
    (hook.status, hook.body)
}

/// Spawn a fake incoming webhook; returns its URL and the captured `payload` fields
async fn spawn_hook(status: StatusCode, body: &'static str, delay: Duration) -> (String, Arc<Mutex<Vec<String>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let hook = FakeHook {
        received: received.clone(),
        status,
        body,
        delay,
    };
    let router = Router::new().route("/services/hook", post(capture)).with_state(hook);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });

    (format!("http://{}/services/hook", addr), received)
}

#[tokio::test]
async fn test_post_sends_payload_form_field() {
    let (url, received) = spawn_hook(StatusCode::OK, "ok", Duration::ZERO).await;
    let slack = SlackWebhook::new(url, Duration::from_secs(5)).unwrap();

    let payload = WebhookPayload::from_irc("#relay", "bob", "#general", "hi");
    slack.post(&payload).await.expect("post should succeed");

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let json: serde_json::Value = serde_json::from_str(&received[0]).unwrap();
    assert_eq!(json["channel"], "#relay");
    assert_eq!(json["text"], "hi");
    assert_eq!(json["username"], "bob[#general]");
    assert_eq!(json["icon_emoji"], "");
}

#[tokio::test]
async fn test_rejected_post_carries_body_and_is_not_retried() {
    let (url, received) = spawn_hook(StatusCode::INTERNAL_SERVER_ERROR, "server error", Duration::ZERO).await;
    let slack = SlackWebhook::new(url, Duration::from_secs(5)).unwrap();

    let err = slack
        .post(&WebhookPayload::from_irc("#relay", "bob", "#general", "hi"))
        .await
        .unwrap_err();

    assert_eq!(err, SendError::Rejected(500, "server error".to_string()));
    assert!(err.to_string().contains("server error"));
    assert_eq!(received.lock().unwrap().len(), 1, "single attempt only");
}

#[tokio::test]
async fn test_non_200_success_is_still_rejected() {
    let (url, _) = spawn_hook(StatusCode::ACCEPTED, "", Duration::ZERO).await;
    let slack = SlackWebhook::new(url, Duration::from_secs(5)).unwrap();

    let err = slack.post(&WebhookPayload::new("#relay", "hi")).await.unwrap_err();
    assert!(matches!(err, SendError::Rejected(202, _)));
}

#[tokio::test]
async fn test_unreachable_webhook_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let slack = SlackWebhook::new(format!("http://{}/hook", addr), Duration::from_secs(5)).unwrap();
    let err = slack.post(&WebhookPayload::new("#relay", "hi")).await.unwrap_err();
    assert!(matches!(err, SendError::Transport(_)));
}

#[tokio::test]
async fn test_slow_webhook_times_out() {
    let (url, _) = spawn_hook(StatusCode::OK, "", Duration::from_secs(5)).await;
    let slack = SlackWebhook::new(url, Duration::from_millis(200)).unwrap();

    let err = slack.post(&WebhookPayload::new("#relay", "hi")).await.unwrap_err();
    assert!(matches!(err, SendError::Transport(_)));
}
