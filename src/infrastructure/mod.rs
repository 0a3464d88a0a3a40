//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Platform integrations (Slack, IRC)
//! - HTTP: Receiver for Slack outgoing webhooks

pub mod config;
pub mod adapters;
pub mod http;
