//! sirbot - relays messages between one IRC channel and one Slack channel.
//!
//! IRC channel messages are posted to a Slack incoming webhook; Slack
//! outgoing-webhook calls are queued and written into IRC at a steady pace.

pub mod domain;
pub mod application;
pub mod infrastructure;
