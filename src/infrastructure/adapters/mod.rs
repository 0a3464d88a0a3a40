//! Platform adapters (Slack webhook, IRC)

pub mod irc;
pub mod slack;
