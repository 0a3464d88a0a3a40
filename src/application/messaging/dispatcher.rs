//! Event dispatcher - Maps IRC events to the actions the session performs

use crate::domain::entities::{IrcEvent, WebhookPayload};

/// Something the IRC session must do in response to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrcAction {
    /// Join the configured channel
    Join(String),
    /// Post to the chat webhook
    Forward(WebhookPayload),
}

/// Pure dispatch from IRC events to session actions
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    irc_channel: String,
    slack_channel: String,
}

impl EventDispatcher {
    pub fn new(irc_channel: impl Into<String>, slack_channel: impl Into<String>) -> Self {
        Self {
            irc_channel: irc_channel.into(),
            slack_channel: slack_channel.into(),
        }
    }

    pub fn dispatch(&self, event: &IrcEvent) -> Option<IrcAction> {
        match event {
            IrcEvent::Registered => Some(IrcAction::Join(self.irc_channel.clone())),
            IrcEvent::ChannelMessage { nick, channel, text } => Some(IrcAction::Forward(
                WebhookPayload::from_irc(&self.slack_channel, nick, channel, text.as_str()),
            )),
            IrcEvent::ChannelAction { nick, channel, text } => Some(IrcAction::Forward(
                WebhookPayload::from_irc(&self.slack_channel, nick, channel, format!("_{}_", text)),
            )),
            IrcEvent::Joined { .. } | IrcEvent::Other => None,
        }
    }
}
