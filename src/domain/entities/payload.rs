/// Slack user name of the platform's own bot. Messages from it are never
/// relayed back into IRC.
pub const SLACKBOT: &str = "slackbot";

/// A message crossing the relay in either direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookPayload {
    /// Slack channel when heading to Slack, IRC channel when heading to IRC
    pub channel: String,
    pub text: String,
    pub username: String,
    pub icon: Option<String>,
}

impl WebhookPayload {
    pub fn new(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
            username: String::new(),
            icon: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Build the payload for a message seen in IRC, attributed as `nick[#channel]`
    pub fn from_irc(slack_channel: &str, nick: &str, source_channel: &str, text: impl Into<String>) -> Self {
        Self::new(slack_channel, text).with_username(format!("{}[{}]", nick, source_channel))
    }

    /// Build the payload for a message posted in Slack.
    ///
    /// Returns `None` for messages sent by [`SLACKBOT`].
    pub fn from_slack(irc_channel: &str, user_name: &str, text: &str) -> Option<Self> {
        if user_name == SLACKBOT {
            return None;
        }
        Some(Self::new(irc_channel, format!("[{}] {}", user_name, text)).with_username(user_name))
    }

    pub fn icon_emoji(&self) -> &str {
        self.icon.as_deref().unwrap_or("")
    }
}
