/// Typed IRC events the relay reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrcEvent {
    /// Registration complete (numeric 001)
    Registered,
    /// Someone (possibly us) joined a channel
    Joined { nick: String, channel: String },
    /// PRIVMSG addressed to a channel
    ChannelMessage {
        nick: String,
        channel: String,
        text: String,
    },
    /// CTCP ACTION (`/me`) addressed to a channel
    ChannelAction {
        nick: String,
        channel: String,
        text: String,
    },
    /// Anything else; keep-alive and nick collisions are answered by the client
    Other,
}
