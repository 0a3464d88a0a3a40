/// Write side of an IRC session, as seen by the relay loop
pub trait IrcSender: Send + Sync {
    /// Send `text` to `channel`. Fire-and-forget: delivery failures are not reported.
    fn send(&self, channel: &str, text: &str);
}
