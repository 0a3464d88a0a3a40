//! Domain traits - Abstractions for infrastructure implementations

pub mod chat;
pub mod irc;

pub use chat::ChatSender;
pub use irc::IrcSender;
