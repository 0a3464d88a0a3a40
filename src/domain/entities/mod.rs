//! Domain entities - Core business objects with no external dependencies

pub mod event;
pub mod payload;

pub use event::IrcEvent;
pub use payload::{WebhookPayload, SLACKBOT};
