//! IRC adapter
//!
//! Session built on the `irc` client: registration, channel join, event
//! mapping, and the write handle used by the relay loop.

pub mod message;
pub mod session;

pub use session::{Connection, IrcHandle, IrcSession, SessionState};
