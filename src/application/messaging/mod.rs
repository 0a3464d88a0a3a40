//! Message handling - Inbound webhook intake and IRC event dispatch

pub mod dispatcher;
pub mod inbound;

pub use dispatcher::{EventDispatcher, IrcAction};
pub use inbound::{relay_queue, InboundOutcome, InboundReceiver, OutgoingWebhook, QUEUE_CAPACITY};
