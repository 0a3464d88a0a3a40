//! Application layer - Relay use cases
//!
//! This layer contains:
//! - Errors: Domain-specific errors
//! - Services: The relay loop draining the inbound queue into IRC
//! - Messaging: Inbound webhook intake, IRC event dispatch

pub mod errors;
pub mod services;
pub mod messaging;
