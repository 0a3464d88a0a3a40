//! Domain layer - Core relay types with no external dependencies
//!
//! This layer contains:
//! - Entities: The relayed payload and typed IRC events
//! - Traits: Abstractions for the two transports (Slack webhook, IRC)

pub mod entities;
pub mod traits;
