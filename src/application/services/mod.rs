//! Application services - Business logic orchestration

pub mod relay_service;

pub use relay_service::{RelayService, DEFAULT_SEND_DELAY};
