//! # Features Module
//!
//! Feature modules backing the command layer.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod completion;
pub mod cooldown;
pub mod extract;

// Re-export commonly used items
pub use completion::GatewayClient;
pub use cooldown::{CommandOnCooldown, CooldownGuard};
