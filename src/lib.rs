// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Application layer
pub mod commands;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items for convenience
pub use features::{CommandOnCooldown, CooldownGuard, GatewayClient};
