//! Slash command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod query;

pub use query::QueryHandler;
