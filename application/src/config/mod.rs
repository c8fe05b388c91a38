//! Application-level configuration.
//!
//! - [`SessionConfig`] - greeting and query engine options for new sessions

pub mod session_config;

pub use session_config::SessionConfig;
