//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod app_context;
pub mod chat_controller;
pub mod chat_session;
pub mod index_cache;

#[cfg(test)]
pub(crate) mod test_support;
