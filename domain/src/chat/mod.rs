//! Chat domain.
//!
//! - [`entities::ChatTurn`] - a single immutable turn
//! - [`history::ChatHistory`] - the seeded, append-only turn list of one session
//! - [`memory::ChatMemory`] - budgeted exchanges an engine condenses against
//! - [`stream::StreamEvent`] - fragments of a streaming answer

pub mod entities;
pub mod history;
pub mod memory;
pub mod stream;
