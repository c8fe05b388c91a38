//! Corpus domain: the documents a chat is grounded in and how they are queried.

pub mod document;
pub mod mode;
pub mod preset;
