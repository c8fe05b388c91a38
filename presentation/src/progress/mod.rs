//! Index build progress display

pub mod reporter;
