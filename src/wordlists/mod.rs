//! Word lists for building banks
//!
//! Loads target and guess lists from a bank directory.

pub mod loader;

pub use loader::{GuessInclusion, LoadError, WordLists, read_words};
