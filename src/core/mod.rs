//! Core domain types for Wordle
//!
//! This module contains the fundamental domain types with no search state.
//! Everything here is pure: words, verdicts, judging, and the hard mode rule.

mod hard_mode;
mod verdict;
mod word;

pub use hard_mode::{HardModeRule, is_hard_mode_valid};
pub use verdict::{Tile, Verdict, VerdictParseError, judge};
pub use word::{Word, WordError};
