//! Search configuration

use super::{CostPolicy, PruningConfig};

/// Game rules the search plays under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rules {
    /// Any bank word may be guessed at any time
    #[default]
    Normal,
    /// Each guess must respect all feedback seen so far
    Hard,
}

/// Everything that changes what the engine considers optimal
///
/// Two searches share cached results only if their configs are equal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchConfig {
    pub rules: Rules,
    pub cost: CostPolicy,
    pub pruning: PruningConfig,
}

/// Attempt budget of a search node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attempts {
    /// Total attempts in the game
    pub allowed: u32,
    /// Attempts already spent before this node
    pub used: u32,
}

impl Attempts {
    /// A fresh game with `allowed` attempts
    #[must_use]
    pub const fn new(allowed: u32) -> Self {
        Self { allowed, used: 0 }
    }

    #[must_use]
    pub const fn with_used(allowed: u32, used: u32) -> Self {
        Self { allowed, used }
    }

    /// The node one guess deeper
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            allowed: self.allowed,
            used: self.used + 1,
        }
    }

    /// 1-based number of the next guess
    #[must_use]
    pub const fn next_attempt(self) -> u32 {
        self.used + 1
    }

    /// Guesses still available, zero once the budget is spent
    #[must_use]
    pub const fn remaining(self) -> u32 {
        self.allowed.saturating_sub(self.used)
    }
}

impl Default for Attempts {
    fn default() -> Self {
        Self::new(6)
    }
}
