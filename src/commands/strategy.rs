//! Strategy command
//!
//! Builds the full decision tree for a board state, starting either from the
//! best guess or from the guess the board ends with.

use super::{BoardState, CommandError};
use crate::solver::{SearchCache, Solver, StrategyNode};

/// A strategy tree with the board it was built for
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyReport {
    pub root: StrategyNode,
    /// Attempts already spent on the board
    pub attempts_used: u32,
}

impl StrategyReport {
    /// Share of targets solved on each attempt, in percent
    #[must_use]
    pub fn distribution_percentages(&self) -> Vec<f64> {
        let total = self.root.num_remaining_targets as f64;
        self.root
            .attempt_distribution()
            .iter()
            .map(|&solved| solved as f64 * 100.0 / total)
            .collect()
    }
}

/// Build the strategy for `state`
///
/// Returns `Ok(None)` when no strategy solves every target within the
/// attempt budget.
///
/// # Errors
/// Returns `CommandError::NoTargets` if the board leaves nothing to find.
pub fn plan_strategy(
    solver: &Solver<'_>,
    cache: &mut SearchCache,
    state: &BoardState,
) -> Result<Option<StrategyReport>, CommandError> {
    if !state.set.has_targets() {
        return Err(CommandError::NoTargets);
    }
    let root = solver.find_best_strategy(cache, state.attempts, &state.set, state.board.pending());
    Ok(root.map(|root| StrategyReport {
        root,
        attempts_used: state.attempts.used,
    }))
}
