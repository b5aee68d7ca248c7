//! Per-verdict command
//!
//! Evaluates a guess about to be played and reports, for every verdict it
//! could receive, the best follow-up and what it costs.

use super::{BoardState, CommandError, expected_cost};
use crate::solver::{
    Cost, GuessHeuristic, Resolution, SearchCache, Solver, compute_guess_heuristic,
};

/// Best play after one verdict of the analyzed guess
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictRow {
    pub verdict_id: u16,
    pub verdict: String,
    pub next_guess: String,
    /// Guessable words left
    pub remaining_words: usize,
    /// Targets left
    pub remaining_targets: usize,
    pub cost: Cost,
    pub expected_cost: f64,
    /// Metrics of `next_guess` within this verdict group
    pub heuristic: GuessHeuristic,
}

/// Result of evaluating one guess verdict by verdict
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictReport {
    pub guess: String,
    pub rows: Vec<VerdictRow>,
    /// Metrics of the guess against the whole board state
    pub heuristic: GuessHeuristic,
    pub remaining_words: usize,
    pub remaining_targets: usize,
    pub cost: Cost,
    pub expected_cost: f64,
}

/// Evaluate the pending guess of `state` verdict by verdict
///
/// Rows come in verdict order and stop at the first verdict that cannot be
/// solved in time.
///
/// # Errors
/// Returns `CommandError::MissingGuess` if the board does not end with an
/// unplayed guess.
pub fn analyze_verdicts(
    solver: &Solver<'_>,
    cache: &mut SearchCache,
    state: &BoardState,
) -> Result<VerdictReport, CommandError> {
    let guess = state.board.pending().ok_or(CommandError::MissingGuess)?;
    let bank = solver.bank();
    let set = &state.set;

    let mut rows = Vec::new();
    let cost = solver.evaluate_guess_with(cache, state.attempts, set, guess, |outcome| {
        let group = outcome.group;
        let (next_guess, cost) = match outcome.resolution {
            Resolution::Solved(cost) => (guess, cost),
            Resolution::Searched(best) => (best.guess, best.cost),
            Resolution::TrialAndError(cost) => (group.lowest_target(), cost),
        };
        rows.push(VerdictRow {
            verdict_id: outcome.verdict.value(),
            verdict: bank.format_verdict(outcome.verdict),
            next_guess: bank.text(next_guess).to_string(),
            remaining_words: group.len(),
            remaining_targets: group.num_targets(),
            cost,
            expected_cost: expected_cost(cost, group.num_targets()),
            heuristic: compute_guess_heuristic(bank, group, next_guess),
        });
    });

    Ok(VerdictReport {
        guess: bank.text(guess).to_string(),
        rows,
        heuristic: compute_guess_heuristic(bank, set, guess),
        remaining_words: set.len(),
        remaining_targets: set.num_targets(),
        cost,
        expected_cost: expected_cost(cost, set.num_targets()),
    })
}
