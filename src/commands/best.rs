//! Best guess command
//!
//! Searches a board state for its best guess and reports every shortlisted
//! candidate the search evaluated along the way.

use super::{BoardState, CommandError, expected_cost};
use crate::bank::WordId;
use crate::solver::{
    Cost, GuessHeuristic, SearchCache, Solver, compute_guess_heuristic, next_attempt_entropy,
};

/// Outcome of playing the best strategy after one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySummary {
    pub mean_attempts: f64,
    /// Targets solved on each attempt, index 0 being attempt 1
    pub distribution: Vec<u64>,
}

/// One evaluated candidate guess
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub guess: String,
    pub cost: Cost,
    pub expected_cost: f64,
    pub heuristic: GuessHeuristic,
    /// Entropy of this guess plus the expected entropy of the best follow-up
    pub lookahead_entropy: f64,
    /// `None` when the candidate cannot solve every target in time
    pub strategy: Option<StrategySummary>,
}

/// Result of searching a board state
#[derive(Debug, Clone, PartialEq)]
pub struct BestGuessReport {
    pub remaining_words: usize,
    pub remaining_targets: usize,
    /// Candidates in the order the search evaluated them; empty when the
    /// answer came from the cache or needed no search
    pub candidates: Vec<CandidateRow>,
    pub best_guess: String,
    pub cost: Cost,
    pub expected_cost: f64,
}

/// Find the best guess for `state`
///
/// `on_evaluated` is called with each candidate as soon as the search has
/// costed it, for progress reporting.
///
/// # Errors
/// Returns `CommandError::PendingGuess` if the board ends with an unplayed
/// guess, or `NoTargets` if no target is left to find.
pub fn rank_guesses<F>(
    solver: &Solver<'_>,
    cache: &mut SearchCache,
    state: &BoardState,
    mut on_evaluated: F,
) -> Result<BestGuessReport, CommandError>
where
    F: FnMut(&str, Cost),
{
    state.require_settled()?;
    let bank = solver.bank();
    let set = &state.set;

    let mut evaluated: Vec<(WordId, Cost)> = Vec::new();
    let best = solver
        .find_best_guess_with(cache, state.attempts, set, |guess, cost| {
            on_evaluated(bank.text(guess), cost);
            evaluated.push((guess, cost));
        })
        .ok_or(CommandError::NoTargets)?;

    let pool = solver.guess_pool(set);
    let candidates = evaluated
        .into_iter()
        .map(|(guess, cost)| {
            let heuristic = compute_guess_heuristic(bank, set, guess);
            let lookahead = next_attempt_entropy(bank, &pool, set, guess);
            let strategy = solver
                .find_best_strategy(cache, state.attempts, set, Some(guess))
                .map(|node| StrategySummary {
                    mean_attempts: node.mean_attempts(),
                    distribution: node.attempt_distribution().to_vec(),
                });
            CandidateRow {
                guess: bank.text(guess).to_string(),
                cost,
                expected_cost: expected_cost(cost, set.num_targets()),
                heuristic,
                lookahead_entropy: heuristic.entropy + lookahead,
                strategy,
            }
        })
        .collect();

    Ok(BestGuessReport {
        remaining_words: set.len(),
        remaining_targets: set.num_targets(),
        candidates,
        best_guess: bank.text(best.guess).to_string(),
        cost: best.cost,
        expected_cost: expected_cost(best.cost, set.num_targets()),
    })
}
