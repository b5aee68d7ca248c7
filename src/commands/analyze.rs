//! Word analysis command
//!
//! Analyzes the information content of a guess against a board state and
//! what playing it would cost.

use super::{BoardState, CommandError, expected_cost};
use crate::solver::{
    Cost, SearchCache, Solver, compute_guess_heuristic, next_attempt_entropy,
};

/// Result of analyzing a word
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub word: String,
    pub is_target: bool,
    pub entropy: f64,
    /// Entropy of the word plus that of the best follow-up
    pub lookahead_entropy: f64,
    pub expected_reduction: f64,
    pub expected_remaining: f64,
    pub num_groups: usize,
    pub largest_group: usize,
    pub total_candidates: usize,
    pub cost: Cost,
    pub expected_cost: f64,
}

/// Analyze the pending guess of `state`
///
/// # Errors
/// Returns `CommandError::MissingGuess` if the board does not end with the
/// word to analyze.
pub fn analyze_word(
    solver: &Solver<'_>,
    cache: &mut SearchCache,
    state: &BoardState,
) -> Result<AnalysisReport, CommandError> {
    let guess = state.board.pending().ok_or(CommandError::MissingGuess)?;
    let bank = solver.bank();
    let set = &state.set;

    let heuristic = compute_guess_heuristic(bank, set, guess);
    let pool = solver.guess_pool(set);
    let lookahead = next_attempt_entropy(bank, &pool, set, guess);
    let cost = solver.evaluate_guess(cache, state.attempts, set, guess);

    let total_candidates = set.num_targets();
    let expected_reduction = heuristic.entropy.exp2();

    Ok(AnalysisReport {
        word: bank.text(guess).to_string(),
        is_target: set.targets().contains(&guess),
        entropy: heuristic.entropy,
        lookahead_entropy: heuristic.entropy + lookahead,
        expected_reduction,
        expected_remaining: total_candidates as f64 / expected_reduction,
        num_groups: heuristic.num_groups,
        largest_group: heuristic.largest_group,
        total_candidates,
        cost,
        expected_cost: expected_cost(cost, total_candidates),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::solver::SearchConfig;

    fn analyze(tokens: &[&str]) -> Result<AnalysisReport, CommandError> {
        let bank = fixtures::bank();
        let solver = Solver::new(&bank, SearchConfig::default());
        let state = BoardState::from_tokens(&solver, tokens, 6)?;
        analyze_word(&solver, &mut SearchCache::new(), &state)
    }

    #[test]
    fn analyze_opening_word() {
        let result = analyze(&["crane"]).unwrap();

        assert_eq!(result.word, "crane");
        assert!(result.is_target);
        assert_eq!(result.total_candidates, 8);
        assert_eq!(result.num_groups, 6);
        assert_eq!(result.largest_group, 2);
        assert!(result.cost.is_feasible());
    }

    #[test]
    fn entropy_properties() {
        let result = analyze(&["lymph"]).unwrap();

        assert!(!result.is_target);
        assert!(result.entropy >= 0.0);
        assert!(result.entropy <= 8f64.log2() + 1e-12);
        assert!(result.lookahead_entropy >= result.entropy);
        assert!(result.expected_reduction >= 1.0);
        assert!(result.expected_remaining <= 8.0);
    }

    #[test]
    fn analyze_needs_a_word() {
        assert!(matches!(analyze(&[]), Err(CommandError::MissingGuess)));
        assert!(matches!(
            analyze(&["zzzzz"]),
            Err(CommandError::Board(_))
        ));
    }
}
