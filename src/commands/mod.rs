//! Command implementations
//!
//! Each command runs the solver against a board state and returns a plain
//! report for the `output` module to print.

pub mod analyze;
pub mod best;
pub mod play;
pub mod strategy;
pub mod verdicts;

pub use analyze::{AnalysisReport, analyze_word};
pub use best::{BestGuessReport, CandidateRow, StrategySummary, rank_guesses};
pub use play::run_play;
pub use strategy::{StrategyReport, plan_strategy};
pub use verdicts::{VerdictReport, VerdictRow, analyze_verdicts};

use crate::solver::{Attempts, Board, BoardError, CandidateSet, Cost, Solver};
use std::io;
use thiserror::Error;

/// Errors from running a command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("the board must end with the guess to analyze")]
    MissingGuess,
    #[error("the board already ends with a guess that has no verdict")]
    PendingGuess,
    #[error("no targets remain")]
    NoTargets,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A replayed board: the candidates it leaves and the attempts it used
#[derive(Debug, Clone)]
pub struct BoardState {
    pub board: Board,
    pub set: CandidateSet,
    pub attempts: Attempts,
}

impl BoardState {
    /// Parse and replay `GUESS VERDICT ... [GUESS]` tokens for `solver`
    ///
    /// # Errors
    /// Returns `BoardError` when the tokens do not describe a reachable board.
    pub fn from_tokens<S: AsRef<str>>(
        solver: &Solver<'_>,
        tokens: &[S],
        allowed: u32,
    ) -> Result<Self, BoardError> {
        let bank = solver.bank();
        let board = Board::parse(bank, tokens)?;
        let set = board.replay(bank, solver.config().rules)?;
        let attempts = board.attempts(allowed);
        Ok(Self {
            board,
            set,
            attempts,
        })
    }

    /// Fail if the board names a guess that has not been played
    ///
    /// # Errors
    /// Returns `CommandError::PendingGuess`.
    pub fn require_settled(&self) -> Result<(), CommandError> {
        match self.board.pending() {
            Some(_) => Err(CommandError::PendingGuess),
            None => Ok(()),
        }
    }
}

/// Cost per target, infinite when the cost is
#[must_use]
pub fn expected_cost(cost: Cost, num_targets: usize) -> f64 {
    if num_targets == 0 {
        return 0.0;
    }
    cost.value() / num_targets as f64
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::bank::{Bank, BankConfig};

    /// Eight targets and two guess-only words
    pub fn bank() -> Bank {
        Bank::new(
            &[
                "crane", "slate", "plate", "trace", "crony", "grace", "blimp", "shard", "pious",
                "lymph",
            ],
            8,
            BankConfig::default(),
        )
        .unwrap()
    }
}
