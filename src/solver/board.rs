//! Board state replay
//!
//! A board is the list of guesses played so far with the verdict each
//! received, written as alternating `GUESS VERDICT` tokens, optionally
//! followed by one more guess that has not been played yet.

use super::{Attempts, CandidateSet, GroupingMode, Rules, group_candidates};
use crate::bank::{Bank, WordId};
use crate::core::{Verdict, VerdictParseError};
use thiserror::Error;

/// Errors from parsing or replaying a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("'{0}' is not in the word bank")]
    WordNotFound(String),
    #[error(transparent)]
    Verdict(#[from] VerdictParseError),
    #[error("no target is consistent with {guess} {verdict}")]
    InconsistentFeedback { guess: String, verdict: String },
    #[error("{guess} is not a legal hard mode guess on attempt {attempt}")]
    IllegalHardModeGuess { guess: String, attempt: usize },
}

/// Guesses played so far and their verdicts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    steps: Vec<(WordId, Verdict)>,
    pending: Option<WordId>,
}

impl Board {
    /// Parse `GUESS VERDICT ... [GUESS]` tokens
    ///
    /// # Errors
    /// Returns `BoardError` for unknown words or unreadable verdicts.
    ///
    /// # Examples
    /// ```
    /// use wordle_strategist::bank::{Bank, BankConfig};
    /// use wordle_strategist::solver::Board;
    ///
    /// let bank = Bank::new(&["crane", "slate", "plate"], 3, BankConfig::default()).unwrap();
    /// let board = Board::parse(&bank, &["crane", "--#-#", "slate"]).unwrap();
    /// assert_eq!(board.steps().len(), 1);
    /// assert!(board.pending().is_some());
    /// ```
    pub fn parse<S: AsRef<str>>(bank: &Bank, tokens: &[S]) -> Result<Self, BoardError> {
        let find = |text: &str| {
            bank.find_word(text)
                .ok_or_else(|| BoardError::WordNotFound(text.trim().to_string()))
        };

        let mut board = Self::default();
        for pair in tokens.chunks(2) {
            let guess = find(pair[0].as_ref())?;
            match pair.get(1) {
                Some(verdict) => board
                    .steps
                    .push((guess, bank.parse_verdict(verdict.as_ref())?)),
                None => board.pending = Some(guess),
            }
        }
        Ok(board)
    }

    /// Played guesses with their verdicts
    #[must_use]
    pub fn steps(&self) -> &[(WordId, Verdict)] {
        &self.steps
    }

    /// Guess named after the last verdict, if any
    #[must_use]
    pub const fn pending(&self) -> Option<WordId> {
        self.pending
    }

    /// Attempts already spent, under a budget of `allowed`
    #[must_use]
    pub fn attempts(&self, allowed: u32) -> Attempts {
        Attempts::with_used(allowed, self.steps.len() as u32)
    }

    /// Narrow the full bank down to the candidates left after every step
    ///
    /// # Errors
    /// Returns `InconsistentFeedback` when a step leaves no target and, under
    /// hard rules, `IllegalHardModeGuess` when a played or pending guess
    /// ignores earlier feedback.
    pub fn replay(&self, bank: &Bank, rules: Rules) -> Result<CandidateSet, BoardError> {
        let mode = match rules {
            Rules::Normal => GroupingMode::TargetsOnly,
            Rules::Hard => GroupingMode::HardMode,
        };

        let mut set = CandidateSet::full(bank);
        for (index, &(guess, verdict)) in self.steps.iter().enumerate() {
            check_legal(bank, rules, &set, guess, index + 1)?;
            let next = group_candidates(bank, &set, guess, mode)
                .into_inner()
                .swap_remove(verdict.index());
            if !next.has_targets() {
                return Err(BoardError::InconsistentFeedback {
                    guess: bank.text(guess).to_string(),
                    verdict: bank.format_verdict(verdict),
                });
            }
            log::trace!(
                "{} {} leaves {} targets",
                bank.text(guess),
                bank.format_verdict(verdict),
                next.num_targets()
            );
            set = next;
        }

        if let Some(guess) = self.pending {
            check_legal(bank, rules, &set, guess, self.steps.len() + 1)?;
        }
        Ok(set)
    }
}

fn check_legal(
    bank: &Bank,
    rules: Rules,
    set: &CandidateSet,
    guess: WordId,
    attempt: usize,
) -> Result<(), BoardError> {
    if rules == Rules::Hard && !set.entries().contains(&guess) {
        return Err(BoardError::IllegalHardModeGuess {
            guess: bank.text(guess).to_string(),
            attempt,
        });
    }
    Ok(())
}
