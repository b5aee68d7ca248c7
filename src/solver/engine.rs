//! Search engine
//!
//! Two mutually recursive searches: the best guess for a candidate set, and
//! the cost of one particular guess. Depth is bounded by the attempt budget.

use super::{
    Attempts, CacheKey, CandidateSet, Cost, GroupingMode, Rules, SearchCache, SearchConfig,
    VerdictGroups, group_candidates, shortlist,
};
use crate::bank::{Bank, WordId};
use crate::core::Verdict;
use std::borrow::Cow;

/// Best guess for a search node and the cost of playing it optimally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestGuess {
    pub guess: WordId,
    pub cost: Cost,
}

/// How the engine settled one verdict group of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The guess was the target; the game ends on it
    Solved(Cost),
    /// The group was searched for its own best guess
    Searched(BestGuess),
    /// The guess eliminated at most one target, so the group is finished by
    /// guessing its targets one after another
    TrialAndError(Cost),
}

impl Resolution {
    #[must_use]
    pub const fn cost(&self) -> Cost {
        match self {
            Self::Solved(cost) | Self::TrialAndError(cost) => *cost,
            Self::Searched(best) => best.cost,
        }
    }
}

/// One verdict group as reported while evaluating a guess
#[derive(Debug, Clone, Copy)]
pub struct GroupOutcome<'g> {
    pub verdict: Verdict,
    pub group: &'g CandidateSet,
    pub resolution: Resolution,
}

/// Optimal-strategy search over one bank
pub struct Solver<'a> {
    bank: &'a Bank,
    config: SearchConfig,
    all_words: Vec<WordId>,
}

impl<'a> Solver<'a> {
    /// Create a solver for `bank` under `config`
    #[must_use]
    pub fn new(bank: &'a Bank, config: SearchConfig) -> Self {
        Self {
            bank,
            config,
            all_words: bank.word_ids().collect(),
        }
    }

    #[must_use]
    pub const fn bank(&self) -> &'a Bank {
        self.bank
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Grouping used by the search under the configured rules
    #[must_use]
    pub const fn grouping_mode(&self) -> GroupingMode {
        match self.config.rules {
            Rules::Normal => GroupingMode::TargetsOnly,
            Rules::Hard => GroupingMode::HardMode,
        }
    }

    /// Words that may be guessed at a node holding `set`
    ///
    /// Normal rules allow every bank word. Hard rules allow only the set's own
    /// entries, which grouping keeps restricted to legal guesses: targets
    /// first, each part in bank order so ties break the same way however the
    /// set was reached.
    #[must_use]
    pub fn guess_pool(&self, set: &CandidateSet) -> Cow<'_, [WordId]> {
        match self.config.rules {
            Rules::Normal => Cow::Borrowed(&self.all_words),
            Rules::Hard => {
                let mut pool = set.targets().to_vec();
                pool.sort_unstable();
                let mut rest = set.non_targets().to_vec();
                rest.sort_unstable();
                pool.append(&mut rest);
                Cow::Owned(pool)
            }
        }
    }

    /// Group `set` by `guess` the way the search does
    #[must_use]
    pub fn group(&self, set: &CandidateSet, guess: WordId) -> VerdictGroups {
        group_candidates(self.bank, set, guess, self.grouping_mode())
    }

    /// Best guess for `set` after `attempts.used` attempts
    ///
    /// Returns `None` only when `set` has no targets. An infeasible node
    /// still names a guess (its lowest target) with [`Cost::INFEASIBLE`].
    pub fn find_best_guess(
        &self,
        cache: &mut SearchCache,
        attempts: Attempts,
        set: &CandidateSet,
    ) -> Option<BestGuess> {
        self.find_best_guess_with(cache, attempts, set, |_, _| {})
    }

    /// Like [`Solver::find_best_guess`], reporting every shortlisted guess
    /// and its cost
    ///
    /// The callback only fires when the node is actually searched, not for
    /// base cases or cache hits.
    pub fn find_best_guess_with<F>(
        &self,
        cache: &mut SearchCache,
        attempts: Attempts,
        set: &CandidateSet,
        mut on_candidate: F,
    ) -> Option<BestGuess>
    where
        F: FnMut(WordId, Cost),
    {
        if !set.has_targets() {
            return None;
        }
        cache.bind(self.bank);
        Some(self.search(cache, attempts, set, &mut on_candidate))
    }

    /// Cost of guessing `guess` next at a node holding `set`
    ///
    /// Under hard rules `guess` is expected to be one of the set's entries.
    pub fn evaluate_guess(
        &self,
        cache: &mut SearchCache,
        attempts: Attempts,
        set: &CandidateSet,
        guess: WordId,
    ) -> Cost {
        self.evaluate_guess_with(cache, attempts, set, guess, |_| {})
    }

    /// Like [`Solver::evaluate_guess`], reporting how each verdict group was
    /// settled
    ///
    /// Stops at the first infeasible group.
    pub fn evaluate_guess_with<F>(
        &self,
        cache: &mut SearchCache,
        attempts: Attempts,
        set: &CandidateSet,
        guess: WordId,
        mut on_group: F,
    ) -> Cost
    where
        F: FnMut(&GroupOutcome<'_>),
    {
        if !set.has_targets() {
            return Cost::ZERO;
        }
        if attempts.remaining() == 0 {
            return Cost::INFEASIBLE;
        }
        cache.bind(self.bank);
        self.evaluate(cache, attempts, set, guess, &mut on_group)
    }

    fn search(
        &self,
        cache: &mut SearchCache,
        attempts: Attempts,
        set: &CandidateSet,
        on_candidate: &mut dyn FnMut(WordId, Cost),
    ) -> BestGuess {
        let targets = set.targets();
        let first = set.lowest_target();
        let policy = &self.config.cost;
        let infeasible = BestGuess {
            guess: first,
            cost: Cost::INFEASIBLE,
        };

        if attempts.remaining() == 0 {
            return infeasible;
        }
        if targets.len() == 1 {
            return BestGuess {
                guess: first,
                cost: policy.cost(attempts.next_attempt()),
            };
        }
        if attempts.remaining() == 1 {
            return infeasible;
        }
        if targets.len() == 2 {
            return BestGuess {
                guess: first,
                cost: policy.chain_cost(attempts.next_attempt(), 2),
            };
        }

        let key = CacheKey {
            set: set.content_hash(self.bank),
            attempts_allowed: attempts.allowed,
            attempts_used: attempts.used,
        };
        if let Some(best) = cache.get(&self.config, &key) {
            return best;
        }

        let pool = self.guess_pool(set);
        let candidates = shortlist(
            self.bank,
            &pool,
            set,
            attempts.remaining(),
            &self.config.pruning,
        );
        log::trace!(
            "Searching {} targets at attempt {}: {} of {} guesses shortlisted",
            targets.len(),
            attempts.next_attempt(),
            candidates.len(),
            pool.len()
        );

        let mut best = infeasible;
        for guess in candidates {
            let cost = self.evaluate(cache, attempts, set, guess, &mut |_| {});
            on_candidate(guess, cost);
            if cost < best.cost {
                best = BestGuess { guess, cost };
            }
        }

        cache.insert(&self.config, key, best);
        best
    }

    fn evaluate(
        &self,
        cache: &mut SearchCache,
        attempts: Attempts,
        set: &CandidateSet,
        guess: WordId,
        on_group: &mut dyn FnMut(&GroupOutcome<'_>),
    ) -> Cost {
        let groups = self.group(set, guess);
        let all_correct = self.bank.all_correct();

        let mut total = Cost::ZERO;
        for (verdict, group) in groups.with_targets() {
            let resolution = if verdict == all_correct {
                Resolution::Solved(self.config.cost.cost(attempts.next_attempt()))
            } else {
                self.resolve_group(cache, attempts, set.num_targets(), group)
            };
            on_group(&GroupOutcome {
                verdict,
                group,
                resolution,
            });

            total += resolution.cost();
            if !total.is_feasible() {
                return Cost::INFEASIBLE;
            }
        }
        total
    }

    /// Settle a non-terminal verdict group of a guess made at `attempts`
    pub(crate) fn resolve_group(
        &self,
        cache: &mut SearchCache,
        attempts: Attempts,
        parent_targets: usize,
        group: &CandidateSet,
    ) -> Resolution {
        let after = attempts.next();
        let count = group.num_targets();

        if count + 1 >= parent_targets {
            let cost = if count > after.remaining() as usize {
                Cost::INFEASIBLE
            } else {
                self.config
                    .cost
                    .chain_cost(after.next_attempt(), count as u32)
            };
            return Resolution::TrialAndError(cost);
        }

        Resolution::Searched(self.search(cache, after, group, &mut |_, _| {}))
    }
}
