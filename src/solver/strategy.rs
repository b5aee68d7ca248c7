//! Strategy trees
//!
//! Materializes the engine's decisions into a full decision tree: a guess,
//! and for every verdict it can receive either nothing (the guess was the
//! target) or the follow-up node to play next.

use super::{Attempts, CandidateSet, Cost, Resolution, SearchCache, Solver};
use crate::bank::WordId;
use crate::core::Verdict;
use std::collections::BTreeMap;

/// One node of a strategy tree
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyNode {
    pub guess: WordId,
    /// 1-based attempt on which `guess` is played
    pub attempt: u32,
    /// Cost of this subtree under the search's cost policy
    pub cost: Cost,
    pub num_remaining_words: usize,
    pub num_remaining_targets: usize,
    /// Sum over targets of the attempt on which each is solved
    pub total_attempts: u64,
    /// `solved_by_attempt[n - 1]` targets are solved on attempt `n`
    pub solved_by_attempt: Vec<u64>,
    /// Follow-up per verdict with targets; `None` for the all-correct verdict
    pub follow_ups: BTreeMap<Verdict, Option<StrategyNode>>,
}

impl StrategyNode {
    fn new(guess: WordId, attempts: Attempts, set: &CandidateSet) -> Self {
        Self {
            guess,
            attempt: attempts.next_attempt(),
            cost: Cost::ZERO,
            num_remaining_words: set.len(),
            num_remaining_targets: set.num_targets(),
            total_attempts: 0,
            solved_by_attempt: vec![0; attempts.allowed as usize],
            follow_ups: BTreeMap::new(),
        }
    }

    fn record_solved(&mut self, cost: Cost) {
        let slot = self.attempt as usize - 1;
        if slot >= self.solved_by_attempt.len() {
            self.solved_by_attempt.resize(slot + 1, 0);
        }
        self.solved_by_attempt[slot] += 1;
        self.total_attempts += u64::from(self.attempt);
        self.cost += cost;
    }

    fn absorb(&mut self, child: &Self) {
        if child.solved_by_attempt.len() > self.solved_by_attempt.len() {
            self.solved_by_attempt.resize(child.solved_by_attempt.len(), 0);
        }
        for (total, &solved) in self.solved_by_attempt.iter_mut().zip(&child.solved_by_attempt) {
            *total += solved;
        }
        self.total_attempts += child.total_attempts;
        self.cost += child.cost;
    }

    /// Average attempts per target
    #[must_use]
    pub fn mean_attempts(&self) -> f64 {
        if self.num_remaining_targets == 0 {
            return 0.0;
        }
        self.total_attempts as f64 / self.num_remaining_targets as f64
    }

    /// Targets solved on each attempt, index 0 being attempt 1
    #[must_use]
    pub fn attempt_distribution(&self) -> &[u64] {
        &self.solved_by_attempt
    }

    /// Guesses on the longest path through this subtree
    #[must_use]
    pub fn max_depth(&self) -> u32 {
        1 + self
            .follow_ups
            .values()
            .flatten()
            .map(Self::max_depth)
            .max()
            .unwrap_or(0)
    }

    /// Node to play after `verdict`, if the game goes on
    #[must_use]
    pub fn follow_up(&self, verdict: Verdict) -> Option<&Self> {
        self.follow_ups.get(&verdict).and_then(Option::as_ref)
    }

    /// Number of nodes in this subtree
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        1 + self
            .follow_ups
            .values()
            .flatten()
            .map(Self::num_nodes)
            .sum::<usize>()
    }
}

impl Solver<'_> {
    /// Build the full strategy tree for `set`
    ///
    /// Without `forced_guess` the tree starts from the engine's best guess.
    /// Returns `None` when the set has no targets or the chosen start cannot
    /// solve every target within the budget.
    ///
    /// Groups the engine settles by trial and error are played out by
    /// guessing their lowest remaining target until solved, so the tree's
    /// cost can come in below the engine's estimate.
    pub fn find_best_strategy(
        &self,
        cache: &mut SearchCache,
        attempts: Attempts,
        set: &CandidateSet,
        forced_guess: Option<WordId>,
    ) -> Option<StrategyNode> {
        let guess = match forced_guess {
            Some(guess) => {
                let cost = self.evaluate_guess(cache, attempts, set, guess);
                (set.has_targets() && cost.is_feasible()).then_some(guess)?
            }
            None => {
                let best = self.find_best_guess(cache, attempts, set)?;
                best.cost.is_feasible().then_some(best.guess)?
            }
        };

        let node = self.assemble(cache, attempts, set, guess);
        log::debug!(
            "Strategy for {} targets: {} nodes, mean {:.4} attempts",
            node.num_remaining_targets,
            node.num_nodes(),
            node.mean_attempts()
        );
        Some(node)
    }

    fn assemble(
        &self,
        cache: &mut SearchCache,
        attempts: Attempts,
        set: &CandidateSet,
        guess: WordId,
    ) -> StrategyNode {
        let mut node = StrategyNode::new(guess, attempts, set);
        let groups = self.group(set, guess);
        let all_correct = self.bank().all_correct();

        for (verdict, group) in groups.with_targets() {
            if verdict == all_correct {
                node.record_solved(self.config().cost.cost(node.attempt));
                node.follow_ups.insert(verdict, None);
                continue;
            }

            let child = match self.resolve_group(cache, attempts, set.num_targets(), group) {
                Resolution::Searched(best) => self.assemble(cache, attempts.next(), group, best.guess),
                Resolution::Solved(_) | Resolution::TrialAndError(_) => {
                    self.trial_and_error(attempts.next(), group)
                }
            };
            node.absorb(&child);
            node.follow_ups.insert(verdict, Some(child));
        }

        node
    }

    /// Guess the lowest remaining target until every target is found
    fn trial_and_error(&self, attempts: Attempts, set: &CandidateSet) -> StrategyNode {
        let guess = set.lowest_target();
        let mut node = StrategyNode::new(guess, attempts, set);
        let all_correct = self.bank().all_correct();

        for (verdict, group) in self.group(set, guess).with_targets() {
            if verdict == all_correct {
                node.record_solved(self.config().cost.cost(node.attempt));
                node.follow_ups.insert(verdict, None);
            } else {
                let child = self.trial_and_error(attempts.next(), group);
                node.absorb(&child);
                node.follow_ups.insert(verdict, Some(child));
            }
        }

        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Bank, BankConfig};
    use crate::solver::{PruningConfig, Rules, SearchConfig};

    fn sample_bank() -> Bank {
        Bank::new(
            &[
                "bat", "cat", "hat", "mat", "rat", "sat", "bag", "cab", "tab", "tar", "arc",
                "chm", "bsr", "tgh",
            ],
            11,
            BankConfig::default(),
        )
        .unwrap()
    }

    /// Attempts needed to find `target` by following the tree
    fn play(bank: &Bank, root: &StrategyNode, target: WordId) -> u32 {
        let mut node = root;
        loop {
            let verdict = bank.verdict(node.guess, target);
            match node.follow_ups.get(&verdict) {
                Some(None) => {
                    assert_eq!(node.guess, target);
                    return node.attempt;
                }
                Some(Some(next)) => node = next,
                None => panic!("verdict {verdict} of {} missing", bank.text(node.guess)),
            }
        }
    }

    #[test]
    fn strategy_solves_every_target_within_budget() {
        let bank = sample_bank();
        for rules in [Rules::Normal, Rules::Hard] {
            let solver = Solver::new(
                &bank,
                SearchConfig {
                    rules,
                    ..SearchConfig::default()
                },
            );
            let mut cache = SearchCache::new();
            let set = CandidateSet::full(&bank);
            let attempts = Attempts::new(6);
            let tree = solver
                .find_best_strategy(&mut cache, attempts, &set, None)
                .unwrap();

            let mut total = 0;
            for &target in set.targets() {
                let used = play(&bank, &tree, target);
                assert!(used <= attempts.allowed);
                total += u64::from(used);
            }
            assert_eq!(total, tree.total_attempts);
            assert_eq!(
                tree.attempt_distribution().iter().sum::<u64>(),
                set.num_targets() as u64
            );
            assert!(tree.max_depth() <= attempts.allowed);

            let estimate = solver
                .find_best_guess(&mut cache, attempts, &set)
                .unwrap()
                .cost;
            assert!(tree.cost <= estimate, "{rules:?}");
            assert_eq!(tree.cost, Cost::new(tree.total_attempts as f64));
        }
    }

    #[test]
    fn hard_strategy_only_plays_legal_follow_ups() {
        fn check(bank: &Bank, node: &StrategyNode) {
            for (&verdict, follow_up) in &node.follow_ups {
                if let Some(next) = follow_up {
                    let shown = bank.verdict(node.guess, next.guess);
                    assert!(bank.hard_mode_valid(node.guess, verdict, shown));
                    check(bank, next);
                }
            }
        }

        let bank = sample_bank();
        let solver = Solver::new(
            &bank,
            SearchConfig {
                rules: Rules::Hard,
                ..SearchConfig::default()
            },
        );
        let mut cache = SearchCache::new();
        let set = CandidateSet::full(&bank);
        let tree = solver
            .find_best_strategy(&mut cache, Attempts::new(6), &set, None)
            .unwrap();
        check(&bank, &tree);
    }

    #[test]
    fn tree_cost_matches_engine_for_three_targets() {
        let bank = Bank::new(&["bat", "cat", "hat", "bch", "xyz"], 3, BankConfig::default())
            .unwrap();
        let solver = Solver::new(
            &bank,
            SearchConfig {
                pruning: PruningConfig::exhaustive(),
                ..SearchConfig::default()
            },
        );
        let mut cache = SearchCache::new();
        let set = CandidateSet::full(&bank);
        let attempts = Attempts::new(3);

        let best = solver.find_best_guess(&mut cache, attempts, &set).unwrap();
        let tree = solver
            .find_best_strategy(&mut cache, attempts, &set, None)
            .unwrap();
        assert_eq!(tree.guess, best.guess);
        assert_eq!(tree.cost, best.cost);
        assert!((tree.mean_attempts() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn two_targets_make_a_chain() {
        let bank = Bank::new(&["bat", "cat", "xyz"], 2, BankConfig::default()).unwrap();
        let solver = Solver::new(&bank, SearchConfig::default());
        let mut cache = SearchCache::new();
        let set = CandidateSet::full(&bank);
        let bat = bank.find_word("bat").unwrap();
        let cat = bank.find_word("cat").unwrap();

        let tree = solver
            .find_best_strategy(&mut cache, Attempts::new(6), &set, None)
            .unwrap();
        assert_eq!(tree.guess, bat);
        assert_eq!(tree.follow_ups.len(), 2);
        assert!(tree.follow_ups[&bank.all_correct()].is_none());

        let next = tree.follow_up(bank.verdict(bat, cat)).unwrap();
        assert_eq!(next.guess, cat);
        assert_eq!(next.attempt, 2);
        assert_eq!(tree.attempt_distribution(), &[1, 1, 0, 0, 0, 0]);
        assert_eq!(tree.max_depth(), 2);
        assert_eq!(tree.cost, Cost::new(3.0));
    }

    #[test]
    fn forced_guess_is_honored_or_rejected() {
        let bank = sample_bank();
        let solver = Solver::new(&bank, SearchConfig::default());
        let mut cache = SearchCache::new();
        let set = CandidateSet::full(&bank);
        let tgh = bank.find_word("tgh").unwrap();

        let tree = solver
            .find_best_strategy(&mut cache, Attempts::new(6), &set, Some(tgh))
            .unwrap();
        assert_eq!(tree.guess, tgh);
        assert!(tree.follow_up(bank.all_correct()).is_none());

        assert!(
            solver
                .find_best_strategy(&mut cache, Attempts::new(1), &set, Some(tgh))
                .is_none()
        );
        assert!(
            solver
                .find_best_strategy(&mut cache, Attempts::new(6), &CandidateSet::new(), None)
                .is_none()
        );
    }
}
