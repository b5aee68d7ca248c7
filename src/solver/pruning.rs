//! Entropy shortlist of guesses worth searching
//!
//! The engine only evaluates guesses whose entropy is close to the best one.
//! This bounds the branching factor but is an approximation: on an unlucky
//! bank the optimal guess can score low and be dropped.

use super::{CandidateSet, compute_guess_heuristic, next_attempt_entropy};
use crate::bank::{Bank, WordId};
use rayon::prelude::*;

/// Pools at least this large are scored in parallel
const PARALLEL_POOL_SIZE: usize = 1024;

/// Tunable pruning parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PruningConfig {
    /// Keep guesses within this many bits of the best entropy
    pub entropy_margin: f64,
    /// Keep at most (roughly) this many guesses; 0 disables the cap
    pub top_k: usize,
    /// Guesses this far below the cutoff get a second look with lookahead
    pub lookahead_band: f64,
    /// Only use lookahead when at most this many attempts remain
    pub lookahead_attempts_left: u32,
}

impl Default for PruningConfig {
    fn default() -> Self {
        Self {
            entropy_margin: 1.0,
            top_k: 128,
            lookahead_band: 0.05,
            lookahead_attempts_left: 3,
        }
    }
}

impl PruningConfig {
    /// Evaluate every guess in the pool
    #[must_use]
    pub const fn exhaustive() -> Self {
        Self {
            entropy_margin: f64::INFINITY,
            top_k: 0,
            lookahead_band: 0.0,
            lookahead_attempts_left: 0,
        }
    }

    #[must_use]
    pub fn is_exhaustive(&self) -> bool {
        self.entropy_margin == f64::INFINITY && self.top_k == 0
    }
}

/// Select the guesses from `pool` worth a full evaluation, in pool order
///
/// `attempts_left` counts the guesses still available at this node, the
/// next one included.
#[must_use]
pub fn shortlist(
    bank: &Bank,
    pool: &[WordId],
    set: &CandidateSet,
    attempts_left: u32,
    config: &PruningConfig,
) -> Vec<WordId> {
    if pool.is_empty() || config.is_exhaustive() {
        return pool.to_vec();
    }

    let entropy = |&guess: &WordId| compute_guess_heuristic(bank, set, guess).entropy;
    let entropies: Vec<f64> = if pool.len() >= PARALLEL_POOL_SIZE {
        pool.par_iter().map(entropy).collect()
    } else {
        pool.iter().map(entropy).collect()
    };

    let max_entropy = entropies.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut threshold = max_entropy - config.entropy_margin;

    if config.top_k > 0 && pool.len() > config.top_k {
        let mut is_target = vec![false; bank.num_words()];
        for &target in set.targets() {
            is_target[target.index()] = true;
        }
        let mut ranked: Vec<(f64, bool)> = pool
            .iter()
            .zip(&entropies)
            .map(|(&guess, &h)| (h, is_target[guess.index()]))
            .collect();
        let (_, cutoff, _) = ranked.select_nth_unstable_by(config.top_k - 1, |a, b| {
            b.0.total_cmp(&a.0).then(b.1.cmp(&a.1))
        });
        threshold = threshold.max(cutoff.0);
    }

    let mut keep: Vec<bool> = entropies.iter().map(|&h| h >= threshold).collect();

    if config.lookahead_band > 0.0 && attempts_left <= config.lookahead_attempts_left {
        admit_by_lookahead(bank, pool, set, &entropies, threshold, config, &mut keep);
    }

    pool.iter()
        .zip(keep)
        .filter_map(|(&guess, kept)| kept.then_some(guess))
        .collect()
}

/// Re-admit near misses whose entropy plus lookahead entropy is at least the
/// lowest such score among the kept guesses
fn admit_by_lookahead(
    bank: &Bank,
    pool: &[WordId],
    set: &CandidateSet,
    entropies: &[f64],
    threshold: f64,
    config: &PruningConfig,
    keep: &mut [bool],
) {
    let band_floor = threshold - config.lookahead_band;
    let near_misses: Vec<usize> = (0..pool.len())
        .filter(|&i| !keep[i] && entropies[i] >= band_floor)
        .collect();
    if near_misses.is_empty() {
        return;
    }

    let score = |i: usize| entropies[i] + next_attempt_entropy(bank, set.targets(), set, pool[i]);
    let floor = (0..pool.len())
        .filter(|&i| keep[i])
        .map(score)
        .fold(f64::INFINITY, f64::min);

    let mut admitted = 0;
    for i in near_misses {
        if score(i) >= floor {
            keep[i] = true;
            admitted += 1;
        }
    }
    log::trace!("Lookahead re-admitted {admitted} guesses below entropy {threshold:.3}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::BankConfig;

    fn bank() -> Bank {
        Bank::new(
            &["aa", "ab", "ba", "bb", "cc", "ac", "ca"],
            4,
            BankConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn shortlist_keeps_the_best_entropy_word() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        let pool: Vec<WordId> = bank.word_ids().collect();
        let config = PruningConfig {
            entropy_margin: 0.1,
            ..PruningConfig::default()
        };

        let kept = shortlist(&bank, &pool, &set, 6, &config);
        let ab = bank.find_word("ab").unwrap();
        let cc = bank.find_word("cc").unwrap();
        assert!(kept.contains(&ab));
        assert!(!kept.contains(&cc));
    }

    #[test]
    fn shortlist_respects_top_k() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        let pool: Vec<WordId> = bank.word_ids().collect();
        let capped = |top_k| PruningConfig {
            entropy_margin: f64::INFINITY,
            top_k,
            lookahead_band: 0.0,
            ..PruningConfig::default()
        };

        // Each target splits the four targets apart (2 bits), "ac" and "ca"
        // score 1.5 bits and "cc" nothing
        let cc = bank.find_word("cc").unwrap();
        let kept = shortlist(&bank, &pool, &set, 6, &capped(5));
        assert_eq!(kept.len(), 6);
        assert!(!kept.contains(&cc));

        // Ties at the cutoff all survive
        let kept = shortlist(&bank, &pool, &set, 6, &capped(2));
        assert_eq!(kept, set.targets());
    }

    #[test]
    fn shortlist_preserves_pool_order() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        let pool: Vec<WordId> = bank.word_ids().rev().collect();
        let kept = shortlist(&bank, &pool, &set, 6, &PruningConfig::default());
        let positions: Vec<usize> = kept
            .iter()
            .map(|id| pool.iter().position(|p| p == id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn exhaustive_keeps_everything() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        let pool: Vec<WordId> = bank.word_ids().collect();
        assert_eq!(
            shortlist(&bank, &pool, &set, 1, &PruningConfig::exhaustive()),
            pool
        );
    }

    #[test]
    fn lookahead_never_drops_kept_words() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        let pool: Vec<WordId> = bank.word_ids().collect();
        let plain = PruningConfig {
            lookahead_band: 0.0,
            ..PruningConfig::default()
        };
        let wide = PruningConfig {
            lookahead_band: 5.0,
            ..PruningConfig::default()
        };

        let without = shortlist(&bank, &pool, &set, 2, &plain);
        let with = shortlist(&bank, &pool, &set, 2, &wide);
        assert!(without.iter().all(|id| with.contains(id)));
    }
}
