//! Information-theoretic guess metrics
//!
//! These only order and prune candidates. They never decide a result.

use super::{CandidateSet, GroupingMode, group_candidates};
use crate::bank::{Bank, WordId};

/// Metrics of one guess against a candidate set's targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessHeuristic {
    /// Verdicts with at least one target
    pub num_groups: usize,
    /// Targets in the largest verdict group (worst case remaining)
    pub largest_group: usize,
    /// Shannon entropy of the verdict distribution, in bits
    pub entropy: f64,
}

/// Shannon entropy of a count distribution
///
/// H = -Σ p * log₂(p), zero counts skipped.
///
/// # Examples
/// ```
/// use wordle_strategist::solver::shannon_entropy;
///
/// assert!((shannon_entropy(&[1, 1, 1, 1]) - 2.0).abs() < 1e-9);
/// assert!(shannon_entropy(&[7]).abs() < 1e-9);
/// ```
#[must_use]
pub fn shannon_entropy(counts: &[u32]) -> f64 {
    let total = counts.iter().map(|&c| f64::from(c)).sum::<f64>();
    if total == 0.0 {
        return 0.0;
    }

    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = f64::from(count) / total;
            -p * p.log2()
        })
        .sum()
}

/// Compute group count, largest group and entropy of `guess` over the
/// targets of `set`
///
/// Works from per-verdict target counts without building groups.
#[must_use]
pub fn compute_guess_heuristic(bank: &Bank, set: &CandidateSet, guess: WordId) -> GuessHeuristic {
    let mut counts = vec![0u32; bank.num_verdicts()];
    for &target in set.targets() {
        counts[bank.verdict(guess, target).index()] += 1;
    }

    let mut num_groups = 0;
    let mut largest_group = 0;
    for &count in &counts {
        if count > 0 {
            num_groups += 1;
            largest_group = largest_group.max(count as usize);
        }
    }

    GuessHeuristic {
        num_groups,
        largest_group,
        entropy: shannon_entropy(&counts),
    }
}

/// Two-attempt lookahead entropy ("H2")
///
/// Expected entropy of the best follow-up guess from `pool`, averaged over
/// the verdict groups `guess` splits `set` into.
#[must_use]
pub fn next_attempt_entropy(
    bank: &Bank,
    pool: &[WordId],
    set: &CandidateSet,
    guess: WordId,
) -> f64 {
    let total = set.num_targets() as f64;
    if total == 0.0 {
        return 0.0;
    }

    group_candidates(bank, set, guess, GroupingMode::TargetsOnly)
        .with_targets()
        .filter(|(_, group)| group.num_targets() > 1)
        .map(|(_, group)| {
            let best = pool
                .iter()
                .map(|&next| compute_guess_heuristic(bank, group, next).entropy)
                .fold(0.0, f64::max);
            group.num_targets() as f64 / total * best
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::BankConfig;

    fn bank() -> Bank {
        Bank::new(
            &["aa", "ab", "ba", "bb", "cc"],
            4,
            BankConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn entropy_of_uniform_and_certain_distributions() {
        assert!((shannon_entropy(&[3, 3, 0, 3, 3]) - 2.0).abs() < 1e-9);
        assert!(shannon_entropy(&[0, 5, 0]).abs() < 1e-9);
        assert!(shannon_entropy(&[]).abs() < 1e-9);
        assert!(shannon_entropy(&[9, 1]) < shannon_entropy(&[5, 5]));
    }

    #[test]
    fn heuristic_counts_groups() {
        let bank = bank();
        let set = CandidateSet::full(&bank);

        // "ab" separates all four targets: aa "#-", ab "##", ba "^^", bb "-#"
        let ab = compute_guess_heuristic(&bank, &set, bank.find_word("ab").unwrap());
        assert_eq!(ab.num_groups, 4);
        assert_eq!(ab.largest_group, 1);
        assert!((ab.entropy - 2.0).abs() < 1e-9);

        // "cc" learns nothing
        let cc = compute_guess_heuristic(&bank, &set, bank.find_word("cc").unwrap());
        assert_eq!(cc.num_groups, 1);
        assert_eq!(cc.largest_group, 4);
        assert!(cc.entropy.abs() < 1e-9);
    }

    #[test]
    fn lookahead_rewards_a_useless_first_guess_with_a_good_second() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        let pool: Vec<WordId> = bank.word_ids().collect();

        // After "cc" everything is still open, and "ab" then splits it fully
        let h2 = next_attempt_entropy(&bank, &pool, &set, bank.find_word("cc").unwrap());
        assert!((h2 - 2.0).abs() < 1e-9);

        // After "ab" every group is a single target
        let h2 = next_attempt_entropy(&bank, &pool, &set, bank.find_word("ab").unwrap());
        assert!(h2.abs() < 1e-9);
    }
}
