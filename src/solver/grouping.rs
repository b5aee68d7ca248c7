//! Verdict grouping
//!
//! Partitions a candidate set by the verdict a chosen guess would receive
//! against each remaining target.

use super::CandidateSet;
use crate::bank::{Bank, WordId};
use crate::core::Verdict;

/// What to place in each group besides the targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupingMode {
    /// Targets only. Enough for heuristics and for normal mode, where every
    /// bank word stays guessable.
    TargetsOnly,
    /// Also carry every parent entry that stays a legal hard mode guess
    HardMode,
}

/// One candidate set per verdict, indexed by verdict value
#[derive(Debug, Clone)]
pub struct VerdictGroups {
    groups: Vec<CandidateSet>,
}

impl VerdictGroups {
    #[inline]
    #[must_use]
    pub fn get(&self, verdict: Verdict) -> &CandidateSet {
        &self.groups[verdict.index()]
    }

    /// Number of verdict slots (`3^L`)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups that received at least one target, in verdict order
    pub fn with_targets(&self) -> impl Iterator<Item = (Verdict, &CandidateSet)> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.has_targets())
            .map(|(index, group)| (Verdict::new(index as u16), group))
    }

    /// Number of groups with at least one target
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.with_targets().count()
    }

    /// Consume into the per-verdict sets
    #[must_use]
    pub fn into_inner(self) -> Vec<CandidateSet> {
        self.groups
    }
}

/// Group `set` by the verdict `guess` receives against each of its targets
#[must_use]
pub fn group_candidates(
    bank: &Bank,
    set: &CandidateSet,
    guess: WordId,
    mode: GroupingMode,
) -> VerdictGroups {
    let mut groups = vec![CandidateSet::new(); bank.num_verdicts()];

    for &target in set.targets() {
        groups[bank.verdict(guess, target).index()].push_target(target);
    }

    if mode == GroupingMode::HardMode {
        for (index, group) in groups.iter_mut().enumerate() {
            if !group.has_targets() {
                continue;
            }
            let group_verdict = Verdict::new(index as u16);
            for (position, &entry) in set.entries().iter().enumerate() {
                let entry_verdict = bank.verdict(guess, entry);
                let placed_here = position < set.num_targets() && entry_verdict == group_verdict;
                if !placed_here && bank.hard_mode_valid(guess, group_verdict, entry_verdict) {
                    group.push_non_target(entry);
                }
            }
        }
    }

    VerdictGroups { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::BankConfig;

    fn bank() -> Bank {
        Bank::new(
            &["crane", "slate", "plate", "trace", "crony", "grace", "blimp"],
            5,
            BankConfig::default(),
        )
        .unwrap()
    }

    fn id(bank: &Bank, word: &str) -> WordId {
        bank.find_word(word).unwrap()
    }

    #[test]
    fn grouping_is_exhaustive_and_disjoint() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        for guess in bank.word_ids() {
            for mode in [GroupingMode::TargetsOnly, GroupingMode::HardMode] {
                let groups = group_candidates(&bank, &set, guess, mode);
                assert_eq!(groups.len(), 243);

                let total: usize = groups.with_targets().map(|(_, g)| g.num_targets()).sum();
                assert_eq!(total, set.num_targets());

                let mut seen: Vec<WordId> = groups
                    .with_targets()
                    .flat_map(|(_, g)| g.targets().to_vec())
                    .collect();
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), set.num_targets());
            }
        }
    }

    #[test]
    fn targets_land_in_their_verdict_group() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        let crane = id(&bank, "crane");
        let groups = group_candidates(&bank, &set, crane, GroupingMode::TargetsOnly);

        for (verdict, group) in groups.with_targets() {
            assert!(group.non_targets().is_empty());
            for &target in group.targets() {
                assert_eq!(bank.verdict(crane, target), verdict);
            }
        }
        assert_eq!(groups.get(bank.all_correct()).targets(), &[crane]);
    }

    #[test]
    fn hard_mode_groups_carry_legal_guesses() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        let crane = id(&bank, "crane");
        let slate = id(&bank, "slate");
        let groups = group_candidates(&bank, &set, crane, GroupingMode::HardMode);

        // SLATE and PLATE both show "--#-#" against CRANE
        let verdict = bank.verdict(crane, slate);
        let group = groups.get(verdict);
        assert_eq!(group.num_targets(), 2);
        for &entry in group.non_targets() {
            assert!(bank.hard_mode_valid(crane, verdict, bank.verdict(crane, entry)));
            assert!(!group.targets().contains(&entry));
        }
        // CRONY drops the green A and E
        assert!(!group.entries().contains(&id(&bank, "crony")));
    }

    #[test]
    fn empty_groups_stay_empty() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        let groups = group_candidates(&bank, &set, id(&bank, "blimp"), GroupingMode::HardMode);
        let populated = groups.num_groups();
        let non_empty = groups.into_inner().iter().filter(|g| !g.is_empty()).count();
        assert_eq!(populated, non_empty);
    }
}
