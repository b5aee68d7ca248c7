//! Candidate sets
//!
//! A candidate set is the state of one search node: the words that may still
//! be the secret (the targets, always first) followed by words that are only
//! kept around as legal guesses for hard mode bookkeeping.

use crate::bank::{Bank, SetHash, WordId};

/// Ordered word ids with a target prefix
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateSet {
    words: Vec<WordId>,
    num_targets: usize,
}

impl CandidateSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            num_targets: 0,
        }
    }

    /// Every bank word: all bank targets, then all guess-only words
    #[must_use]
    pub fn full(bank: &Bank) -> Self {
        Self {
            words: bank.word_ids().collect(),
            num_targets: bank.num_targets(),
        }
    }

    /// Build from separate target and non-target lists
    #[must_use]
    pub fn from_parts(targets: &[WordId], non_targets: &[WordId]) -> Self {
        let mut words = Vec::with_capacity(targets.len() + non_targets.len());
        words.extend_from_slice(targets);
        words.extend_from_slice(non_targets);
        Self {
            words,
            num_targets: targets.len(),
        }
    }

    /// Append a target
    ///
    /// Targets must all be pushed before the first non-target.
    #[inline]
    pub fn push_target(&mut self, id: WordId) {
        debug_assert_eq!(self.words.len(), self.num_targets);
        self.words.push(id);
        self.num_targets += 1;
    }

    #[inline]
    pub fn push_non_target(&mut self, id: WordId) {
        self.words.push(id);
    }

    /// All entries, targets first
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[WordId] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub fn targets(&self) -> &[WordId] {
        &self.words[..self.num_targets]
    }

    #[inline]
    #[must_use]
    pub fn non_targets(&self) -> &[WordId] {
        &self.words[self.num_targets..]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn num_targets(&self) -> usize {
        self.num_targets
    }

    #[inline]
    #[must_use]
    pub fn has_targets(&self) -> bool {
        self.num_targets > 0
    }

    /// Target with the lowest id, whatever order the targets are stored in
    ///
    /// # Panics
    /// Panics if the set has no targets.
    #[must_use]
    pub fn lowest_target(&self) -> WordId {
        let targets = self.targets();
        targets.iter().copied().fold(targets[0], WordId::min)
    }

    /// Order-independent hash of the target and non-target membership
    #[must_use]
    pub fn content_hash(&self, bank: &Bank) -> SetHash {
        let targets = self
            .targets()
            .iter()
            .fold(SetHash::default(), |hash, &id| hash.with(bank.hash_key(id, true)));
        self.non_targets()
            .iter()
            .fold(targets, |hash, &id| hash.with(bank.hash_key(id, false)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::BankConfig;

    fn ids(list: &[usize]) -> Vec<WordId> {
        list.iter().copied().map(WordId::new).collect()
    }

    fn bank() -> Bank {
        Bank::new(&["aa", "ab", "ba", "bb", "ca"], 3, BankConfig::default()).unwrap()
    }

    #[test]
    fn full_set_mirrors_bank() {
        let bank = bank();
        let set = CandidateSet::full(&bank);
        assert_eq!(set.len(), 5);
        assert_eq!(set.num_targets(), 3);
        assert_eq!(set.targets(), ids(&[0, 1, 2]).as_slice());
        assert_eq!(set.non_targets(), ids(&[3, 4]).as_slice());
    }

    #[test]
    fn push_keeps_target_prefix() {
        let mut set = CandidateSet::new();
        assert!(!set.has_targets());
        set.push_target(WordId::new(2));
        set.push_target(WordId::new(0));
        set.push_non_target(WordId::new(4));
        assert_eq!(set.targets(), ids(&[2, 0]).as_slice());
        assert_eq!(set.non_targets(), ids(&[4]).as_slice());
    }

    #[test]
    fn content_hash_ignores_order() {
        let bank = bank();
        let a = CandidateSet::from_parts(&ids(&[0, 1, 2]), &ids(&[3, 4]));
        let b = CandidateSet::from_parts(&ids(&[2, 0, 1]), &ids(&[4, 3]));
        assert_eq!(a.content_hash(&bank), b.content_hash(&bank));
        assert_eq!(b.lowest_target(), WordId::new(0));
    }

    #[test]
    fn content_hash_tracks_roles_and_members() {
        let bank = bank();
        let base = CandidateSet::from_parts(&ids(&[0, 1]), &ids(&[2]));
        let swapped = CandidateSet::from_parts(&ids(&[0, 2]), &ids(&[1]));
        let smaller = CandidateSet::from_parts(&ids(&[0, 1]), &[]);
        let hash = base.content_hash(&bank);
        assert_ne!(hash, swapped.content_hash(&bank));
        assert_ne!(hash, smaller.content_hash(&bank));
    }
}
