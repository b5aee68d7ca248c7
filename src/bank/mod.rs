//! Word bank: the immutable corpus every search runs against
//!
//! A bank holds the target words first and the remaining guessable words
//! after them. Building one precomputes the verdict of every ordered word
//! pair and the hard mode legality table, so that nothing during search has
//! to look at letters again.

mod tables;

use crate::core::{HardModeRule, Verdict, VerdictParseError, Word, WordError};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tables::{HardModeTable, VerdictMatrix, zobrist_keys};
use thiserror::Error;

static NEXT_BANK_ID: AtomicU64 = AtomicU64::new(1);

const ZOBRIST_SEED: u64 = 0x5EED_0F_B4_2C_17_E5;

/// Index of a word inside its bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(u32);

impl WordId {
    /// Banks are capped far below `u32::MAX` words.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        Self(index as u32)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bank construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankConfig {
    /// Upper bound on total words. The verdict matrix grows quadratically.
    pub max_words: usize,
    pub hard_mode_rule: HardModeRule,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            max_words: 1 << 14,
            hard_mode_rule: HardModeRule::Standard,
        }
    }
}

/// Errors from building a bank
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("bank has no words")]
    Empty,
    #[error("bank needs between 1 and {num_words} targets, got {num_targets}")]
    TargetCount { num_targets: usize, num_words: usize },
    #[error("bank has {num_words} words, the configured capacity is {max_words}")]
    CapacityExceeded { num_words: usize, max_words: usize },
    #[error("invalid word at position {index}: {source}")]
    InvalidWord {
        index: usize,
        #[source]
        source: WordError,
    },
    #[error("duplicate word '{word}' at positions {first} and {second}")]
    DuplicateWord {
        word: String,
        first: usize,
        second: usize,
    },
}

/// 128-bit order-independent hash of a candidate set's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SetHash {
    xor: u64,
    sum: u64,
}

impl SetHash {
    /// Fold one word key into the hash
    #[inline]
    #[must_use]
    pub fn with(self, key: [u64; 2]) -> Self {
        Self {
            xor: self.xor ^ key[0],
            sum: self.sum.wrapping_add(key[1]),
        }
    }
}

/// Immutable word corpus with precomputed judging tables
pub struct Bank {
    id: u64,
    word_len: usize,
    num_targets: usize,
    hard_mode_rule: HardModeRule,
    words: Vec<Word>,
    lookup: FxHashMap<String, WordId>,
    verdicts: VerdictMatrix,
    hard_mode: HardModeTable,
    keys: Vec<[u64; 2]>,
}

impl Bank {
    /// Build a bank from `words`, the first `num_targets` of which are targets
    ///
    /// Blocks until both tables are computed.
    ///
    /// # Errors
    /// Returns `BankError` if the list is empty, too large, has a bad target
    /// count, contains an invalid word or a word of a different length, or
    /// repeats a word.
    ///
    /// # Examples
    /// ```
    /// use wordle_strategist::bank::{Bank, BankConfig};
    ///
    /// let bank = Bank::new(&["crane", "slate", "trace"], 2, BankConfig::default()).unwrap();
    /// assert_eq!(bank.num_words(), 3);
    /// assert_eq!(bank.num_targets(), 2);
    /// assert!(bank.find_word("SLATE").is_some());
    /// ```
    pub fn new<S: AsRef<str>>(
        words: &[S],
        num_targets: usize,
        config: BankConfig,
    ) -> Result<Self, BankError> {
        if words.is_empty() {
            return Err(BankError::Empty);
        }
        if num_targets == 0 || num_targets > words.len() {
            return Err(BankError::TargetCount {
                num_targets,
                num_words: words.len(),
            });
        }
        if words.len() > config.max_words {
            return Err(BankError::CapacityExceeded {
                num_words: words.len(),
                max_words: config.max_words,
            });
        }

        let word_len = Word::new(words[0].as_ref())
            .map_err(|source| BankError::InvalidWord { index: 0, source })?
            .len();

        let mut validated = Vec::with_capacity(words.len());
        let mut lookup = FxHashMap::default();
        for (index, text) in words.iter().enumerate() {
            let word = Word::with_len(text.as_ref(), word_len)
                .map_err(|source| BankError::InvalidWord { index, source })?;
            if let Some(first) = lookup.insert(word.text().to_string(), WordId::new(index)) {
                return Err(BankError::DuplicateWord {
                    word: word.text().to_string(),
                    first: first.index(),
                    second: index,
                });
            }
            validated.push(word);
        }

        let verdicts = VerdictMatrix::build(&validated, word_len);
        let hard_mode =
            HardModeTable::build(&validated, word_len, &verdicts, config.hard_mode_rule);
        let keys = zobrist_keys(validated.len(), ZOBRIST_SEED);

        log::debug!(
            "Bank ready: {} words ({} targets) of {} letters, hard mode table {} KiB",
            validated.len(),
            num_targets,
            word_len,
            hard_mode.size_bytes() / 1024
        );

        Ok(Self {
            id: NEXT_BANK_ID.fetch_add(1, Ordering::Relaxed),
            word_len,
            num_targets,
            hard_mode_rule: config.hard_mode_rule,
            words: validated,
            lookup,
            verdicts,
            hard_mode,
            keys,
        })
    }

    /// Identity of this bank instance; caches compare it to detect reuse
    /// across banks
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn word_len(&self) -> usize {
        self.word_len
    }

    #[inline]
    #[must_use]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub const fn num_targets(&self) -> usize {
        self.num_targets
    }

    /// Number of distinct verdicts (`3^L`)
    #[inline]
    #[must_use]
    pub const fn num_verdicts(&self) -> usize {
        Verdict::count(self.word_len)
    }

    #[inline]
    #[must_use]
    pub const fn hard_mode_rule(&self) -> HardModeRule {
        self.hard_mode_rule
    }

    #[inline]
    #[must_use]
    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id.index()]
    }

    #[inline]
    #[must_use]
    pub fn text(&self, id: WordId) -> &str {
        self.words[id.index()].text()
    }

    #[inline]
    #[must_use]
    pub const fn is_target(&self, id: WordId) -> bool {
        id.index() < self.num_targets
    }

    /// All word ids, targets first
    pub fn word_ids(&self) -> impl DoubleEndedIterator<Item = WordId> + '_ {
        (0..self.words.len()).map(WordId::new)
    }

    /// Verdict of `guess` against `target`
    #[inline]
    #[must_use]
    pub fn verdict(&self, guess: WordId, target: WordId) -> Verdict {
        self.verdicts.get(guess, target)
    }

    /// Whether a word producing `candidate_verdict` against `prev_guess` may
    /// be guessed after `prev_guess` received `prev_verdict`
    ///
    /// Both verdicts must be ones `prev_guess` produces against some bank
    /// word; any other pair reads as illegal.
    #[inline]
    #[must_use]
    pub fn hard_mode_valid(
        &self,
        prev_guess: WordId,
        prev_verdict: Verdict,
        candidate_verdict: Verdict,
    ) -> bool {
        self.hard_mode.get(prev_guess, prev_verdict, candidate_verdict)
    }

    #[inline]
    #[must_use]
    pub const fn all_correct(&self) -> Verdict {
        Verdict::all_correct(self.word_len)
    }

    /// Look a word up by text, ignoring case and surrounding whitespace
    #[must_use]
    pub fn find_word(&self, text: &str) -> Option<WordId> {
        self.lookup.get(&text.trim().to_ascii_lowercase()).copied()
    }

    #[must_use]
    pub fn format_verdict(&self, verdict: Verdict) -> String {
        verdict.format(self.word_len)
    }

    /// Parse verdict text of this bank's word length
    ///
    /// # Errors
    /// Returns `VerdictParseError` on a length mismatch or unknown symbol.
    pub fn parse_verdict(&self, text: &str) -> Result<Verdict, VerdictParseError> {
        Verdict::parse(text, self.word_len)
    }

    /// Content-hash key of `id` in the role it plays inside a candidate set
    #[inline]
    #[must_use]
    pub fn hash_key(&self, id: WordId, as_target: bool) -> [u64; 2] {
        self.keys[id.index() * 2 + usize::from(!as_target)]
    }
}

impl fmt::Debug for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bank")
            .field("id", &self.id)
            .field("word_len", &self.word_len)
            .field("num_words", &self.words.len())
            .field("num_targets", &self.num_targets)
            .field("hard_mode_rule", &self.hard_mode_rule)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::judge;

    fn bank(words: &[&str], num_targets: usize) -> Bank {
        Bank::new(words, num_targets, BankConfig::default()).unwrap()
    }

    #[test]
    fn bank_construction_records_counts() {
        let bank = bank(&["crane", "slate", "trace", "plate"], 2);
        assert_eq!(bank.num_words(), 4);
        assert_eq!(bank.num_targets(), 2);
        assert_eq!(bank.word_len(), 5);
        assert_eq!(bank.num_verdicts(), 243);
        assert!(bank.is_target(WordId::new(1)));
        assert!(!bank.is_target(WordId::new(2)));
    }

    #[test]
    fn bank_normalizes_and_finds_words() {
        let bank = bank(&["CRANE", " Slate"], 2);
        assert_eq!(bank.text(WordId::new(0)), "crane");
        assert_eq!(bank.find_word("slate"), Some(WordId::new(1)));
        assert_eq!(bank.find_word("SLATE\n"), Some(WordId::new(1)));
        assert_eq!(bank.find_word("plate"), None);
    }

    #[test]
    fn bank_rejects_bad_input() {
        let config = BankConfig::default();
        let empty: [&str; 0] = [];
        assert_eq!(Bank::new(&empty, 0, config).unwrap_err(), BankError::Empty);
        assert!(matches!(
            Bank::new(&["crane"], 0, config),
            Err(BankError::TargetCount { .. })
        ));
        assert!(matches!(
            Bank::new(&["crane"], 2, config),
            Err(BankError::TargetCount { .. })
        ));
        assert!(matches!(
            Bank::new(&["crane", "slates"], 1, config),
            Err(BankError::InvalidWord {
                index: 1,
                source: WordError::WrongLength { .. }
            })
        ));
        assert!(matches!(
            Bank::new(&["cr4ne"], 1, config),
            Err(BankError::InvalidWord { index: 0, .. })
        ));
        assert!(matches!(
            Bank::new(&["abcdefghi"], 1, config),
            Err(BankError::InvalidWord {
                source: WordError::TooLong { .. },
                ..
            })
        ));
        assert_eq!(
            Bank::new(&["crane", "slate", "Crane"], 1, config).unwrap_err(),
            BankError::DuplicateWord {
                word: "crane".to_string(),
                first: 0,
                second: 2
            }
        );
    }

    #[test]
    fn bank_capacity_is_enforced() {
        let config = BankConfig {
            max_words: 2,
            ..BankConfig::default()
        };
        assert!(matches!(
            Bank::new(&["aa", "ab", "ac"], 1, config),
            Err(BankError::CapacityExceeded {
                num_words: 3,
                max_words: 2
            })
        ));
    }

    #[test]
    fn verdicts_match_judge() {
        let words = ["crane", "slate", "geese", "those"];
        let bank = bank(&words, 4);
        for g in bank.word_ids() {
            for t in bank.word_ids() {
                assert_eq!(
                    bank.verdict(g, t),
                    judge(words[g.index()].as_bytes(), words[t.index()].as_bytes())
                );
            }
        }
    }

    #[test]
    fn hard_mode_table_is_reflexive() {
        // A word consistent with the feedback is always a legal follow-up
        let bank = bank(&["crane", "slate", "plate", "crony", "trace", "abbey"], 6);
        for g in bank.word_ids() {
            for t in bank.word_ids() {
                let verdict = bank.verdict(g, t);
                assert!(bank.hard_mode_valid(g, verdict, verdict));
            }
        }
    }

    #[test]
    fn hard_mode_table_rejects_dropped_greens() {
        let bank = bank(&["crane", "slate", "crony"], 3);
        let crane = bank.find_word("crane").unwrap();
        let slate = bank.find_word("slate").unwrap();
        let crony = bank.find_word("crony").unwrap();
        let shown = bank.verdict(crane, slate);
        assert!(!bank.hard_mode_valid(crane, shown, bank.verdict(crane, crony)));
    }

    #[test]
    fn verdict_text_uses_bank_length() {
        let bank = bank(&["ab", "ba"], 2);
        let verdict = bank.verdict(WordId::new(0), WordId::new(1));
        assert_eq!(bank.format_verdict(verdict), "^^");
        assert_eq!(bank.parse_verdict("^^").unwrap(), verdict);
        assert!(bank.parse_verdict("^^^").is_err());
        assert_eq!(bank.all_correct().value(), 8);
    }

    #[test]
    fn banks_get_distinct_ids() {
        let a = bank(&["ab"], 1);
        let b = bank(&["ab"], 1);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn hash_keys_differ_by_role() {
        let bank = bank(&["ab", "ba"], 1);
        let id = WordId::new(0);
        assert_ne!(bank.hash_key(id, true), bank.hash_key(id, false));
        assert_ne!(bank.hash_key(id, true), bank.hash_key(WordId::new(1), true));
    }
}
