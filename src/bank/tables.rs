//! Precomputed per-bank lookup tables
//!
//! Both tables are filled one guess row at a time with rayon. Rows are
//! independent, so the result does not depend on scheduling.

use super::WordId;
use crate::core::{HardModeRule, Verdict, Word, is_hard_mode_valid, judge};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Storage cell for one verdict
trait VerdictCell: Copy + Default + Send + Sync {
    fn pack(verdict: Verdict) -> Self;
    fn unpack(self) -> Verdict;
}

impl VerdictCell for u8 {
    #[inline]
    fn pack(verdict: Verdict) -> Self {
        verdict.value() as Self
    }

    #[inline]
    fn unpack(self) -> Verdict {
        Verdict::new(u16::from(self))
    }
}

impl VerdictCell for u16 {
    #[inline]
    fn pack(verdict: Verdict) -> Self {
        verdict.value()
    }

    #[inline]
    fn unpack(self) -> Verdict {
        Verdict::new(self)
    }
}

/// `judge(guess, target)` for every ordered pair, row-major by guess
///
/// Verdicts of words up to five letters fit a byte; longer words use two.
pub(crate) enum VerdictMatrix {
    Narrow { num_words: usize, cells: Vec<u8> },
    Wide { num_words: usize, cells: Vec<u16> },
}

impl VerdictMatrix {
    pub(crate) fn build(words: &[Word], word_len: usize) -> Self {
        let num_words = words.len();
        if Verdict::count(word_len) <= 256 {
            Self::Narrow {
                num_words,
                cells: build_cells(words),
            }
        } else {
            Self::Wide {
                num_words,
                cells: build_cells(words),
            }
        }
    }

    #[inline]
    pub(crate) fn get(&self, guess: WordId, target: WordId) -> Verdict {
        match self {
            Self::Narrow { num_words, cells } => {
                cells[guess.index() * num_words + target.index()].unpack()
            }
            Self::Wide { num_words, cells } => {
                cells[guess.index() * num_words + target.index()].unpack()
            }
        }
    }
}

fn build_cells<C: VerdictCell>(words: &[Word]) -> Vec<C> {
    let num_words = words.len();
    let mut cells = vec![C::default(); num_words * num_words];
    let rows_done = AtomicUsize::new(0);

    cells
        .par_chunks_mut(num_words)
        .zip(words.par_iter())
        .for_each(|(row, guess)| {
            for (cell, target) in row.iter_mut().zip(words) {
                *cell = C::pack(judge(guess.bytes(), target.bytes()));
            }
            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done.is_power_of_two() {
                log::debug!("Precomputing judge data: {done}/{num_words} guesses");
            }
        });

    cells
}

/// Largest verdict count stored as a full `V × V` bit square per guess
const DENSE_MAX_VERDICTS: usize = 243;

/// `hard_mode_valid[prev_guess][prev_verdict][candidate_verdict]` as a bit
/// table
///
/// Only verdict pairs that actually occur for a guess are filled in; every
/// other pair reads as illegal. Up to five letters each guess gets a full
/// `V × V` square. Longer words list the verdicts each guess produces and
/// keep a square over just those, since `V²` bits per guess would not fit.
pub(crate) enum HardModeTable {
    Dense {
        num_verdicts: usize,
        blocks_per_guess: usize,
        bits: Vec<u64>,
    },
    Compact {
        /// Sorted verdicts each guess produces, concatenated
        occurring: Vec<u16>,
        /// Start of each guess's verdicts in `occurring`, plus the end
        verdict_offsets: Vec<usize>,
        bits: Vec<u64>,
        /// Start of each guess's square in `bits`
        block_offsets: Vec<usize>,
    },
}

impl HardModeTable {
    pub(crate) fn build(
        words: &[Word],
        word_len: usize,
        verdicts: &VerdictMatrix,
        rule: HardModeRule,
    ) -> Self {
        let num_verdicts = Verdict::count(word_len);
        if num_verdicts <= DENSE_MAX_VERDICTS {
            Self::build_dense(words, num_verdicts, verdicts, rule)
        } else {
            Self::build_compact(words, verdicts, rule)
        }
    }

    fn build_dense(
        words: &[Word],
        num_verdicts: usize,
        verdicts: &VerdictMatrix,
        rule: HardModeRule,
    ) -> Self {
        let blocks_per_guess = (num_verdicts * num_verdicts).div_ceil(64);
        let mut bits = vec![0u64; words.len() * blocks_per_guess];

        bits.par_chunks_mut(blocks_per_guess)
            .enumerate()
            .for_each(|(guess_index, blocks)| {
                let occurring = occurring_verdicts(words, verdicts, guess_index);
                fill_square(words, rule, guess_index, &occurring, blocks, |pv, cv| {
                    occurring[pv].0 * num_verdicts + occurring[cv].0
                });
            });

        Self::Dense {
            num_verdicts,
            blocks_per_guess,
            bits,
        }
    }

    fn build_compact(words: &[Word], verdicts: &VerdictMatrix, rule: HardModeRule) -> Self {
        let rows: Vec<(Vec<u16>, Vec<u64>)> = (0..words.len())
            .into_par_iter()
            .map(|guess_index| {
                let occurring = occurring_verdicts(words, verdicts, guess_index);
                let m = occurring.len();
                let mut blocks = vec![0u64; (m * m).div_ceil(64)];
                fill_square(words, rule, guess_index, &occurring, &mut blocks, |pv, cv| {
                    pv * m + cv
                });
                let listed = occurring.iter().map(|&(verdict, _)| verdict as u16).collect();
                (listed, blocks)
            })
            .collect();

        let mut occurring = Vec::new();
        let mut verdict_offsets = Vec::with_capacity(rows.len() + 1);
        let mut bits = Vec::new();
        let mut block_offsets = Vec::with_capacity(rows.len());
        for (listed, blocks) in rows {
            verdict_offsets.push(occurring.len());
            block_offsets.push(bits.len());
            occurring.extend(listed);
            bits.extend(blocks);
        }
        verdict_offsets.push(occurring.len());

        Self::Compact {
            occurring,
            verdict_offsets,
            bits,
            block_offsets,
        }
    }

    #[inline]
    pub(crate) fn get(
        &self,
        prev_guess: WordId,
        prev_verdict: Verdict,
        candidate_verdict: Verdict,
    ) -> bool {
        match self {
            Self::Dense {
                num_verdicts,
                blocks_per_guess,
                bits,
            } => {
                let bit = prev_verdict.index() * num_verdicts + candidate_verdict.index();
                let block = bits[prev_guess.index() * blocks_per_guess + bit / 64];
                block >> (bit % 64) & 1 == 1
            }
            Self::Compact {
                occurring,
                verdict_offsets,
                bits,
                block_offsets,
            } => {
                let guess = prev_guess.index();
                let listed = &occurring[verdict_offsets[guess]..verdict_offsets[guess + 1]];
                let (Ok(pv), Ok(cv)) = (
                    listed.binary_search(&prev_verdict.value()),
                    listed.binary_search(&candidate_verdict.value()),
                ) else {
                    return false;
                };
                let bit = pv * listed.len() + cv;
                let block = bits[block_offsets[guess] + bit / 64];
                block >> (bit % 64) & 1 == 1
            }
        }
    }

    /// Heap footprint in bytes
    pub(crate) fn size_bytes(&self) -> usize {
        match self {
            Self::Dense { bits, .. } => bits.len() * std::mem::size_of::<u64>(),
            Self::Compact {
                occurring,
                verdict_offsets,
                bits,
                block_offsets,
            } => {
                occurring.len() * std::mem::size_of::<u16>()
                    + (verdict_offsets.len() + block_offsets.len()) * std::mem::size_of::<usize>()
                    + bits.len() * std::mem::size_of::<u64>()
            }
        }
    }
}

/// Verdicts `guess` produces against the bank, ascending, each with one
/// word producing it
///
/// One sample per verdict is enough: legality only depends on the verdict the
/// candidate produces against the guess.
fn occurring_verdicts(
    words: &[Word],
    verdicts: &VerdictMatrix,
    guess_index: usize,
) -> Vec<(usize, WordId)> {
    let guess = WordId::new(guess_index);
    let mut samples: Vec<(usize, WordId)> = (0..words.len())
        .map(|target_index| {
            let target = WordId::new(target_index);
            (verdicts.get(guess, target).index(), target)
        })
        .collect();
    samples.sort_unstable_by_key(|&(verdict, _)| verdict);
    samples.dedup_by_key(|&mut (verdict, _)| verdict);
    samples
}

/// Set the bit `bit_index(pv, cv)` for every legal pair of occurring
/// verdicts, `pv` and `cv` being positions in `occurring`
fn fill_square<F>(
    words: &[Word],
    rule: HardModeRule,
    guess_index: usize,
    occurring: &[(usize, WordId)],
    blocks: &mut [u64],
    bit_index: F,
) where
    F: Fn(usize, usize) -> usize,
{
    let guess_bytes = words[guess_index].bytes();
    for (pv, &(prev_verdict, _)) in occurring.iter().enumerate() {
        for (cv, &(_, sample)) in occurring.iter().enumerate() {
            if is_hard_mode_valid(
                rule,
                guess_bytes,
                Verdict::new(prev_verdict as u16),
                words[sample.index()].bytes(),
            ) {
                let bit = bit_index(pv, cv);
                blocks[bit / 64] |= 1 << (bit % 64);
            }
        }
    }
}

/// Zobrist keys for order-independent candidate-set hashing
///
/// Each word gets two independent 128-bit keys: one used while it is a
/// target, one while it is only a guess.
pub(crate) fn zobrist_keys(num_words: usize, seed: u64) -> Vec<[u64; 2]> {
    let mut state = seed;
    (0..num_words * 2)
        .map(|_| [splitmix64(&mut state), splitmix64(&mut state)])
        .collect()
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(*w).unwrap()).collect()
    }

    #[test]
    fn narrow_and_wide_agree_with_judge() {
        let five = words(&["crane", "slate", "geese"]);
        let matrix = VerdictMatrix::build(&five, 5);
        assert!(matches!(matrix, VerdictMatrix::Narrow { .. }));
        for (g, guess) in five.iter().enumerate() {
            for (t, target) in five.iter().enumerate() {
                assert_eq!(
                    matrix.get(WordId::new(g), WordId::new(t)),
                    judge(guess.bytes(), target.bytes())
                );
            }
        }

        let six = words(&["planet", "planes", "tables"]);
        let matrix = VerdictMatrix::build(&six, 6);
        assert!(matches!(matrix, VerdictMatrix::Wide { .. }));
        assert_eq!(
            matrix.get(WordId::new(0), WordId::new(0)),
            Verdict::all_correct(6)
        );
        assert_eq!(
            matrix.get(WordId::new(0), WordId::new(1)),
            judge(b"planet", b"planes")
        );
    }

    #[test]
    fn hard_mode_table_matches_direct_check() {
        let list = words(&["crane", "slate", "plate", "crony", "trace", "eerie"]);
        let matrix = VerdictMatrix::build(&list, 5);
        let table = HardModeTable::build(&list, 5, &matrix, HardModeRule::Standard);
        assert!(matches!(table, HardModeTable::Dense { .. }));

        for g in 0..list.len() {
            for t in 0..list.len() {
                for c in 0..list.len() {
                    let prev_verdict = matrix.get(WordId::new(g), WordId::new(t));
                    let candidate_verdict = matrix.get(WordId::new(g), WordId::new(c));
                    assert_eq!(
                        table.get(WordId::new(g), prev_verdict, candidate_verdict),
                        is_hard_mode_valid(
                            HardModeRule::Standard,
                            list[g].bytes(),
                            prev_verdict,
                            list[c].bytes()
                        )
                    );
                }
            }
        }
    }

    #[test]
    fn compact_table_matches_direct_check() {
        let list = words(&["planet", "planes", "tables", "staple", "pellet"]);
        let matrix = VerdictMatrix::build(&list, 6);
        let table = HardModeTable::build(&list, 6, &matrix, HardModeRule::Standard);
        assert!(matches!(table, HardModeTable::Compact { .. }));

        for g in 0..list.len() {
            for t in 0..list.len() {
                for c in 0..list.len() {
                    let prev_verdict = matrix.get(WordId::new(g), WordId::new(t));
                    let candidate_verdict = matrix.get(WordId::new(g), WordId::new(c));
                    assert_eq!(
                        table.get(WordId::new(g), prev_verdict, candidate_verdict),
                        is_hard_mode_valid(
                            HardModeRule::Standard,
                            list[g].bytes(),
                            prev_verdict,
                            list[c].bytes()
                        )
                    );
                }
            }
        }

        // Verdicts a guess never produces read as illegal
        assert!(!table.get(WordId::new(0), Verdict::new(0), Verdict::new(0)));
    }

    #[test]
    fn zobrist_keys_are_deterministic_and_distinct() {
        let a = zobrist_keys(50, 7);
        let b = zobrist_keys(50, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 100);

        let unique: std::collections::HashSet<_> = a.iter().collect();
        assert_eq!(unique.len(), a.len());
    }
}
