//! Verdict calculation and representation
//!
//! A verdict encodes the feedback for one guess against one target as a base-3
//! number, one digit per letter position:
//! - 0 = absent (letter not in the target, or all copies already accounted for)
//! - 1 = present elsewhere
//! - 2 = correct position
//!
//! Position 0 is the most significant digit, so the all-correct verdict of an
//! `L`-letter word is `3^L - 1` and verdicts sort the way their text sorts.

use super::Word;
use std::fmt;
use thiserror::Error;

/// Feedback for a single letter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tile {
    Absent = 0,
    Present = 1,
    Correct = 2,
}

impl Tile {
    /// Canonical display symbol
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Absent => '-',
            Self::Present => '^',
            Self::Correct => '#',
        }
    }

    /// Parse one tile symbol
    ///
    /// Accepts the canonical `-`/`^`/`#`, the letter forms `x`/`b` (absent),
    /// `y` (present), `g` (correct) in either case, `.`/`_` for absent, and the
    /// colored square emoji.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '-' | '.' | '_' | 'x' | 'X' | 'b' | 'B' | '⬜' | '⬛' => Some(Self::Absent),
            '^' | 'y' | 'Y' | '🟨' => Some(Self::Present),
            '#' | 'g' | 'G' | '🟩' => Some(Self::Correct),
            _ => None,
        }
    }

    const fn from_digit(digit: u16) -> Self {
        match digit {
            2 => Self::Correct,
            1 => Self::Present,
            _ => Self::Absent,
        }
    }
}

/// Errors from parsing verdict text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerdictParseError {
    #[error("verdict '{text}' must have {expected} tiles, got {found}")]
    WrongLength {
        text: String,
        expected: usize,
        found: usize,
    },
    #[error("verdict '{text}' contains unknown tile '{tile}' (use - ^ # or G Y -)")]
    UnknownTile { text: String, tile: char },
}

/// Feedback verdict for one guess against one target
///
/// The word length is a property of the bank, so methods that need it take it
/// as an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Verdict(u16);

impl Verdict {
    /// Create a verdict from its raw base-3 value
    #[inline]
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Raw base-3 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Raw value as an index into per-verdict tables
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Number of distinct verdicts for words of `len` letters (`3^len`)
    #[must_use]
    pub const fn count(len: usize) -> usize {
        3usize.pow(len as u32)
    }

    /// The unique terminal verdict: every tile correct
    #[must_use]
    pub const fn all_correct(len: usize) -> Self {
        Self((Self::count(len) - 1) as u16)
    }

    /// Check if this is the all-correct verdict for words of `len` letters
    #[inline]
    #[must_use]
    pub const fn is_all_correct(self, len: usize) -> bool {
        self.0 as usize == Self::count(len) - 1
    }

    /// Build a verdict from tiles, first tile most significant
    #[must_use]
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        Self(tiles.iter().fold(0u16, |acc, &tile| acc * 3 + tile as u16))
    }

    /// Decode into `len` tiles, first position first
    #[must_use]
    pub fn tiles(self, len: usize) -> Vec<Tile> {
        let mut tiles = vec![Tile::Absent; len];
        let mut value = self.0;
        for tile in tiles.iter_mut().rev() {
            *tile = Tile::from_digit(value % 3);
            value /= 3;
        }
        tiles
    }

    /// Format as canonical tile text, e.g. `"--#-#"`
    ///
    /// # Examples
    /// ```
    /// use wordle_strategist::core::{judge, Verdict};
    ///
    /// let verdict = judge(b"crane", b"slate");
    /// assert_eq!(verdict.format(5), "--#-#");
    /// assert_eq!(Verdict::parse("--#-#", 5).unwrap(), verdict);
    /// ```
    #[must_use]
    pub fn format(self, len: usize) -> String {
        self.tiles(len).into_iter().map(Tile::symbol).collect()
    }

    /// Parse tile text of exactly `len` symbols
    ///
    /// # Errors
    /// Returns `VerdictParseError` on a length mismatch or an unknown symbol.
    pub fn parse(text: &str, len: usize) -> Result<Self, VerdictParseError> {
        let symbols: Vec<char> = text.trim().chars().collect();
        if symbols.len() != len {
            return Err(VerdictParseError::WrongLength {
                text: text.to_string(),
                expected: len,
                found: symbols.len(),
            });
        }

        let tiles = symbols
            .into_iter()
            .map(|tile| {
                Tile::from_symbol(tile).ok_or_else(|| VerdictParseError::UnknownTile {
                    text: text.to_string(),
                    tile,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_tiles(&tiles))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Judge `guess` against `target`
///
/// Exact matches are marked first and the remaining target letters counted;
/// then each other guess position consumes one unmatched copy of its letter if
/// any is left. Both slices must have the same length (at most
/// [`Word::MAX_LEN`]).
///
/// # Examples
/// ```
/// use wordle_strategist::core::judge;
///
/// // R and the first O are elsewhere in FLOOR, the second O is in place
/// assert_eq!(judge(b"robot", b"floor").format(5), "^^-#-");
/// ```
#[must_use]
pub fn judge(guess: &[u8], target: &[u8]) -> Verdict {
    debug_assert_eq!(guess.len(), target.len());
    debug_assert!(guess.len() <= Word::MAX_LEN);

    let mut unmatched = [0u8; 256];
    let mut tiles = [Tile::Absent; Word::MAX_LEN];
    let tiles = &mut tiles[..guess.len()];

    for ((tile, &g), &t) in tiles.iter_mut().zip(guess).zip(target) {
        if g == t {
            *tile = Tile::Correct;
        } else {
            unmatched[usize::from(t)] += 1;
        }
    }

    for (tile, &g) in tiles.iter_mut().zip(guess) {
        if *tile == Tile::Correct {
            continue;
        }
        let remaining = &mut unmatched[usize::from(g)];
        if *remaining > 0 {
            *tile = Tile::Present;
            *remaining -= 1;
        }
    }

    Verdict::from_tiles(tiles)
}
