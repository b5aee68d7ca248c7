//! Hard mode legality
//!
//! Under hard mode every revealed hint must be used by later guesses. Whether a
//! word may follow `prev_guess` depends only on the verdict that word itself
//! produces against `prev_guess`, which is what lets the bank tabulate it per
//! verdict pair instead of per word.

use super::{Tile, Verdict};

/// Which hard mode variant to enforce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HardModeRule {
    /// Greens stay in place, yellows are reused somewhere (the game's rule)
    #[default]
    Standard,
    /// Additionally, a yellow letter may not return to the position it was
    /// marked in, and no letter may be used more often than feedback allows
    Strict,
}

/// Check whether `candidate` may be guessed after `prev_guess` produced
/// `prev_verdict`
///
/// # Examples
/// ```
/// use wordle_strategist::core::{is_hard_mode_valid, judge, HardModeRule};
///
/// // CRANE against SLATE leaves A and E green
/// let verdict = judge(b"crane", b"slate");
/// assert!(is_hard_mode_valid(HardModeRule::Standard, b"crane", verdict, b"plate"));
/// assert!(!is_hard_mode_valid(HardModeRule::Standard, b"crane", verdict, b"crony"));
/// ```
#[must_use]
pub fn is_hard_mode_valid(
    rule: HardModeRule,
    prev_guess: &[u8],
    prev_verdict: Verdict,
    candidate: &[u8],
) -> bool {
    let tiles = prev_verdict.tiles(prev_guess.len());

    let mut required = [0u8; 256];
    let mut capped = [false; 256];
    let mut used = [0u8; 256];

    for ((&tile, &prev), &next) in tiles.iter().zip(prev_guess).zip(candidate) {
        match tile {
            Tile::Correct => {
                if next != prev {
                    return false;
                }
                required[usize::from(prev)] += 1;
            }
            Tile::Present => {
                if rule == HardModeRule::Strict && next == prev {
                    return false;
                }
                required[usize::from(prev)] += 1;
            }
            Tile::Absent => capped[usize::from(prev)] = true,
        }
        used[usize::from(next)] += 1;
    }

    prev_guess.iter().all(|&letter| {
        let letter = usize::from(letter);
        let enough = used[letter] >= required[letter];
        let not_too_many =
            rule == HardModeRule::Standard || !capped[letter] || used[letter] <= required[letter];
        enough && not_too_many
    })
}
