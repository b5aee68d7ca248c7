//! Formatting utilities for terminal output

use crate::bank::Bank;
use crate::core::{Tile, Verdict};
use crate::solver::StrategyNode;

/// Format a verdict as emoji squares
#[must_use]
pub fn verdict_to_emoji(verdict: Verdict, len: usize) -> String {
    verdict
        .tiles(len)
        .into_iter()
        .map(|tile| match tile {
            Tile::Absent => '⬜',
            Tile::Present => '🟨',
            Tile::Correct => '🟩',
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format entropy as a bar relative to the most a guess could split
/// `num_targets` targets
#[must_use]
pub fn entropy_bar(entropy: f64, num_targets: usize, width: usize) -> String {
    create_progress_bar(entropy, (num_targets as f64).log2(), width)
}

/// Render a strategy tree as indented `guess verdict next-guess` lines
///
/// Verdicts are listed from all-correct down. `max_depth` limits how many
/// levels of guesses are expanded.
#[must_use]
pub fn render_strategy_tree(bank: &Bank, root: &StrategyNode, max_depth: Option<usize>) -> String {
    let mut out = String::new();
    render_node(bank, root, 0, max_depth, &mut out);
    out
}

fn render_node(
    bank: &Bank,
    node: &StrategyNode,
    depth: usize,
    max_depth: Option<usize>,
    out: &mut String,
) {
    if max_depth.is_some_and(|max| depth >= max) {
        return;
    }
    let indent = "  ".repeat(depth);
    for (&verdict, follow_up) in node.follow_ups.iter().rev() {
        let prefix = format!(
            "{indent}{} {}",
            bank.text(node.guess),
            bank.format_verdict(verdict)
        );
        match follow_up {
            None => {
                out.push_str(&prefix);
                out.push_str(" solved\n");
            }
            Some(child) => {
                out.push_str(&format!(
                    "{prefix} {} (GL: {}, TL: {}, EA: {:.3})\n",
                    bank.text(child.guess),
                    child.num_remaining_words,
                    child.num_remaining_targets,
                    child.mean_attempts()
                ));
                render_node(bank, child, depth + 1, max_depth, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::BankConfig;
    use crate::solver::{Attempts, CandidateSet, SearchCache, SearchConfig, Solver};

    #[test]
    fn verdict_to_emoji_all_correct() {
        assert_eq!(verdict_to_emoji(Verdict::all_correct(5), 5), "🟩🟩🟩🟩🟩");
    }

    #[test]
    fn verdict_to_emoji_mixed() {
        let verdict = Verdict::parse("-^#", 3).unwrap();
        assert_eq!(verdict_to_emoji(verdict, 3), "⬜🟨🟩");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(150.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn entropy_bar_of_single_target_is_empty() {
        assert_eq!(entropy_bar(0.0, 1, 4), "░░░░");
        assert_eq!(entropy_bar(3.0, 8, 4), "████");
    }

    #[test]
    fn strategy_tree_lists_verdicts_from_all_correct_down() {
        let bank = Bank::new(&["aa", "ab", "ba", "bb"], 4, BankConfig::default()).unwrap();
        let solver = Solver::new(&bank, SearchConfig::default());
        let set = CandidateSet::full(&bank);
        let root = solver
            .find_best_strategy(&mut SearchCache::new(), Attempts::new(6), &set, bank.find_word("ab"))
            .unwrap();

        let shallow = render_strategy_tree(&bank, &root, Some(1));
        assert_eq!(
            shallow,
            "ab ## solved\n\
             ab #- aa (GL: 1, TL: 1, EA: 2.000)\n\
             ab ^^ ba (GL: 1, TL: 1, EA: 2.000)\n\
             ab -# bb (GL: 1, TL: 1, EA: 2.000)\n"
        );

        let full = render_strategy_tree(&bank, &root, None);
        assert_eq!(full.lines().count(), 7);
        assert!(full.contains("\n  aa ## solved\n"));
    }
}
