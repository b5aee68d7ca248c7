//! Display functions for command results

use super::formatters::{create_progress_bar, entropy_bar, render_strategy_tree};
use crate::bank::Bank;
use crate::commands::{AnalysisReport, BestGuessReport, StrategyReport, VerdictReport};
use crate::solver::Cost;
use colored::Colorize;

fn print_header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

fn format_cost(cost: Cost) -> String {
    if cost.is_feasible() {
        format!("{:.0}", cost.value())
    } else {
        "inf".to_string()
    }
}

fn format_mean(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.4}")
    } else {
        "inf".to_string()
    }
}

/// Print the candidates evaluated for the best guess
pub fn print_best_report(report: &BestGuessReport) {
    print_header("CANDIDATE BEST GUESSES");

    if report.candidates.is_empty() {
        println!("\n{}", "(answer needed no search)".bright_black());
    } else {
        println!(
            "\n{}",
            "Guess\tCost\tEC\tH\tNVG\tLVG\tH2\tEA\tAD".bright_black()
        );
        for row in &report.candidates {
            let mut line = format!(
                "{}\t{}\t{}\t{:.4}\t{}\t{}\t{:.4}",
                row.guess,
                format_cost(row.cost),
                format_mean(row.expected_cost),
                row.heuristic.entropy,
                row.heuristic.num_groups,
                row.heuristic.largest_group,
                row.lookahead_entropy
            );
            if let Some(strategy) = &row.strategy {
                line.push_str(&format!("\t{:.4}", strategy.mean_attempts));
                for solved in &strategy.distribution {
                    line.push_str(&format!("\t{solved}"));
                }
            }
            if row.guess == report.best_guess {
                println!("{}", line.green());
            } else {
                println!("{line}");
            }
        }
    }

    println!(
        "\nBest guess: {} (GL: {}, TL: {}, Cost: {}, EC: {})",
        report.best_guess.to_uppercase().bright_yellow().bold(),
        report.remaining_words,
        report.remaining_targets,
        format_cost(report.cost),
        format_mean(report.expected_cost)
    );
    if !report.cost.is_feasible() {
        println!(
            "{}",
            "No guess solves every remaining target in time".red().bold()
        );
    }
}

/// Print the best follow-up for every verdict of a guess
pub fn print_verdict_report(report: &VerdictReport) {
    print_header(&format!("BEST PLAY AFTER {}", report.guess.to_uppercase()));

    println!(
        "\n{}",
        "VID\tLG\tV\tNG\tGL\tTL\tCost\tEC\tH\tNVG\tLVG".bright_black()
    );
    for row in &report.rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.4}\t{}\t{}",
            row.verdict_id,
            report.guess,
            row.verdict,
            row.next_guess,
            row.remaining_words,
            row.remaining_targets,
            format_cost(row.cost),
            format_mean(row.expected_cost),
            row.heuristic.entropy,
            row.heuristic.num_groups,
            row.heuristic.largest_group
        );
    }

    println!(
        "\nOverall, {} (H: {:.4}, NVG: {}, LVG: {}) costs {} per game (GL: {}, TL: {}, Cost: {})",
        report.guess.to_uppercase().bright_yellow().bold(),
        report.heuristic.entropy,
        report.heuristic.num_groups,
        report.heuristic.largest_group,
        format_mean(report.expected_cost).bright_yellow(),
        report.remaining_words,
        report.remaining_targets,
        format_cost(report.cost)
    );
}

/// Print a strategy tree and its attempt distribution
pub fn print_strategy_report(bank: &Bank, report: &StrategyReport, max_depth: Option<usize>) {
    let root = &report.root;
    print_header(&format!(
        "STRATEGY STARTING WITH {}",
        bank.text(root.guess).to_uppercase()
    ));

    println!();
    print!("{}", render_strategy_tree(bank, root, max_depth));

    println!(
        "\nMean attempts: {} (total {}, worst case attempt {}, cost {})",
        format!("{:.4}", root.mean_attempts()).bright_yellow().bold(),
        root.total_attempts,
        report.attempts_used + root.max_depth(),
        format_cost(root.cost)
    );

    println!("\n{}", "Distribution:".bright_cyan().bold());
    let percentages = report.distribution_percentages();
    for (i, (&solved, &pct)) in root
        .attempt_distribution()
        .iter()
        .zip(&percentages)
        .enumerate()
    {
        if solved == 0 {
            continue;
        }
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {}: {} {solved:5} ({pct:5.1}%)", i + 1, bar.green());
    }
}

/// Print the result of word analysis
pub fn print_analysis_report(report: &AnalysisReport) {
    print_header(&format!("ANALYSIS: {}", report.word.to_uppercase()));

    let bar = entropy_bar(report.entropy, report.total_candidates, 30);
    let role = if report.is_target { "target" } else { "guess only" };

    println!(
        "\nAgainst {} possible targets ({role}):",
        report.total_candidates
    );
    println!(
        "   Entropy:     [{}] {}",
        bar.green(),
        format!("{:.3} bits", report.entropy).bright_yellow()
    );
    println!("   With H2:     {:.3} bits", report.lookahead_entropy);
    println!(
        "   Info gain:   {:.1}x reduction",
        report.expected_reduction
    );
    println!(
        "   Expected:    {:.1} targets remain",
        report.expected_remaining
    );
    println!(
        "   Groups:      {} (largest {})",
        report.num_groups, report.largest_group
    );
    println!(
        "   Cost:        {} ({} per game)",
        format_cost(report.cost),
        format_mean(report.expected_cost)
    );
}
