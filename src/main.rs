//! Wordle Strategist - CLI
//!
//! Finds optimal Wordle guesses and full strategies for a word bank, under
//! normal or hard mode and a configurable cost per attempt.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use wordle_strategist::{
    bank::{Bank, BankConfig},
    commands::{
        BoardState, analyze_verdicts, analyze_word, plan_strategy, rank_guesses, run_play,
    },
    core::HardModeRule,
    logging,
    output::{print_analysis_report, print_best_report, print_strategy_report, print_verdict_report},
    solver::{CostPolicy, PruningConfig, Rules, SearchCache, SearchConfig, Solver},
    wordlists::{GuessInclusion, WordLists},
};

#[derive(Parser)]
#[command(
    name = "wordle_strategist",
    about = "Optimal Wordle strategies by memoized search over verdict groups",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Bank directory holding targets.txt and optional guess lists
    #[arg(short, long, global = true, default_value = "bank")]
    bank: PathBuf,

    /// Which guess-only lists to load after the targets
    #[arg(short, long, global = true, value_enum, default_value_t = GuessInclusion::All)]
    guesses: GuessInclusion,

    /// Play under hard mode rules
    #[arg(long, global = true)]
    hard: bool,

    /// Hard mode also forbids reusing a yellow letter where it was yellow
    /// and using more copies of a letter than feedback allows
    #[arg(long, global = true)]
    strict: bool,

    /// Attempts allowed per game
    #[arg(short = 'n', long, global = true, default_value_t = 6,
          value_parser = clap::value_parser!(u32).range(1..=16))]
    attempts: u32,

    /// Cost per attempt: flat, penalized:FROM:PENALTY or table:W1,W2,...
    #[arg(short, long, global = true, default_value_t = CostPolicy::Flat)]
    cost: CostPolicy,

    /// Only search guesses within this many bits of the best entropy
    #[arg(long, global = true)]
    margin: Option<f64>,

    /// Search at most about this many guesses per position (0 for no cap)
    #[arg(long, global = true)]
    top_k: Option<usize>,

    /// Search every guess without entropy pruning
    #[arg(long, global = true, conflicts_with_all = ["margin", "top_k"])]
    exhaustive: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best guess for a board state
    Best {
        /// Played guesses and verdicts: GUESS VERDICT ...
        #[arg(allow_hyphen_values = true)]
        state: Vec<String>,
    },

    /// Show the best follow-up for every verdict of a guess
    Verdicts {
        /// Played guesses and verdicts, then the guess to evaluate
        #[arg(required = true, allow_hyphen_values = true)]
        state: Vec<String>,
    },

    /// Build the full strategy tree for a board state
    Strategy {
        /// Played guesses and verdicts, optionally ending with the guess to start from
        #[arg(allow_hyphen_values = true)]
        state: Vec<String>,

        /// Guess to start from
        #[arg(long)]
        guess: Option<String>,

        /// Levels of the tree to print
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Analyze one word against a board state
    Analyze {
        /// Word to analyze
        word: String,

        /// Played guesses and verdicts
        #[arg(allow_hyphen_values = true)]
        state: Vec<String>,
    },

    /// Interactive solver: suggests guesses and reads back verdicts
    Play,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        let pruning = if self.exhaustive {
            PruningConfig::exhaustive()
        } else {
            let defaults = PruningConfig::default();
            PruningConfig {
                entropy_margin: self.margin.unwrap_or(defaults.entropy_margin),
                top_k: self.top_k.unwrap_or(defaults.top_k),
                ..defaults
            }
        };
        SearchConfig {
            rules: if self.hard { Rules::Hard } else { Rules::Normal },
            cost: self.cost.clone(),
            pruning,
        }
    }

    fn bank_config(&self) -> BankConfig {
        BankConfig {
            hard_mode_rule: if self.strict {
                HardModeRule::Strict
            } else {
                HardModeRule::Standard
            },
            ..BankConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_for_verbosity(cli.verbose))
        .context("failed to install logger")?;
    if cli.strict && !cli.hard {
        log::warn!("--strict only applies with --hard");
    }

    let bank = load_bank(&cli)?;
    let solver = Solver::new(&bank, cli.search_config());
    let mut cache = SearchCache::new();

    match &cli.command {
        Commands::Best { state } => run_best_command(&solver, &mut cache, state, cli.attempts),
        Commands::Verdicts { state } => {
            let state = BoardState::from_tokens(&solver, state, cli.attempts)?;
            let report = analyze_verdicts(&solver, &mut cache, &state)?;
            print_verdict_report(&report);
            Ok(())
        }
        Commands::Strategy {
            state,
            guess,
            depth,
        } => run_strategy_command(
            &solver,
            &mut cache,
            state,
            guess.as_deref(),
            *depth,
            cli.attempts,
        ),
        Commands::Analyze { word, state } => {
            let mut tokens = state.clone();
            tokens.push(word.clone());
            let state = BoardState::from_tokens(&solver, &tokens, cli.attempts)?;
            let report = analyze_word(&solver, &mut cache, &state)?;
            print_analysis_report(&report);
            Ok(())
        }
        Commands::Play => {
            let stdin = io::stdin();
            run_play(&solver, &mut cache, cli.attempts, stdin.lock(), io::stdout())?;
            Ok(())
        }
    }
}

fn load_bank(cli: &Cli) -> Result<Bank> {
    let lists = WordLists::load_dir(&cli.bank, cli.guesses)
        .with_context(|| format!("failed to load word lists from {}", cli.bank.display()))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!(
        "Building bank of {} words ({} targets)...",
        lists.words().len(),
        lists.num_targets()
    ));

    let bank = lists.to_bank(cli.bank_config())?;
    spinner.finish_and_clear();
    log::info!(
        "Bank ready: {} words, {} targets, {} letters",
        bank.num_words(),
        bank.num_targets(),
        bank.word_len()
    );
    Ok(bank)
}

fn run_best_command(
    solver: &Solver<'_>,
    cache: &mut SearchCache,
    tokens: &[String],
    attempts: u32,
) -> Result<()> {
    let state = BoardState::from_tokens(solver, tokens, attempts)?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} guesses evaluated | {msg}")?,
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    let report = rank_guesses(solver, cache, &state, |guess, cost| {
        progress.inc(1);
        progress.set_message(format!("{guess}: {cost}"));
    })?;
    progress.finish_and_clear();

    let stats = cache.stats();
    log::debug!(
        "Cache: {} entries, {} hits, {} misses",
        stats.entries,
        stats.hits,
        stats.misses
    );
    print_best_report(&report);
    Ok(())
}

fn run_strategy_command(
    solver: &Solver<'_>,
    cache: &mut SearchCache,
    tokens: &[String],
    guess: Option<&str>,
    depth: Option<usize>,
    attempts: u32,
) -> Result<()> {
    let mut tokens = tokens.to_vec();
    if let Some(guess) = guess {
        if tokens.len() % 2 == 1 {
            anyhow::bail!("--guess given but the board already ends with a guess");
        }
        tokens.push(guess.to_string());
    }
    let state = BoardState::from_tokens(solver, &tokens, attempts)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!(
        "Searching strategy for {} targets...",
        state.set.num_targets()
    ));
    let report = plan_strategy(solver, cache, &state)?;
    spinner.finish_and_clear();

    match report {
        Some(report) => print_strategy_report(solver.bank(), &report, depth),
        None => println!(
            "No strategy solves every target within {} attempts",
            state.attempts.allowed
        ),
    }
    Ok(())
}
