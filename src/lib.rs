//! Wordle Strategist
//!
//! Finds optimal Wordle guessing strategies by memoized search over verdict
//! groups, under normal or hard mode and a configurable cost per attempt.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_strategist::bank::{Bank, BankConfig};
//! use wordle_strategist::solver::{Attempts, CandidateSet, SearchCache, SearchConfig, Solver};
//!
//! let bank = Bank::new(&["crane", "slate", "plate", "trace"], 4, BankConfig::default()).unwrap();
//! let solver = Solver::new(&bank, SearchConfig::default());
//! let mut cache = SearchCache::new();
//!
//! let set = CandidateSet::full(&bank);
//! let best = solver.find_best_guess(&mut cache, Attempts::default(), &set).unwrap();
//! println!("{} costs {}", bank.text(best.guess), best.cost);
//! ```

// Words, verdicts and the hard mode rule
pub mod core;

// Precomputed word banks
pub mod bank;

// Strategy search
pub mod solver;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Stderr logging
pub mod logging;
