//! Optimal strategy search
//!
//! Candidate sets are partitioned by verdict, guesses are shortlisted by
//! entropy, and a memoized recursive search finds the guess that minimizes
//! the total cost of solving every remaining target.

mod board;
mod cache;
mod candidates;
mod config;
mod cost;
mod engine;
mod grouping;
mod heuristic;
mod pruning;
mod strategy;

pub use board::{Board, BoardError};
pub use cache::{CacheKey, CacheStats, SearchCache};
pub use candidates::CandidateSet;
pub use config::{Attempts, Rules, SearchConfig};
pub use cost::{Cost, CostPolicy, CostPolicyError, CostTable};
pub use engine::{BestGuess, GroupOutcome, Resolution, Solver};
pub use grouping::{GroupingMode, VerdictGroups, group_candidates};
pub use heuristic::{GuessHeuristic, compute_guess_heuristic, next_attempt_entropy, shannon_entropy};
pub use pruning::{PruningConfig, shortlist};
pub use strategy::StrategyNode;
