//! Terminal output formatting
//!
//! Display utilities for command reports and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_analysis_report, print_best_report, print_strategy_report, print_verdict_report,
};
