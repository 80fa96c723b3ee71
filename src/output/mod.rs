//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_benchmark_result, print_prediction_report, print_stats, print_structure,
    print_verify_result, print_word_list,
};
