//! Command implementations

pub mod benchmark;
pub mod predict;
pub mod simple;
pub mod verify;

pub use benchmark::{BenchmarkResult, run_benchmark};
pub use predict::{PredictionReport, predict_prefix};
pub use simple::run_simple;
pub use verify::{VerifyResult, run_verify};
