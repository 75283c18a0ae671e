//! Headless mode for automated match runs
//!
//! Runs full matches without any graphical output, CPU vs CPU, and writes a
//! JSON fight log plus match report. Suitable for automated testing and
//! balance sweeps.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless match
//! cargo run --release -- --config match_config.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "difficulty": "hard",
//!   "rounds": 3,
//!   "round_duration_secs": 30,
//!   "random_seed": 12345
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::HeadlessMatchConfig;
pub use runner::{run_headless_match, FighterReport, HeadlessMatchState, MatchReport};
