//! Command-line argument handling

use clap::Parser;
use std::path::PathBuf;

/// Top-down boxing match simulator
#[derive(Parser, Debug)]
#[command(name = "ringsim")]
#[command(about = "Top-down boxing match simulator", long_about = None)]
pub struct Args {
    /// Path to a JSON match configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Output path for the fight log and match report
    #[arg(long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Random seed for deterministic match reproduction
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Difficulty level: easy, medium, hard, or legendary
    #[arg(long, value_name = "DIFFICULTY")]
    pub difficulty: Option<String>,

    /// Watchdog: maximum simulated ticks before the run is abandoned
    #[arg(long, value_name = "TICKS")]
    pub max_ticks: Option<u64>,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
