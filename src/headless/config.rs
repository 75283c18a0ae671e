//! JSON configuration parsing for headless mode
//!
//! Parses JSON match configurations and converts them to the simulation's
//! MatchConfig format.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::fight::components::MatchConfig;
use crate::fight::constants::{DEFAULT_ROUNDS, DEFAULT_ROUND_SECS};
use crate::fight::difficulty::DifficultyLevel;

/// Headless match configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessMatchConfig {
    /// Difficulty level: "easy", "medium", "hard", or "legendary"
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// Number of rounds (default: 3)
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    /// Round length in seconds (default: 30)
    #[serde(default = "default_round_duration")]
    pub round_duration_secs: u32,
    /// Random seed for deterministic match reproduction
    /// If provided, the match will use a seeded RNG for reproducible results
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Custom output path for the match report and fight log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Watchdog: maximum simulated ticks before the run is abandoned
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}

fn default_round_duration() -> u32 {
    DEFAULT_ROUND_SECS
}

fn default_max_ticks() -> u64 {
    200_000
}

impl Default for HeadlessMatchConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            rounds: default_rounds(),
            round_duration_secs: default_round_duration(),
            random_seed: None,
            output_path: None,
            max_ticks: default_max_ticks(),
        }
    }
}

impl HeadlessMatchConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: HeadlessMatchConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        DifficultyLevel::parse(&self.difficulty)?;

        if self.rounds == 0 || self.rounds > 15 {
            return Err("rounds must be between 1 and 15".to_string());
        }
        if self.round_duration_secs < 5 || self.round_duration_secs > 600 {
            return Err("round_duration_secs must be between 5 and 600".to_string());
        }
        if self.max_ticks == 0 {
            return Err("max_ticks must be positive".to_string());
        }

        Ok(())
    }

    /// Convert to the simulation's MatchConfig format
    pub fn to_match_config(&self) -> Result<MatchConfig, String> {
        Ok(MatchConfig {
            difficulty: DifficultyLevel::parse(&self.difficulty)?,
            rounds: self.rounds,
            round_duration_secs: self.round_duration_secs,
        })
    }
}
