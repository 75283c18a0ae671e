//! # ringsim
//!
//! A top-down boxing match simulator built on Bevy's ECS. Two fighters
//! trade four punch types across timed rounds; the loser goes down by
//! knockout or on the scorecards.
//!
//! The simulation is deterministic under a fixed RNG seed and runs fully
//! headless: matches execute as fast as the machine allows and emit a JSON
//! fight log plus a match report.
//!
//! ## Module layout
//!
//! - [`fight`] - the simulation core: fighters, punches, AI, round flow
//! - [`combat`] - fight events and the structured fight log
//! - [`headless`] - configuration and runner for unattended matches
//! - [`input`] / [`keybindings`] - player controls for interactive shells
//! - [`cli`] - command-line argument handling

pub mod cli;
pub mod combat;
pub mod fight;
pub mod headless;
pub mod input;
pub mod keybindings;

pub use combat::log::FightLog;
pub use fight::components::{GameRng, MatchConfig, MatchOutcome, RoundResult};
pub use headless::HeadlessMatchConfig;
