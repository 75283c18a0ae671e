//! Fight events
//!
//! The per-tick output stream of the simulation. Presentation layers
//! (HUD, particles, audio) and the fight log consume these; the core never
//! reads them back.

use bevy::prelude::*;

use crate::fight::components::{MatchOutcome, RoundResult};
use crate::fight::punches::PunchType;

/// Fired when a strike connects and damage is applied.
#[derive(Event)]
pub struct HitLanded {
    pub attacker: Entity,
    pub defender: Entity,
    pub punch_type: PunchType,
    /// Damage after all multipliers.
    pub damage: f32,
    /// Defender's position at resolution time.
    pub position: Vec2,
}

/// Fired when a hit sends the defender into the stunned state.
#[derive(Event)]
pub struct FighterStunned {
    pub fighter: Entity,
}

/// Fired when a fighter's health reaches zero.
#[derive(Event)]
pub struct FighterKnockedOut {
    pub fighter: Entity,
    pub position: Vec2,
}

/// Fired when the bell opens a round.
#[derive(Event)]
pub struct RoundStarted {
    pub round: u32,
}

/// Fired when a round ends on the clock.
#[derive(Event)]
pub struct RoundEnded {
    pub round: u32,
    pub result: RoundResult,
}

/// Fired once when the match resolves.
#[derive(Event)]
pub struct MatchEnded {
    pub outcome: MatchOutcome,
}
