//! Fight events and logging
//!
//! Implements the simulation's outward-facing event stream and the fight
//! log that records it:
//! - Hit, stun, and knockout events
//! - Round and match lifecycle events
//! - The `FightLog` resource and its JSON serialization

use bevy::prelude::*;

pub mod events;
pub mod log;
pub mod systems;

use crate::fight::systems::FightPhase;
use events::*;

/// Plugin wiring up the event streams and the fight log.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HitLanded>()
            .add_event::<FighterStunned>()
            .add_event::<FighterKnockedOut>()
            .add_event::<RoundStarted>()
            .add_event::<RoundEnded>()
            .add_event::<MatchEnded>()
            .init_resource::<log::FightLog>()
            .add_systems(
                Update,
                systems::record_fight_log.after(FightPhase::MatchFlow),
            );
    }
}
