//! The fight simulation core.
//!
//! Two fighters, a round clock, and a deterministic fixed-order tick loop.
//! Controllers (AI or player input) write intents, fighters advance their
//! own state machines, the collision pass applies damage, and the match
//! flow settles rounds and the final result.

use bevy::prelude::*;

pub mod ai;
pub mod collision;
pub mod components;
pub mod constants;
pub mod difficulty;
pub mod fighter;
pub mod match_flow;
pub mod punches;
pub mod systems;

use components::{GameRng, MatchClock, MatchConfig, MatchState, RoundPhase, SimulationControl};

/// Plugin wiring the full fight simulation into an app.
///
/// Resources are initialized with defaults; a runner that wants a specific
/// difficulty, round length, or RNG seed inserts its own `MatchConfig`,
/// `MatchClock`, and `GameRng` before the first update. Spawning the two
/// fighters is also the runner's job.
pub struct FightPlugin;

impl Plugin for FightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationControl>()
            .init_resource::<MatchState>()
            .init_resource::<MatchConfig>()
            .init_resource::<MatchClock>()
            .init_resource::<GameRng>()
            .init_resource::<RoundPhase>();

        systems::configure_fight_system_ordering(app);
        systems::add_core_fight_systems(app, systems::simulation_running);
    }
}
