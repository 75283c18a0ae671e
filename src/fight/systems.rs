//! Fight Systems API
//!
//! Stable entry point for wiring the fight simulation into an app. Both the
//! headless runner and any graphical shell should import from here rather
//! than from the internal modules.
//!
//! ## System Phases
//!
//! The simulation runs one fixed tick per `Update` pass, in four ordered
//! phases:
//!
//! 1. **Intents** - AI (and player input, when present) writes movement and
//!    punch intents
//! 2. **FighterTick** - each fighter advances its own state machine and
//!    applies movement
//! 3. **Resolution** - active strikes are checked and damage applied
//! 4. **MatchFlow** - round clock, termination checks, inter-round reset
//!
//! This strict ordering is what makes "at most one hit per activation" and
//! "one state transition per tick" hold.

use bevy::prelude::*;

pub use super::ai::ai_decide;
pub use super::collision::resolve_strikes;
pub use super::fighter::{apply_movement, tick_fighters, update_facing};
pub use super::match_flow::{check_round_end, process_quit, tick_match_clock};

pub use super::components::{
    AiController, Fighter, FighterIntent, FighterSide, GameRng, MatchClock, MatchConfig,
    MatchState, RoundPhase, SimulationControl,
};

/// System set labels for fight system ordering.
///
/// Use these to slot custom systems (input mapping, presentation taps)
/// relative to the simulation phases.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FightPhase {
    /// Phase 1: intent production (AI decisions, player input).
    Intents,
    /// Phase 2: fighter state machines and movement.
    FighterTick,
    /// Phase 3: strike resolution and damage.
    Resolution,
    /// Phase 4: round clock and match termination.
    MatchFlow,
}

/// Run condition: the simulation is not paused.
pub fn simulation_running(control: Res<SimulationControl>) -> bool {
    !control.paused
}

/// Run condition: a round is in progress (combat is frozen during
/// countdowns and once the match is over).
pub fn round_active(phase: Res<RoundPhase>) -> bool {
    *phase == RoundPhase::Active
}

/// Configures the ordering between fight system phases.
///
/// Call this once during app setup before adding fight systems.
pub fn configure_fight_system_ordering(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FightPhase::Intents,
            FightPhase::FighterTick,
            FightPhase::Resolution,
            FightPhase::MatchFlow,
        )
            .chain(),
    );
}

/// Adds the core fight simulation systems to the app.
///
/// `run_condition` gates the whole simulation (pause); combat phases are
/// additionally gated on the round being active, while the match-flow phase
/// keeps running so countdowns can elapse.
pub fn add_core_fight_systems<M>(app: &mut App, run_condition: impl Condition<M> + Clone)
where
    M: 'static,
{
    // Phase 1: intents
    app.add_systems(
        Update,
        ai_decide
            .in_set(FightPhase::Intents)
            .run_if(run_condition.clone())
            .run_if(round_active),
    );

    // Flush deferred commands between phases
    app.add_systems(
        Update,
        apply_deferred
            .after(FightPhase::Intents)
            .before(FightPhase::FighterTick),
    );

    // Phase 2: fighter state machines
    app.add_systems(
        Update,
        (update_facing, tick_fighters, apply_movement)
            .chain()
            .in_set(FightPhase::FighterTick)
            .run_if(run_condition.clone())
            .run_if(round_active),
    );

    // Phase 3: strike resolution
    app.add_systems(
        Update,
        resolve_strikes
            .in_set(FightPhase::Resolution)
            .run_if(run_condition.clone())
            .run_if(round_active),
    );

    // Phase 4: match flow (runs during countdowns as well). Quit handling
    // stays outside the pause gate so a paused match can still be quit.
    app.add_systems(
        Update,
        process_quit
            .in_set(FightPhase::MatchFlow)
            .before(tick_match_clock),
    );
    app.add_systems(
        Update,
        (tick_match_clock, check_round_end)
            .chain()
            .in_set(FightPhase::MatchFlow)
            .run_if(run_condition),
    );
}
