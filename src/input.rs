//! Player input mapping
//!
//! Translates keyboard state into `FighterIntent` for the player-controlled
//! fighter, through the remappable `Keybindings` resource. A fighter is
//! player-controlled when it has no `AiController`; in headless runs both
//! corners carry one and these systems simply find nothing to drive.

use bevy::prelude::*;

use crate::fight::components::{AiController, Fighter, FighterIntent, SimulationControl};
use crate::fight::punches::PunchType;
use crate::fight::systems::{round_active, simulation_running, FightPhase};
use crate::keybindings::{GameAction, Keybindings};

/// Wires keyboard input into the fight simulation.
pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        // MinimalPlugins does not register keyboard state; make sure the
        // resource exists even without a windowing backend.
        app.init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(Keybindings::load());

        app.add_systems(
            Update,
            player_input
                .in_set(FightPhase::Intents)
                .run_if(simulation_running)
                .run_if(round_active),
        );
        // Pause and quit must work while paused and between rounds.
        app.add_systems(Update, pause_and_quit.before(FightPhase::Intents));
    }
}

/// Write movement and punch intents for the player-controlled fighter.
fn player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<Keybindings>,
    mut fighters: Query<(&Fighter, &mut FighterIntent), Without<AiController>>,
) {
    for (fighter, mut intent) in fighters.iter_mut() {
        if fighter.knocked_out {
            continue;
        }

        // Ring coordinates grow downward, so "up" is negative y.
        let mut dir = Vec2::ZERO;
        if bindings.action_pressed(GameAction::MoveUp, &keyboard) {
            dir.y -= 1.0;
        }
        if bindings.action_pressed(GameAction::MoveDown, &keyboard) {
            dir.y += 1.0;
        }
        if bindings.action_pressed(GameAction::MoveLeft, &keyboard) {
            dir.x -= 1.0;
        }
        if bindings.action_pressed(GameAction::MoveRight, &keyboard) {
            dir.x += 1.0;
        }
        intent.move_dir = dir;

        let punch = if bindings.action_just_pressed(GameAction::PunchJab, &keyboard) {
            Some(PunchType::Jab)
        } else if bindings.action_just_pressed(GameAction::PunchCross, &keyboard) {
            Some(PunchType::Cross)
        } else if bindings.action_just_pressed(GameAction::PunchHook, &keyboard) {
            Some(PunchType::Hook)
        } else if bindings.action_just_pressed(GameAction::PunchUppercut, &keyboard) {
            Some(PunchType::Uppercut)
        } else {
            None
        };
        if punch.is_some() {
            intent.punch_request = punch;
        }
    }
}

/// Handle pause toggling and quit requests. Runs unconditionally so a
/// paused match can still be unpaused or abandoned.
fn pause_and_quit(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<Keybindings>,
    mut control: ResMut<SimulationControl>,
) {
    if bindings.action_just_pressed(GameAction::PausePlay, &keyboard) {
        control.toggle_pause();
        info!(
            "Simulation {}",
            if control.paused { "paused" } else { "resumed" }
        );
    }
    if bindings.action_just_pressed(GameAction::QuitMatch, &keyboard) {
        control.quit_requested = true;
    }
}
