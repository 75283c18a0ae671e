//! Per-tick fighter systems: facing, state-machine advancement, intent
//! consumption, and movement with ring clamping.
//!
//! These run in the FighterTick phase, strictly after intent production and
//! before collision resolution.

use bevy::prelude::*;
use std::collections::HashMap;

use super::components::{Fighter, FighterIntent, Facing};
use super::constants::{RING_MAX_X, RING_MAX_Y, RING_MIN_X, RING_MIN_Y};

/// Turn each fighter toward the other. Positions are snapshotted first so
/// the result does not depend on iteration order.
pub fn update_facing(mut fighters: Query<(Entity, &Transform, &mut Fighter)>) {
    let positions: HashMap<Entity, Vec2> = fighters
        .iter()
        .map(|(entity, transform, _)| (entity, transform.translation.truncate()))
        .collect();

    for (entity, transform, mut fighter) in fighters.iter_mut() {
        let my_x = transform.translation.x;
        let opponent_x = positions
            .iter()
            .find(|(other, _)| **other != entity)
            .map(|(_, pos)| pos.x);
        if let Some(opponent_x) = opponent_x {
            fighter.facing = if opponent_x >= my_x {
                Facing::Right
            } else {
                Facing::Left
            };
        }
    }
}

/// Advance each fighter's own timers, then consume any queued punch
/// request. A freshly accepted punch sits at frame 0 for the rest of this
/// tick, so its active window opens exactly `active_start` ticks later.
pub fn tick_fighters(mut fighters: Query<(&mut Fighter, &mut FighterIntent)>) {
    for (mut fighter, mut intent) in fighters.iter_mut() {
        fighter.tick();
        if let Some(punch) = intent.punch_request.take() {
            if fighter.request_punch(punch) {
                debug!("{} throws a {}", fighter.side.name(), punch.name());
            }
        }
    }
}

/// Apply movement intents and clamp everyone back into the ring. The clamp
/// runs unconditionally so a fighter can never sit outside the bounds, no
/// matter how it got there.
pub fn apply_movement(mut fighters: Query<(&Fighter, &mut FighterIntent, &mut Transform)>) {
    for (fighter, mut intent, mut transform) in fighters.iter_mut() {
        if fighter.can_move() && intent.move_dir != Vec2::ZERO {
            let step = intent.move_dir.normalize_or_zero() * fighter.current_move_speed();
            transform.translation.x += step.x;
            transform.translation.y += step.y;
        }
        intent.move_dir = Vec2::ZERO;

        transform.translation.x = transform.translation.x.clamp(RING_MIN_X, RING_MAX_X);
        transform.translation.y = transform.translation.y.clamp(RING_MIN_Y, RING_MAX_Y);
    }
}
