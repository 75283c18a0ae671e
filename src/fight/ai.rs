//! CPU fighter decision-making.
//!
//! Deliberately not a single state machine: attacking and repositioning are
//! paced by two independent countdowns, because punch cadence and footwork
//! cadence scale differently with difficulty. The controller only writes
//! intents; the fighter tick owns all state mutation.

use bevy::prelude::*;
use std::collections::HashMap;
use std::f32::consts::FRAC_PI_3;

use super::components::{AiController, Fighter, FighterIntent, GameRng};
use super::constants::AI_CLOSE_RANGE;
use super::difficulty::DifficultyLevel;
use super::punches::PunchType;

/// Range band the AI is fighting at, used to key the punch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceBucket {
    Close,
    Far,
}

impl DistanceBucket {
    pub fn for_distance(distance: f32) -> DistanceBucket {
        if distance < AI_CLOSE_RANGE {
            DistanceBucket::Close
        } else {
            DistanceBucket::Far
        }
    }
}

/// Weighted punch table for one (bucket, difficulty) pair. Close range
/// leans on hooks and uppercuts; long range is almost all straight punches,
/// with power-punch weight growing with difficulty.
pub fn punch_weights(bucket: DistanceBucket, level: DifficultyLevel) -> [(PunchType, u32); 4] {
    use DifficultyLevel::*;
    use PunchType::*;
    match (bucket, level) {
        (DistanceBucket::Close, Easy) => [(Jab, 40), (Hook, 30), (Uppercut, 20), (Cross, 10)],
        (DistanceBucket::Close, Medium) => [(Jab, 25), (Hook, 35), (Uppercut, 30), (Cross, 10)],
        (DistanceBucket::Close, Hard) => [(Jab, 15), (Hook, 40), (Uppercut, 35), (Cross, 10)],
        (DistanceBucket::Close, Legendary) => [(Jab, 10), (Hook, 40), (Uppercut, 45), (Cross, 5)],
        (DistanceBucket::Far, Easy) => [(Jab, 60), (Cross, 25), (Hook, 10), (Uppercut, 5)],
        (DistanceBucket::Far, Medium) => [(Jab, 45), (Cross, 35), (Hook, 15), (Uppercut, 5)],
        (DistanceBucket::Far, Hard) => [(Jab, 30), (Cross, 50), (Hook, 15), (Uppercut, 5)],
        (DistanceBucket::Far, Legendary) => [(Jab, 25), (Cross, 60), (Hook, 10), (Uppercut, 5)],
    }
}

/// Base ticks between attack decisions; aggressive levels punch far more
/// often. Never below 5.
pub fn attack_rearm(ai_level: u32) -> u32 {
    (30i32 - 3 * ai_level as i32).max(5) as u32
}

/// Chance that a successful attack shortens the next re-arm, chaining
/// punches into combos.
pub fn combo_chance(ai_level: u32) -> f32 {
    (0.5 + 0.05 * ai_level as f32).min(0.9)
}

/// Pick a punch from the weighted table for the current range band. The
/// caller has already waited out the fighter's shared cooldown, so every
/// entry is throwable.
pub fn choose_punch(distance: f32, level: DifficultyLevel, rng: &mut GameRng) -> PunchType {
    let bucket = DistanceBucket::for_distance(distance);
    let table = punch_weights(bucket, level);
    let total: u32 = table.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.random_ticks(0, total - 1);
    for (punch, weight) in table {
        if roll < weight {
            return punch;
        }
        roll -= weight;
    }
    PunchType::Jab
}

/// Pick where the AI wants to stand relative to its opponent: close the gap
/// when out of range, back off when smothered, otherwise orbit at punching
/// distance along a randomly offset angle.
pub fn pick_move_target(
    position: Vec2,
    opponent: Vec2,
    attack_range: f32,
    rng: &mut GameRng,
) -> Vec2 {
    let distance = position.distance(opponent);
    if distance > attack_range * 1.2 {
        opponent
            + Vec2::new(
                rng.random_range(-30.0, 30.0),
                rng.random_range(-30.0, 30.0),
            )
    } else if distance < attack_range * 0.4 {
        let away = (position - opponent).normalize_or_zero();
        opponent + away * (attack_range * 0.8)
    } else {
        let base_angle = (position - opponent).to_angle();
        let angle = base_angle + rng.random_range(-FRAC_PI_3, FRAC_PI_3);
        let radius = attack_range * rng.random_range(0.6, 0.8);
        opponent + Vec2::from_angle(angle) * radius
    }
}

/// Run every CPU-controlled fighter's decision step for this tick.
///
/// Positions are snapshotted first and fighters are visited in ascending
/// entity order so the RNG draw sequence is reproducible under a seed.
pub fn ai_decide(
    mut rng: ResMut<GameRng>,
    mut fighters: Query<(
        Entity,
        &Transform,
        &Fighter,
        &mut AiController,
        &mut FighterIntent,
    )>,
) {
    let positions: HashMap<Entity, Vec2> = fighters
        .iter()
        .map(|(entity, transform, _, _, _)| (entity, transform.translation.truncate()))
        .collect();

    let mut order: Vec<Entity> = positions.keys().copied().collect();
    order.sort_by_key(|entity| entity.index());

    for entity in order {
        let Ok((_, transform, fighter, mut ai, mut intent)) = fighters.get_mut(entity) else {
            continue;
        };
        if fighter.knocked_out {
            continue;
        }
        let Some((_, &opponent_pos)) = positions.iter().find(|(other, _)| **other != entity)
        else {
            continue;
        };
        let position = transform.translation.truncate();
        let distance = position.distance(opponent_pos);

        ai.attack_timer = ai.attack_timer.saturating_sub(1);
        ai.move_timer = ai.move_timer.saturating_sub(1);

        let ai_level = ai.level.profile().ai_level;

        if ai.attack_timer == 0
            && distance <= ai.attack_range
            && fighter.punch.is_none()
            && fighter.cooldown_remaining == 0
            && !fighter.is_stunned()
        {
            intent.punch_request = Some(choose_punch(distance, ai.level, &mut rng));
            let mut rearm = attack_rearm(ai_level);
            if rng.random_f32() < combo_chance(ai_level) {
                rearm = (rearm / 2).max(5);
            }
            ai.attack_timer = rearm;
        }

        if ai.move_timer == 0 && fighter.punch.is_none() {
            ai.move_target = pick_move_target(position, opponent_pos, ai.attack_range, &mut rng);
            ai.move_timer = rng.random_ticks(20, 40);
        }

        if fighter.punch.is_none() && !fighter.is_stunned() {
            let to_target = ai.move_target - position;
            if to_target.length() > 2.0 {
                intent.move_dir = to_target.normalize_or_zero();
            }
        }
    }
}
