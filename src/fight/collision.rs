//! Strike resolution.
//!
//! Once per tick, after both fighters have advanced, every active strike is
//! checked against the opposing fighter's position. A strike deals damage
//! at most once per activation: the `landed` flag on the punch is set here
//! and only cleared by the fighter's next successful punch request.

use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::combat::events::{FighterKnockedOut, FighterStunned, HitLanded};

use super::components::{
    DamageOutcome, Fighter, FighterSide, GameRng, MatchConfig, MatchState,
};
use super::constants::SCORE_PER_DAMAGE;
use super::punches::PunchType;

struct PendingStrike {
    attacker: Entity,
    defender: Entity,
    punch_type: PunchType,
    defender_pos: Vec2,
}

/// Check both fighters' strikes against each other and apply damage.
///
/// Positions and punch state are snapshotted before any mutation, so the
/// pass is symmetric: both strikes can land on the same tick regardless of
/// entity order. Damage is then applied in ascending entity order to keep
/// the RNG draw sequence deterministic.
pub fn resolve_strikes(
    mut fighters: Query<(Entity, &Transform, &mut Fighter)>,
    config: Res<MatchConfig>,
    mut rng: ResMut<GameRng>,
    mut match_state: ResMut<MatchState>,
    mut hit_events: EventWriter<HitLanded>,
    mut stun_events: EventWriter<FighterStunned>,
    mut knockout_events: EventWriter<FighterKnockedOut>,
) {
    let positions: HashMap<Entity, Vec2> = fighters
        .iter()
        .map(|(entity, transform, _)| (entity, transform.translation.truncate()))
        .collect();

    let mut pending: SmallVec<[PendingStrike; 2]> = SmallVec::new();
    for (attacker, _, fighter) in fighters.iter() {
        if !fighter.is_punch_active() {
            continue;
        }
        let Some(active) = fighter.punch.as_ref() else {
            continue;
        };
        if active.landed {
            continue;
        }
        let Some(&attacker_pos) = positions.get(&attacker) else {
            continue;
        };
        let Some(strike_point) = fighter.strike_point(attacker_pos) else {
            continue;
        };
        let Some((&defender, &defender_pos)) =
            positions.iter().find(|(other, _)| **other != attacker)
        else {
            continue;
        };
        if strike_point.distance(defender_pos) < active.punch_type.profile().hit_radius {
            pending.push(PendingStrike {
                attacker,
                defender,
                punch_type: active.punch_type,
                defender_pos,
            });
        }
    }

    pending.sort_by_key(|strike| strike.attacker.index());

    for strike in pending {
        let profile = strike.punch_type.profile();
        let base = rng.random_range(profile.damage_min, profile.damage_max);

        // Mark the activation resolved and read the attacker's multiplier.
        let Ok((_, _, mut attacker)) = fighters.get_mut(strike.attacker) else {
            continue;
        };
        if let Some(active) = attacker.punch.as_mut() {
            active.landed = true;
        }
        let attacker_side = attacker.side;
        let damage_mult = attacker.damage_multiplier;

        let Ok((_, _, mut defender)) = fighters.get_mut(strike.defender) else {
            continue;
        };
        let damage = base * damage_mult * defender.incoming_multiplier;
        let outcome = defender.apply_damage(damage, &mut rng);
        debug_assert!(defender.health >= 0.0 && defender.health <= defender.max_health);

        if attacker_side == FighterSide::Player {
            let mult = config.difficulty.profile().score_multiplier;
            match_state.score += (damage * SCORE_PER_DAMAGE * mult).floor() as u64;
        }
        if let Ok((_, _, mut attacker)) = fighters.get_mut(strike.attacker) {
            attacker.damage_dealt += damage;
        }

        hit_events.send(HitLanded {
            attacker: strike.attacker,
            defender: strike.defender,
            punch_type: strike.punch_type,
            damage,
            position: strike.defender_pos,
        });
        match outcome {
            DamageOutcome::Stunned => {
                stun_events.send(FighterStunned {
                    fighter: strike.defender,
                });
            }
            DamageOutcome::Knockout => {
                knockout_events.send(FighterKnockedOut {
                    fighter: strike.defender,
                    position: strike.defender_pos,
                });
            }
            DamageOutcome::Hit => {}
        }
    }
}
