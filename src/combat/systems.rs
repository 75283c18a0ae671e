//! Systems that turn fight events into log entries.
//!
//! Runs after the match-flow phase so everything emitted during the tick is
//! recorded with the tick's final clock value.

use bevy::prelude::*;

use crate::fight::components::{Fighter, MatchClock, RoundResult};

use super::events::*;
use super::log::{FightLog, FightLogEventType};

/// Drain this tick's event streams into the fight log, mirroring each entry
/// to the structured logger.
pub fn record_fight_log(
    clock: Res<MatchClock>,
    fighters: Query<&Fighter>,
    mut log: ResMut<FightLog>,
    mut hits: EventReader<HitLanded>,
    mut stuns: EventReader<FighterStunned>,
    mut knockouts: EventReader<FighterKnockedOut>,
    mut round_starts: EventReader<RoundStarted>,
    mut round_ends: EventReader<RoundEnded>,
    mut match_ends: EventReader<MatchEnded>,
) {
    log.match_time = clock.match_time_secs();

    let side_name = |entity: Entity| -> &'static str {
        fighters
            .get(entity)
            .map(|f| f.side.name())
            .unwrap_or("Unknown")
    };

    for event in hits.read() {
        let attacker = side_name(event.attacker);
        let defender = side_name(event.defender);
        log.log_hit(
            attacker.to_string(),
            defender.to_string(),
            event.punch_type.name().to_string(),
            event.damage,
        );
        info!(
            "{} lands a {} on {} for {:.1} damage",
            attacker,
            event.punch_type.name(),
            defender,
            event.damage
        );
    }

    for event in stuns.read() {
        let name = side_name(event.fighter);
        log.log(FightLogEventType::Stun, format!("{} is stunned", name));
        info!("{} is stunned", name);
    }

    for event in knockouts.read() {
        let name = side_name(event.fighter);
        log.log(
            FightLogEventType::Knockout,
            format!("{} is knocked out!", name),
        );
        info!("{} is knocked out!", name);
    }

    for event in round_starts.read() {
        log.log(
            FightLogEventType::RoundEvent,
            format!("Round {} begins", event.round),
        );
        info!("Round {} begins", event.round);
    }

    for event in round_ends.read() {
        let message = match event.result {
            RoundResult::Player => format!("Round {} goes to the Player", event.round),
            RoundResult::Opponent => format!("Round {} goes to the Opponent", event.round),
            RoundResult::Draw => format!("Round {} is even", event.round),
        };
        log.log(FightLogEventType::RoundEvent, message.clone());
        info!("{}", message);
    }

    for event in match_ends.read() {
        let message = event.outcome.describe();
        log.log(FightLogEventType::MatchEvent, message.clone());
        info!("{}", message);
    }
}
