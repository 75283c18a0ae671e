//! Round and match lifecycle.
//!
//! Owns the round clock, termination checks, the inter-round reset, and the
//! final decision. Runs in the MatchFlow phase, after collision resolution,
//! so a knockout ends the match on the very tick it happens.

use bevy::prelude::*;

use crate::combat::events::{MatchEnded, RoundEnded, RoundStarted};

use super::components::{
    AiController, Fighter, FighterIntent, FighterSide, MatchClock, MatchConfig, MatchOutcome,
    MatchState, RoundPhase, RoundResult, SimulationControl,
};
use super::constants::{
    AI_ATTACK_RANGE, AI_RANGE_PER_LEVEL, OPPONENT_DAMAGE_PER_ROUND, OPPONENT_HEALTH_PER_ROUND,
    OPPONENT_MOVE_SPEED, OPPONENT_RANGE_PER_ROUND, OPPONENT_SPAWN, OPPONENT_SPEED_PER_ROUND,
    PLAYER_SPAWN, ROUND_HEAL, ROUND_REST_TICKS, TICKS_PER_SECOND,
};

/// Advance the match clock by one tick. During a countdown this burns down
/// to the bell; during an active round it accumulates ticks into whole
/// seconds off the round timer.
pub fn tick_match_clock(
    mut clock: ResMut<MatchClock>,
    mut phase: ResMut<RoundPhase>,
    mut round_starts: EventWriter<RoundStarted>,
) {
    match *phase {
        RoundPhase::MatchOver => {}
        RoundPhase::Countdown { ticks_remaining } => {
            clock.elapsed_ticks += 1;
            if ticks_remaining <= 1 {
                *phase = RoundPhase::Active;
                round_starts.send(RoundStarted { round: clock.round });
            } else {
                *phase = RoundPhase::Countdown {
                    ticks_remaining: ticks_remaining - 1,
                };
            }
        }
        RoundPhase::Active => {
            clock.elapsed_ticks += 1;
            clock.tick_accumulator += 1;
            if clock.tick_accumulator >= TICKS_PER_SECOND {
                clock.tick_accumulator = 0;
                clock.time_remaining_secs = clock.time_remaining_secs.saturating_sub(1);
            }
        }
    }
}

/// Round winner when the clock runs out: whoever kept more health.
pub fn round_winner(player_health: f32, opponent_health: f32) -> RoundResult {
    if player_health > opponent_health {
        RoundResult::Player
    } else if opponent_health > player_health {
        RoundResult::Opponent
    } else {
        RoundResult::Draw
    }
}

/// Final decision after the last round: round wins first, total remaining
/// health as the tiebreak, full tie is a draw.
pub fn decide_match(
    results: &[RoundResult],
    player_health: f32,
    opponent_health: f32,
) -> MatchOutcome {
    let player_wins = results.iter().filter(|r| **r == RoundResult::Player).count();
    let opponent_wins = results
        .iter()
        .filter(|r| **r == RoundResult::Opponent)
        .count();
    if player_wins > opponent_wins {
        MatchOutcome::Decision {
            winner: FighterSide::Player,
        }
    } else if opponent_wins > player_wins {
        MatchOutcome::Decision {
            winner: FighterSide::Opponent,
        }
    } else if player_health > opponent_health {
        MatchOutcome::Decision {
            winner: FighterSide::Player,
        }
    } else if opponent_health > player_health {
        MatchOutcome::Decision {
            winner: FighterSide::Opponent,
        }
    } else {
        MatchOutcome::Draw
    }
}

/// Check whether the active round (or the whole match) is over.
///
/// A knockout ends the match on the spot, regardless of the round tally. A
/// timer expiry scores the round and either rolls into the next round's
/// countdown or settles the decision.
pub fn check_round_end(
    mut phase: ResMut<RoundPhase>,
    mut clock: ResMut<MatchClock>,
    config: Res<MatchConfig>,
    mut match_state: ResMut<MatchState>,
    mut fighters: Query<(
        &mut Fighter,
        &mut Transform,
        &mut FighterIntent,
        Option<&mut AiController>,
    )>,
    mut round_ends: EventWriter<RoundEnded>,
    mut match_ends: EventWriter<MatchEnded>,
) {
    if *phase != RoundPhase::Active {
        return;
    }

    let mut knocked_out: Vec<FighterSide> = Vec::new();
    let mut player_health = 0.0;
    let mut opponent_health = 0.0;
    for (fighter, _, _, _) in fighters.iter() {
        if fighter.knocked_out {
            knocked_out.push(fighter.side);
        }
        match fighter.side {
            FighterSide::Player => player_health = fighter.health,
            FighterSide::Opponent => opponent_health = fighter.health,
        }
    }

    if !knocked_out.is_empty() {
        let outcome = if knocked_out.len() > 1 {
            // Both went down on the same tick.
            MatchOutcome::Draw
        } else {
            MatchOutcome::Knockout {
                winner: knocked_out[0].other(),
            }
        };
        match_state.outcome = Some(outcome);
        *phase = RoundPhase::MatchOver;
        match_ends.send(MatchEnded { outcome });
        return;
    }

    if clock.time_remaining_secs > 0 {
        return;
    }

    let result = round_winner(player_health, opponent_health);
    match_state.round_results.push(result);
    round_ends.send(RoundEnded {
        round: clock.round,
        result,
    });

    if clock.round >= config.rounds {
        let outcome = decide_match(&match_state.round_results, player_health, opponent_health);
        match_state.outcome = Some(outcome);
        *phase = RoundPhase::MatchOver;
        match_ends.send(MatchEnded { outcome });
        return;
    }

    clock.round += 1;
    clock.time_remaining_secs = config.round_duration_secs;
    clock.tick_accumulator = 0;
    *phase = RoundPhase::Countdown {
        ticks_remaining: ROUND_REST_TICKS,
    };

    let next_round = clock.round;
    let profile = config.difficulty.profile();
    for (mut fighter, mut transform, mut intent, ai) in fighters.iter_mut() {
        fighter.reset_for_round();
        let spawn = match fighter.side {
            FighterSide::Player => PLAYER_SPAWN,
            FighterSide::Opponent => {
                // The opponent comes out of the corner a little tougher,
                // faster, and harder-hitting every round.
                fighter.max_health += OPPONENT_HEALTH_PER_ROUND;
                fighter.move_speed = (OPPONENT_MOVE_SPEED
                    + OPPONENT_SPEED_PER_ROUND * (next_round - 1) as f32)
                    * profile.opponent_speed;
                fighter.damage_multiplier = profile.opponent_damage
                    * (1.0 + OPPONENT_DAMAGE_PER_ROUND * (next_round - 1) as f32);
                OPPONENT_SPAWN
            }
        };
        fighter.health = (fighter.health + ROUND_HEAL).min(fighter.max_health);
        transform.translation.x = spawn.x;
        transform.translation.y = spawn.y;
        *intent = FighterIntent::default();
        if let Some(mut ai) = ai {
            ai.reset(spawn);
            if fighter.side == FighterSide::Opponent {
                ai.attack_range = AI_ATTACK_RANGE
                    + AI_RANGE_PER_LEVEL * ai.level.profile().ai_level as f32
                    + OPPONENT_RANGE_PER_ROUND * (next_round - 1) as f32;
            }
        }
    }
}

/// Handle an explicit quit: the match session ends outright, whatever the
/// clock says. Not gated on pause, so a paused match can still be quit.
pub fn process_quit(
    mut control: ResMut<SimulationControl>,
    mut phase: ResMut<RoundPhase>,
    mut match_state: ResMut<MatchState>,
    mut match_ends: EventWriter<MatchEnded>,
) {
    if !control.quit_requested || *phase == RoundPhase::MatchOver {
        return;
    }
    control.quit_requested = false;
    match_state.outcome = Some(MatchOutcome::Quit);
    *phase = RoundPhase::MatchOver;
    match_ends.send(MatchEnded {
        outcome: MatchOutcome::Quit,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_winner_by_health() {
        assert_eq!(round_winner(300.0, 250.0), RoundResult::Player);
        assert_eq!(round_winner(100.0, 250.0), RoundResult::Opponent);
        assert_eq!(round_winner(250.0, 250.0), RoundResult::Draw);
    }

    #[test]
    fn test_decision_by_round_wins() {
        let results = [RoundResult::Player, RoundResult::Opponent, RoundResult::Player];
        assert_eq!(
            decide_match(&results, 100.0, 400.0),
            MatchOutcome::Decision {
                winner: FighterSide::Player
            }
        );
    }

    #[test]
    fn test_decision_tiebreak_by_health() {
        let results = [RoundResult::Player, RoundResult::Opponent, RoundResult::Draw];
        assert_eq!(
            decide_match(&results, 120.0, 180.0),
            MatchOutcome::Decision {
                winner: FighterSide::Opponent
            }
        );
    }

    #[test]
    fn test_full_tie_is_a_draw() {
        let results = [RoundResult::Draw, RoundResult::Draw, RoundResult::Draw];
        assert_eq!(decide_match(&results, 200.0, 200.0), MatchOutcome::Draw);
    }
}
