//! Integration tests for the fight simulation core.
//!
//! These drive a real Bevy app one tick at a time, with scripted intents in
//! place of controllers, so strike windows, round flow, and termination can
//! be checked against exact tick counts.

use bevy::prelude::*;

use ringsim::combat::log::FightLog;
use ringsim::combat::CombatPlugin;
use ringsim::fight::components::{
    AiController, Facing, Fighter, FighterIntent, FighterSide, GameRng, MatchClock, MatchConfig,
    MatchOutcome, MatchState, RoundPhase, RoundResult, SimulationControl,
};
use ringsim::fight::constants::{
    OPPONENT_MOVE_SPEED, OPPONENT_SPAWN, PLAYER_MOVE_SPEED, PLAYER_SPAWN, RING_MAX_X, RING_MAX_Y,
    RING_MIN_X, RING_MIN_Y, STARTING_HEALTH,
};
use ringsim::fight::difficulty::DifficultyLevel;
use ringsim::fight::punches::PunchType;
use ringsim::fight::FightPlugin;

/// App with the full simulation but no fighters; tests spawn their own and
/// script intents directly.
fn sim_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin, FightPlugin, CombatPlugin));
    app.insert_resource(MatchConfig::default());
    app.insert_resource(GameRng::from_seed(seed));
    app.insert_resource(MatchClock::new(30));
    app.insert_resource(RoundPhase::Active);
    app
}

fn spawn_fighter(app: &mut App, side: FighterSide, pos: Vec2, facing: Facing) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_xyz(pos.x, pos.y, 0.0),
            Fighter::new(side, STARTING_HEALTH, PLAYER_MOVE_SPEED, facing),
            FighterIntent::default(),
        ))
        .id()
}

fn request_punch(app: &mut App, fighter: Entity, punch: PunchType) {
    app.world_mut()
        .get_mut::<FighterIntent>(fighter)
        .unwrap()
        .punch_request = Some(punch);
}

fn health_of(app: &App, fighter: Entity) -> f32 {
    app.world().get::<Fighter>(fighter).unwrap().health
}

#[test]
fn test_jab_lands_exactly_once_per_activation() {
    let mut app = sim_app(3);
    // Jab reach 60, hit radius 42: a strike point 20 units past the
    // defender connects.
    let player = spawn_fighter(
        &mut app,
        FighterSide::Player,
        Vec2::new(300.0, 350.0),
        Facing::Right,
    );
    let opponent = spawn_fighter(
        &mut app,
        FighterSide::Opponent,
        Vec2::new(340.0, 350.0),
        Facing::Left,
    );

    request_punch(&mut app, player, PunchType::Jab);
    // Run past the jab's full animation (15 frames).
    for _ in 0..16 {
        app.update();
    }

    let dropped = STARTING_HEALTH - health_of(&app, opponent);
    assert!(
        (8.0..=15.0).contains(&dropped),
        "jab damage out of range: {}",
        dropped
    );
    let log = app.world().resource::<FightLog>();
    assert_eq!(log.hits_landed("Player"), 1);

    // Player scoring at medium difficulty: damage x 10 x 1.5.
    let score = app.world().resource::<MatchState>().score;
    assert!((120..=225).contains(&score), "unexpected score {}", score);
}

#[test]
fn test_pause_freezes_clock_and_combat() {
    let mut app = sim_app(5);
    let player = spawn_fighter(
        &mut app,
        FighterSide::Player,
        Vec2::new(300.0, 350.0),
        Facing::Right,
    );
    let opponent = spawn_fighter(
        &mut app,
        FighterSide::Opponent,
        Vec2::new(340.0, 350.0),
        Facing::Left,
    );

    app.world_mut().resource_mut::<SimulationControl>().paused = true;
    request_punch(&mut app, player, PunchType::Jab);
    for _ in 0..30 {
        app.update();
    }

    assert_eq!(health_of(&app, opponent), STARTING_HEALTH);
    assert_eq!(app.world().resource::<MatchClock>().elapsed_ticks, 0);
    // The punch request was never consumed.
    let intent = app.world().get::<FighterIntent>(player).unwrap();
    assert_eq!(intent.punch_request, Some(PunchType::Jab));

    // Unpause: the jab plays out normally.
    app.world_mut().resource_mut::<SimulationControl>().paused = false;
    for _ in 0..16 {
        app.update();
    }
    assert!(health_of(&app, opponent) < STARTING_HEALTH);
}

#[test]
fn test_knockout_ends_match_immediately() {
    let mut app = sim_app(11);
    let player = spawn_fighter(
        &mut app,
        FighterSide::Player,
        Vec2::new(300.0, 350.0),
        Facing::Right,
    );
    let opponent = spawn_fighter(
        &mut app,
        FighterSide::Opponent,
        Vec2::new(340.0, 350.0),
        Facing::Left,
    );
    app.world_mut().get_mut::<Fighter>(opponent).unwrap().health = 5.0;

    request_punch(&mut app, player, PunchType::Jab);
    for _ in 0..16 {
        app.update();
    }

    let match_state = app.world().resource::<MatchState>();
    assert_eq!(
        match_state.outcome,
        Some(MatchOutcome::Knockout {
            winner: FighterSide::Player
        })
    );
    // A knockout bypasses the scorecards entirely.
    assert!(match_state.round_results.is_empty());
    assert_eq!(*app.world().resource::<RoundPhase>(), RoundPhase::MatchOver);
    assert_eq!(health_of(&app, opponent), 0.0);
}

#[test]
fn test_timer_expiry_scores_round_and_resets() {
    let mut app = sim_app(13);
    let player = spawn_fighter(
        &mut app,
        FighterSide::Player,
        Vec2::new(300.0, 350.0),
        Facing::Right,
    );
    let opponent = spawn_fighter(
        &mut app,
        FighterSide::Opponent,
        Vec2::new(500.0, 300.0),
        Facing::Left,
    );
    app.world_mut().get_mut::<Fighter>(player).unwrap().health = 300.0;
    app.world_mut().get_mut::<Fighter>(opponent).unwrap().health = 250.0;
    app.world_mut()
        .resource_mut::<MatchClock>()
        .time_remaining_secs = 0;

    app.update();

    let match_state = app.world().resource::<MatchState>();
    assert_eq!(match_state.round_results, vec![RoundResult::Player]);
    assert!(match_state.outcome.is_none());

    let clock = app.world().resource::<MatchClock>();
    assert_eq!(clock.round, 2);
    assert_eq!(clock.time_remaining_secs, 30);
    assert!(matches!(
        *app.world().resource::<RoundPhase>(),
        RoundPhase::Countdown { .. }
    ));

    // Inter-round reset: corners, heal, and the opponent gets tougher.
    let player_tf = app.world().get::<Transform>(player).unwrap();
    assert_eq!(player_tf.translation.truncate(), PLAYER_SPAWN);
    let opponent_tf = app.world().get::<Transform>(opponent).unwrap();
    assert_eq!(opponent_tf.translation.truncate(), OPPONENT_SPAWN);

    assert_eq!(health_of(&app, player), 450.0);
    let opp = app.world().get::<Fighter>(opponent).unwrap();
    assert_eq!(opp.health, 400.0);
    assert_eq!(opp.max_health, STARTING_HEALTH + 50.0);
    assert_eq!(opp.move_speed, OPPONENT_MOVE_SPEED + 0.5);
}

#[test]
fn test_opponent_escalates_between_rounds() {
    let mut app = sim_app(29);
    spawn_fighter(
        &mut app,
        FighterSide::Player,
        Vec2::new(200.0, 350.0),
        Facing::Right,
    );
    let opponent = app
        .world_mut()
        .spawn((
            Transform::from_xyz(OPPONENT_SPAWN.x, OPPONENT_SPAWN.y, 0.0),
            Fighter::new(
                FighterSide::Opponent,
                STARTING_HEALTH,
                OPPONENT_MOVE_SPEED,
                Facing::Left,
            ),
            FighterIntent::default(),
            AiController::new(DifficultyLevel::Medium, OPPONENT_SPAWN),
        ))
        .id();
    app.world_mut()
        .resource_mut::<MatchClock>()
        .time_remaining_secs = 0;

    app.update();

    let opp = app.world().get::<Fighter>(opponent).unwrap();
    assert_eq!(opp.max_health, STARTING_HEALTH + 50.0);
    assert_eq!(opp.move_speed, OPPONENT_MOVE_SPEED + 0.5);
    // Medium profile damage 1.0, +5% for the completed round.
    assert!((opp.damage_multiplier - 1.05).abs() < 1e-6);
    // Medium aggression 4: base range 80 + 8, +5 for the completed round.
    let ai = app.world().get::<AiController>(opponent).unwrap();
    assert_eq!(ai.attack_range, 93.0);
}

#[test]
fn test_final_round_goes_to_decision() {
    let mut app = sim_app(17);
    app.insert_resource(MatchConfig {
        rounds: 1,
        ..Default::default()
    });
    let player = spawn_fighter(
        &mut app,
        FighterSide::Player,
        Vec2::new(300.0, 350.0),
        Facing::Right,
    );
    let opponent = spawn_fighter(
        &mut app,
        FighterSide::Opponent,
        Vec2::new(500.0, 300.0),
        Facing::Left,
    );
    app.world_mut().get_mut::<Fighter>(player).unwrap().health = 300.0;
    app.world_mut().get_mut::<Fighter>(opponent).unwrap().health = 250.0;
    app.world_mut()
        .resource_mut::<MatchClock>()
        .time_remaining_secs = 0;

    app.update();

    let match_state = app.world().resource::<MatchState>();
    assert_eq!(match_state.round_results, vec![RoundResult::Player]);
    assert_eq!(
        match_state.outcome,
        Some(MatchOutcome::Decision {
            winner: FighterSide::Player
        })
    );
    assert_eq!(*app.world().resource::<RoundPhase>(), RoundPhase::MatchOver);
}

#[test]
fn test_quit_ends_match_even_while_paused() {
    let mut app = sim_app(19);
    spawn_fighter(
        &mut app,
        FighterSide::Player,
        Vec2::new(300.0, 350.0),
        Facing::Right,
    );
    spawn_fighter(
        &mut app,
        FighterSide::Opponent,
        Vec2::new(500.0, 300.0),
        Facing::Left,
    );

    {
        let mut control = app.world_mut().resource_mut::<SimulationControl>();
        control.paused = true;
        control.quit_requested = true;
    }
    app.update();

    let match_state = app.world().resource::<MatchState>();
    assert_eq!(match_state.outcome, Some(MatchOutcome::Quit));
    assert_eq!(*app.world().resource::<RoundPhase>(), RoundPhase::MatchOver);
}

#[test]
fn test_incoming_multiplier_scales_received_damage() {
    let mut app = sim_app(23);
    // Player takes legendary-level incoming damage; the opponent throws.
    let player = app
        .world_mut()
        .spawn((
            Transform::from_xyz(300.0, 350.0, 0.0),
            Fighter::new(
                FighterSide::Player,
                STARTING_HEALTH,
                PLAYER_MOVE_SPEED,
                Facing::Right,
            )
            .with_multipliers(1.0, 1.6),
            FighterIntent::default(),
        ))
        .id();
    let opponent = spawn_fighter(
        &mut app,
        FighterSide::Opponent,
        Vec2::new(340.0, 350.0),
        Facing::Left,
    );

    request_punch(&mut app, opponent, PunchType::Jab);
    for _ in 0..16 {
        app.update();
    }

    let dropped = STARTING_HEALTH - health_of(&app, player);
    assert!(
        (8.0 * 1.6..=15.0 * 1.6).contains(&dropped),
        "scaled jab damage out of range: {}",
        dropped
    );
    // The log records post-multiplier damage.
    let log = app.world().resource::<FightLog>();
    let logged = log.total_damage_dealt("Opponent");
    assert!((logged - dropped).abs() < 1e-3);
}

/// App shaped like a headless run: both corners on autopilot, opening
/// countdown included.
fn ai_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin, FightPlugin, CombatPlugin));
    app.insert_resource(GameRng::from_seed(seed));
    app.insert_resource(MatchClock::new(30));
    app.world_mut().spawn((
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 0.0),
        Fighter::new(
            FighterSide::Player,
            STARTING_HEALTH,
            PLAYER_MOVE_SPEED,
            Facing::Right,
        ),
        FighterIntent::default(),
        AiController::new(DifficultyLevel::Medium, PLAYER_SPAWN),
    ));
    app.world_mut().spawn((
        Transform::from_xyz(OPPONENT_SPAWN.x, OPPONENT_SPAWN.y, 0.0),
        Fighter::new(
            FighterSide::Opponent,
            STARTING_HEALTH,
            OPPONENT_MOVE_SPEED,
            Facing::Left,
        ),
        FighterIntent::default(),
        AiController::new(DifficultyLevel::Medium, OPPONENT_SPAWN),
    ));
    app
}

#[test]
fn test_seeded_matches_are_identical() {
    let mut a = ai_app(99);
    let mut b = ai_app(99);
    for _ in 0..2000 {
        a.update();
        b.update();
    }

    let snapshot = |app: &mut App| -> Vec<(f32, f32, f32, f32)> {
        let mut query = app.world_mut().query::<(&Fighter, &Transform)>();
        let mut rows: Vec<_> = query
            .iter(app.world())
            .map(|(f, t)| (f.health, f.damage_dealt, t.translation.x, t.translation.y))
            .collect();
        rows.sort_by(|x, y| x.partial_cmp(y).unwrap());
        rows
    };
    assert_eq!(snapshot(&mut a), snapshot(&mut b));
    assert_eq!(
        a.world().resource::<MatchState>().score,
        b.world().resource::<MatchState>().score
    );
}

#[test]
fn test_long_ai_run_keeps_invariants() {
    let mut app = ai_app(7);
    for _ in 0..3000 {
        app.update();
    }

    let mut query = app.world_mut().query::<(&Fighter, &Transform)>();
    for (fighter, transform) in query.iter(app.world()) {
        assert!(fighter.health >= 0.0);
        assert!(fighter.health <= fighter.max_health);
        let pos = transform.translation;
        assert!((RING_MIN_X..=RING_MAX_X).contains(&pos.x));
        assert!((RING_MIN_Y..=RING_MAX_Y).contains(&pos.y));
    }
}
