//! Headless match execution
//!
//! Runs a full match without any graphical output, CPU vs CPU, suitable for
//! automated testing and balance work.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use crate::combat::log::{FighterMetadata, FightLog, FightLogEventType, MatchMetadata};
use crate::combat::CombatPlugin;
use crate::fight::components::{
    AiController, Facing, Fighter, FighterIntent, FighterSide, GameRng, MatchClock, MatchConfig,
    MatchOutcome, MatchState, RoundPhase,
};
use crate::fight::constants::{
    OPPONENT_MOVE_SPEED, OPPONENT_SPAWN, PLAYER_MOVE_SPEED, PLAYER_SPAWN, STARTING_HEALTH,
};
use crate::fight::difficulty::DifficultyLevel;
use crate::fight::systems::FightPhase;
use crate::fight::FightPlugin;

use super::config::HeadlessMatchConfig;

/// Result of a completed headless match
///
/// This struct provides programmatic access to match results for testing
/// and analysis.
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// How the match ended: "knockout", "decision", "draw", or "quit"
    pub outcome: String,
    /// The winning side ("player" or "opponent"), None for a draw
    pub winner: Option<String>,
    /// Rounds that went to the scorecards
    pub rounds_played: u32,
    /// Per-round results as lowercase tokens
    pub round_results: Vec<String>,
    /// Player's final score
    pub score: u64,
    pub player: FighterReport,
    pub opponent: FighterReport,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
    /// Simulated match time in seconds
    pub simulated_secs: f32,
}

/// Statistics for a single fighter after the match
#[derive(Debug, Clone)]
pub struct FighterReport {
    pub max_health: f32,
    pub final_health: f32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
}

/// Resource to track headless match state
#[derive(Resource)]
pub struct HeadlessMatchState {
    /// Watchdog: abandon the run after this many ticks
    pub max_ticks: u64,
    /// Ticks simulated so far
    pub ticks_elapsed: u64,
    /// Custom output path for the saved log
    pub output_path: Option<String>,
    /// Whether the match has completed
    pub match_complete: bool,
    /// Random seed for deterministic simulation (if provided)
    pub random_seed: Option<u64>,
    /// Match report (populated when the match completes)
    pub report: Option<MatchReport>,
}

/// Plugin for headless match execution
pub struct HeadlessPlugin {
    pub config: HeadlessMatchConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        let match_config = self
            .config
            .to_match_config()
            .expect("Invalid match configuration");

        app.add_plugins((FightPlugin, CombatPlugin))
            .insert_resource(match_config)
            .insert_resource(HeadlessMatchState {
                max_ticks: self.config.max_ticks,
                ticks_elapsed: 0,
                output_path: self.config.output_path.clone(),
                match_complete: false,
                random_seed: self.config.random_seed,
                report: None,
            });

        app.add_systems(Startup, headless_setup_match)
            .add_systems(
                Update,
                (headless_track_ticks, headless_check_match_end)
                    .chain()
                    .after(FightPhase::MatchFlow),
            )
            .add_systems(PostUpdate, headless_exit_on_complete);
    }
}

/// Setup system for headless match
fn headless_setup_match(
    mut commands: Commands,
    config: Res<MatchConfig>,
    headless_state: Res<HeadlessMatchState>,
    mut fight_log: ResMut<FightLog>,
) {
    fight_log.clear();
    fight_log.log(
        FightLogEventType::MatchEvent,
        format!(
            "Match started (headless mode): {} difficulty, {} rounds of {}s",
            config.difficulty.name(),
            config.rounds,
            config.round_duration_secs
        ),
    );

    commands.insert_resource(MatchClock::new(config.round_duration_secs));
    commands.insert_resource(RoundPhase::default());

    let game_rng = match headless_state.random_seed {
        Some(seed) => {
            info!("Using deterministic RNG with seed: {}", seed);
            GameRng::from_seed(seed)
        }
        None => {
            info!("Using non-deterministic RNG (no seed provided)");
            GameRng::from_entropy()
        }
    };
    commands.insert_resource(game_rng);

    let profile = config.difficulty.profile();

    // Player side runs on autopilot with neutral multipliers; the
    // difficulty's incoming multiplier is what it has to live with.
    commands.spawn((
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 0.0),
        Fighter::new(
            FighterSide::Player,
            STARTING_HEALTH,
            PLAYER_MOVE_SPEED,
            Facing::Right,
        )
        .with_multipliers(1.0, profile.incoming_damage),
        FighterIntent::default(),
        AiController::new(DifficultyLevel::Medium, PLAYER_SPAWN),
    ));

    commands.spawn((
        Transform::from_xyz(OPPONENT_SPAWN.x, OPPONENT_SPAWN.y, 0.0),
        Fighter::new(
            FighterSide::Opponent,
            STARTING_HEALTH,
            OPPONENT_MOVE_SPEED * profile.opponent_speed,
            Facing::Left,
        )
        .with_multipliers(profile.opponent_damage, 1.0),
        FighterIntent::default(),
        AiController::new(config.difficulty, OPPONENT_SPAWN),
    ));

    info!(
        "Headless match setup complete: {} difficulty, {} rounds",
        config.difficulty.name(),
        config.rounds
    );
}

/// Count simulated ticks for the watchdog.
fn headless_track_ticks(mut headless_state: ResMut<HeadlessMatchState>) {
    if !headless_state.match_complete {
        headless_state.ticks_elapsed += 1;
    }
}

/// Check whether the match has resolved (or the watchdog tripped) and, once
/// it has, build the report and save the fight log.
fn headless_check_match_end(
    fighters: Query<(&Fighter, &Transform)>,
    config: Res<MatchConfig>,
    clock: Res<MatchClock>,
    mut match_state: ResMut<MatchState>,
    fight_log: Res<FightLog>,
    mut phase: ResMut<RoundPhase>,
    mut headless_state: ResMut<HeadlessMatchState>,
) {
    if headless_state.match_complete {
        return;
    }

    if match_state.outcome.is_none() && headless_state.ticks_elapsed >= headless_state.max_ticks {
        warn!(
            "Match hit the {}-tick watchdog - declaring a draw",
            headless_state.max_ticks
        );
        match_state.outcome = Some(MatchOutcome::Draw);
        *phase = RoundPhase::MatchOver;
    }

    let Some(outcome) = match_state.outcome else {
        return;
    };

    let report = build_match_report(&fighters, outcome, &match_state, &clock, &headless_state);
    save_fight_log(&fighters, &config, &fight_log, &report, &headless_state);
    info!("{}", outcome.describe());
    headless_state.report = Some(report);
    headless_state.match_complete = true;
}

/// Build the MatchReport from the final simulation state
fn build_match_report(
    fighters: &Query<(&Fighter, &Transform)>,
    outcome: MatchOutcome,
    match_state: &MatchState,
    clock: &MatchClock,
    headless_state: &HeadlessMatchState,
) -> MatchReport {
    let mut player = FighterReport {
        max_health: 0.0,
        final_health: 0.0,
        damage_dealt: 0.0,
        damage_taken: 0.0,
    };
    let mut opponent = player.clone();

    for (fighter, _) in fighters.iter() {
        let report = FighterReport {
            max_health: fighter.max_health,
            final_health: fighter.health,
            damage_dealt: fighter.damage_dealt,
            damage_taken: fighter.damage_taken,
        };
        match fighter.side {
            FighterSide::Player => player = report,
            FighterSide::Opponent => opponent = report,
        }
    }

    MatchReport {
        outcome: outcome.token().to_string(),
        winner: outcome.winner().map(|side| side.token().to_string()),
        rounds_played: match_state.round_results.len() as u32,
        round_results: match_state
            .round_results
            .iter()
            .map(|r| format!("{:?}", r).to_lowercase())
            .collect(),
        score: match_state.score,
        player,
        opponent,
        random_seed: headless_state.random_seed,
        simulated_secs: clock.match_time_secs(),
    }
}

/// Save the fight log (with match metadata) to a file
fn save_fight_log(
    fighters: &Query<(&Fighter, &Transform)>,
    config: &Res<MatchConfig>,
    fight_log: &Res<FightLog>,
    report: &MatchReport,
    headless_state: &HeadlessMatchState,
) {
    let fighter_metadata = |side: FighterSide| -> FighterMetadata {
        for (fighter, transform) in fighters.iter() {
            if fighter.side == side {
                return FighterMetadata {
                    max_health: fighter.max_health,
                    final_health: fighter.health,
                    damage_dealt: fighter.damage_dealt,
                    damage_taken: fighter.damage_taken,
                    final_position: (transform.translation.x, transform.translation.y),
                };
            }
        }
        FighterMetadata {
            max_health: 0.0,
            final_health: 0.0,
            damage_dealt: 0.0,
            damage_taken: 0.0,
            final_position: (0.0, 0.0),
        }
    };

    let metadata = MatchMetadata {
        difficulty: config.difficulty.name().to_string(),
        outcome: report.outcome.clone(),
        winner: report.winner.clone(),
        rounds_played: report.rounds_played,
        round_results: report.round_results.clone(),
        score: report.score,
        random_seed: headless_state.random_seed,
        player: fighter_metadata(FighterSide::Player),
        opponent: fighter_metadata(FighterSide::Opponent),
    };

    match fight_log.save_to_file(&metadata, headless_state.output_path.as_deref()) {
        Ok(filename) => {
            println!("Match complete. Log saved to: {}", filename);
        }
        Err(e) => {
            eprintln!("Failed to save fight log: {}", e);
        }
    }
}

/// Exit the app when the match is complete
fn headless_exit_on_complete(
    headless_state: Res<HeadlessMatchState>,
    mut exit: EventWriter<AppExit>,
) {
    if headless_state.match_complete {
        exit.send(AppExit::Success);
    }
}

/// Run a headless match with the given configuration
pub fn run_headless_match(config: HeadlessMatchConfig) -> Result<(), String> {
    config.validate()?;

    println!("Starting headless match simulation...");
    println!("  Difficulty: {}", config.difficulty);
    println!(
        "  Rounds: {} x {}s",
        config.rounds, config.round_duration_secs
    );
    if let Some(seed) = config.random_seed {
        println!("  Seed: {}", seed);
    }

    App::new()
        // Minimal plugins - no window, no rendering. A zero wait duration
        // lets the simulation run as fast as the machine allows.
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)))
        .add_plugins(bevy::log::LogPlugin::default())
        // Transform plugin needed for fighter positions
        .add_plugins(TransformPlugin)
        // Our headless match plugin
        .add_plugins(HeadlessPlugin { config })
        .run();

    Ok(())
}
