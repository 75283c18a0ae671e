//! Components and resources for the fight simulation.
//!
//! `Fighter` carries the full per-combatant state machine (punch, status,
//! cooldowns). Controllers (player input or AI) only ever write to
//! `FighterIntent`; the fighter's own tick and the collision pass are the
//! only writers of health and timers.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::constants::*;
use super::difficulty::DifficultyLevel;
use super::punches::PunchType;

/// Which side of the match a fighter belongs to. Both sides share the same
/// `Fighter` shape; the side only decides who supplies intents, who the
/// incoming-damage multiplier protects (or punishes), and who scores points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FighterSide {
    Player,
    Opponent,
}

impl FighterSide {
    pub fn other(&self) -> FighterSide {
        match self {
            FighterSide::Player => FighterSide::Opponent,
            FighterSide::Opponent => FighterSide::Player,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FighterSide::Player => "Player",
            FighterSide::Opponent => "Opponent",
        }
    }

    /// Lowercase token used in reports and saved logs.
    pub fn token(&self) -> &'static str {
        match self {
            FighterSide::Player => "player",
            FighterSide::Opponent => "opponent",
        }
    }
}

/// Which way a fighter is facing. Recomputed every tick toward the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn dir_x(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// A punch in flight. `landed` guards the one-damage-per-activation rule:
/// it is set by the collision pass and only cleared by the next successful
/// punch request.
#[derive(Debug, Clone, Copy)]
pub struct ActivePunch {
    pub punch_type: PunchType,
    pub frame: u32,
    pub landed: bool,
}

/// Outcome of a single damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Hit,
    Stunned,
    Knockout,
}

/// One combatant in the ring.
#[derive(Component, Debug, Clone)]
pub struct Fighter {
    pub side: FighterSide,
    pub health: f32,
    pub max_health: f32,
    /// Base movement speed in ring units per tick.
    pub move_speed: f32,
    pub facing: Facing,
    pub punch: Option<ActivePunch>,
    /// Ticks until any punch can be thrown again. One shared gate: throwing
    /// a jab locks out the cross too, for the jab's full cooldown.
    pub cooldown_remaining: u32,
    pub hit_timer: u32,
    pub stun_timer: u32,
    pub knocked_out: bool,
    pub knockout_timer: u32,
    /// Scales this fighter's outgoing punch damage.
    pub damage_multiplier: f32,
    /// Scales damage this fighter receives (difficulty only penalizes the
    /// player side; the opponent keeps 1.0).
    pub incoming_multiplier: f32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
}

impl Fighter {
    pub fn new(side: FighterSide, max_health: f32, move_speed: f32, facing: Facing) -> Self {
        Self {
            side,
            health: max_health,
            max_health,
            move_speed,
            facing,
            punch: None,
            cooldown_remaining: 0,
            hit_timer: 0,
            stun_timer: 0,
            knocked_out: false,
            knockout_timer: 0,
            damage_multiplier: 1.0,
            incoming_multiplier: 1.0,
            damage_dealt: 0.0,
            damage_taken: 0.0,
        }
    }

    pub fn with_multipliers(mut self, damage: f32, incoming: f32) -> Self {
        self.damage_multiplier = damage;
        self.incoming_multiplier = incoming;
        self
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0
    }

    pub fn is_hit_staggered(&self) -> bool {
        self.hit_timer > 0
    }

    /// Whether the fighter can translate at all this tick. Hit stagger does
    /// not forbid movement, it only slows it (see `current_move_speed`).
    pub fn can_move(&self) -> bool {
        !self.knocked_out && !self.is_stunned()
    }

    pub fn current_move_speed(&self) -> f32 {
        if self.is_hit_staggered() {
            self.move_speed * HIT_MOVE_FACTOR
        } else {
            self.move_speed
        }
    }

    /// Try to start a punch. Fails without side effects while on cooldown,
    /// knocked out, stunned, or mid-punch. The cooldown is scheduled at
    /// request time from the thrown punch's profile.
    pub fn request_punch(&mut self, punch: PunchType) -> bool {
        if self.knocked_out || self.is_stunned() || self.punch.is_some() {
            return false;
        }
        if self.cooldown_remaining > 0 {
            return false;
        }
        let profile = punch.profile();
        self.punch = Some(ActivePunch {
            punch_type: punch,
            frame: 0,
            landed: false,
        });
        self.cooldown_remaining = profile.cooldown_frames;
        true
    }

    /// Advance the fighter's own timers by one tick. Order matters:
    /// knockout recovery preempts everything, then stun, then punch
    /// animation, then cooldowns and hit stagger.
    pub fn tick(&mut self) {
        if self.knocked_out {
            self.knockout_timer = self.knockout_timer.saturating_sub(1);
            if self.knockout_timer == 0 {
                // Standing-eight-count recovery: back on their feet with a
                // single point of health.
                self.knocked_out = false;
                if self.health < 1.0 {
                    self.health = 1.0;
                }
            }
            return;
        }
        if self.stun_timer > 0 {
            self.stun_timer -= 1;
        }
        if let Some(active) = self.punch.as_mut() {
            active.frame += 1;
            if active.frame >= active.punch_type.profile().total_frames {
                self.punch = None;
            }
        }
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
        if self.hit_timer > 0 {
            self.hit_timer -= 1;
        }
    }

    /// Whether the current punch is inside its hit-valid window.
    pub fn is_punch_active(&self) -> bool {
        match &self.punch {
            Some(active) => {
                let profile = active.punch_type.profile();
                active.frame >= profile.active_start && active.frame <= profile.active_end
            }
            None => false,
        }
    }

    /// Where the current punch connects: the fighter's center extended
    /// along facing by the punch's reach. None when no punch is in flight.
    pub fn strike_point(&self, position: Vec2) -> Option<Vec2> {
        self.punch.as_ref().map(|active| {
            let reach = active.punch_type.profile().reach;
            position + Vec2::new(self.facing.dir_x() * reach, 0.0)
        })
    }

    /// Apply damage and run the status-entry transitions. Knockout takes
    /// priority over the stun roll; the two never trigger together. A
    /// fighter already on the canvas takes no further damage.
    pub fn apply_damage(&mut self, amount: f32, rng: &mut GameRng) -> DamageOutcome {
        debug_assert!(amount >= 0.0, "damage must be non-negative");
        if self.knocked_out {
            return DamageOutcome::Knockout;
        }
        self.health = (self.health - amount).max(0.0);
        self.damage_taken += amount;
        if self.health <= 0.0 {
            self.knocked_out = true;
            self.knockout_timer = KNOCKOUT_TICKS;
            self.punch = None;
            self.stun_timer = 0;
            self.hit_timer = 0;
            DamageOutcome::Knockout
        } else if self.health < STUN_HEALTH_FRACTION * self.max_health
            && rng.random_f32() < STUN_CHANCE
        {
            self.stun_timer = STUN_TICKS;
            self.hit_timer = HIT_STAGGER_TICKS;
            DamageOutcome::Stunned
        } else {
            self.hit_timer = HIT_STAGGER_TICKS;
            DamageOutcome::Hit
        }
    }

    /// Wipe transient combat state for a fresh round.
    pub fn reset_for_round(&mut self) {
        self.punch = None;
        self.cooldown_remaining = 0;
        self.hit_timer = 0;
        self.stun_timer = 0;
        self.knocked_out = false;
        self.knockout_timer = 0;
    }
}

/// Per-tick intent written by a controller and consumed by the fighter
/// tick. Movement is a direction vector (normalized before use); the punch
/// request is taken exactly once.
#[derive(Component, Debug, Clone, Default)]
pub struct FighterIntent {
    pub move_dir: Vec2,
    pub punch_request: Option<PunchType>,
}

/// Drives a CPU-controlled fighter. Two independent countdowns pace
/// attacking and repositioning at different rates.
#[derive(Component, Debug, Clone)]
pub struct AiController {
    pub level: DifficultyLevel,
    pub attack_timer: u32,
    pub move_timer: u32,
    pub attack_range: f32,
    pub move_target: Vec2,
}

impl AiController {
    pub fn new(level: DifficultyLevel, spawn: Vec2) -> Self {
        Self {
            level,
            attack_timer: 0,
            move_timer: 0,
            // More aggressive levels start punches from further out.
            attack_range: AI_ATTACK_RANGE
                + AI_RANGE_PER_LEVEL * level.profile().ai_level as f32,
            move_target: spawn,
        }
    }

    pub fn reset(&mut self, spawn: Vec2) {
        self.attack_timer = 0;
        self.move_timer = 0;
        self.move_target = spawn;
    }
}

/// Seedable RNG for all simulation randomness. Matches run identically when
/// given the same seed.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    seed: Option<u64>,
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Uniform float in [0, 1).
    pub fn random_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Uniform float in [min, max). Returns min when the range is empty.
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform integer in [min, max].
    pub fn random_ticks(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Pause and quit flags. Pausing freezes every countdown in the
/// simulation; rendering of the frozen state is the shell's business.
#[derive(Resource, Debug, Default)]
pub struct SimulationControl {
    pub paused: bool,
    pub quit_requested: bool,
}

impl SimulationControl {
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}

/// Match-level configuration, fixed at setup.
#[derive(Resource, Debug, Clone)]
pub struct MatchConfig {
    pub difficulty: DifficultyLevel,
    pub rounds: u32,
    pub round_duration_secs: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            difficulty: DifficultyLevel::Medium,
            rounds: DEFAULT_ROUNDS,
            round_duration_secs: DEFAULT_ROUND_SECS,
        }
    }
}

/// The round timer and overall tick count.
#[derive(Resource, Debug)]
pub struct MatchClock {
    /// 1-based round number.
    pub round: u32,
    pub time_remaining_secs: u32,
    /// Ticks accumulated toward the next whole second.
    pub tick_accumulator: u32,
    /// Total simulated ticks, including countdowns. Drives log timestamps.
    pub elapsed_ticks: u64,
}

impl MatchClock {
    pub fn new(round_duration_secs: u32) -> Self {
        Self {
            round: 1,
            time_remaining_secs: round_duration_secs,
            tick_accumulator: 0,
            elapsed_ticks: 0,
        }
    }

    pub fn match_time_secs(&self) -> f32 {
        self.elapsed_ticks as f32 / TICKS_PER_SECOND as f32
    }
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new(DEFAULT_ROUND_SECS)
    }
}

/// Where the match currently is in its round lifecycle.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Pre-round breather; combat is frozen until the bell.
    Countdown { ticks_remaining: u32 },
    Active,
    MatchOver,
}

impl Default for RoundPhase {
    fn default() -> Self {
        RoundPhase::Countdown {
            ticks_remaining: ROUND_REST_TICKS,
        }
    }
}

/// Result of a single completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundResult {
    Player,
    Opponent,
    Draw,
}

/// How the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A fighter went down; the match ends on the spot.
    Knockout { winner: FighterSide },
    /// Went the distance; decided on round wins, health as tiebreak.
    Decision { winner: FighterSide },
    Draw,
    Quit,
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<FighterSide> {
        match self {
            MatchOutcome::Knockout { winner } | MatchOutcome::Decision { winner } => Some(*winner),
            MatchOutcome::Draw | MatchOutcome::Quit => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            MatchOutcome::Knockout { .. } => "knockout",
            MatchOutcome::Decision { .. } => "decision",
            MatchOutcome::Draw => "draw",
            MatchOutcome::Quit => "quit",
        }
    }

    pub fn describe(&self) -> String {
        match self {
            MatchOutcome::Knockout { winner } => format!("{} wins by knockout", winner.name()),
            MatchOutcome::Decision { winner } => format!("{} wins on points", winner.name()),
            MatchOutcome::Draw => "The match is a draw".to_string(),
            MatchOutcome::Quit => "The match was abandoned".to_string(),
        }
    }
}

/// Accumulated round results, score, and the final outcome once set.
#[derive(Resource, Debug, Default)]
pub struct MatchState {
    pub round_results: Vec<RoundResult>,
    pub score: u64,
    pub outcome: Option<MatchOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_fighter() -> Fighter {
        Fighter::new(
            FighterSide::Player,
            STARTING_HEALTH,
            PLAYER_MOVE_SPEED,
            Facing::Right,
        )
    }

    #[test]
    fn test_request_punch_rejected_on_cooldown() {
        let mut fighter = test_fighter();
        assert!(fighter.request_punch(PunchType::Jab));
        assert_eq!(fighter.cooldown_remaining, 20);

        // One tick later the same request must fail without touching frame.
        fighter.tick();
        let frame_before = fighter.punch.as_ref().map(|p| p.frame);
        assert!(!fighter.request_punch(PunchType::Jab));
        assert_eq!(fighter.punch.as_ref().map(|p| p.frame), frame_before);

        // After the full cooldown it succeeds again.
        for _ in 0..19 {
            fighter.tick();
        }
        assert_eq!(fighter.cooldown_remaining, 0);
        assert!(fighter.request_punch(PunchType::Jab));
    }

    #[test]
    fn test_cooldown_is_shared_across_punch_types() {
        let mut fighter = test_fighter();
        assert!(fighter.request_punch(PunchType::Jab));

        // The jab animation (15 ticks) ends before its cooldown (20) does;
        // a different punch type is still locked out for those 5 ticks.
        for _ in 0..15 {
            fighter.tick();
        }
        assert!(fighter.punch.is_none());
        assert_eq!(fighter.cooldown_remaining, 5);
        assert!(!fighter.request_punch(PunchType::Cross));

        for _ in 0..5 {
            fighter.tick();
        }
        assert!(fighter.request_punch(PunchType::Cross));
        // The new cooldown comes from the punch actually thrown.
        assert_eq!(fighter.cooldown_remaining, 45);
    }

    #[test]
    fn test_request_punch_rejected_mid_punch() {
        let mut fighter = test_fighter();
        assert!(fighter.request_punch(PunchType::Jab));
        assert!(!fighter.request_punch(PunchType::Hook));
        assert_eq!(fighter.punch.as_ref().map(|p| p.punch_type), Some(PunchType::Jab));
    }

    #[test]
    fn test_punch_active_only_inside_window() {
        let mut fighter = test_fighter();
        assert!(fighter.request_punch(PunchType::Jab));
        let profile = PunchType::Jab.profile();

        let mut active_frames = Vec::new();
        while fighter.punch.is_some() {
            if fighter.is_punch_active() {
                active_frames.push(fighter.punch.as_ref().map(|p| p.frame).unwrap());
            }
            fighter.tick();
        }
        let expected: Vec<u32> = (profile.active_start..=profile.active_end).collect();
        assert_eq!(active_frames, expected);
        assert!(!fighter.is_punch_active());
    }

    #[test]
    fn test_punch_clears_after_total_frames() {
        let mut fighter = test_fighter();
        assert!(fighter.request_punch(PunchType::Cross));
        let total = PunchType::Cross.profile().total_frames;
        for _ in 0..total {
            assert!(fighter.punch.is_some());
            fighter.tick();
        }
        assert!(fighter.punch.is_none());
    }

    #[test]
    fn test_apply_damage_floors_at_zero_and_knocks_out() {
        let mut rng = GameRng::from_seed(7);
        let mut fighter = test_fighter();
        fighter.health = 10.0;
        let outcome = fighter.apply_damage(50.0, &mut rng);
        assert_eq!(outcome, DamageOutcome::Knockout);
        assert_eq!(fighter.health, 0.0);
        assert!(fighter.knocked_out);
        assert_eq!(fighter.knockout_timer, KNOCKOUT_TICKS);
        // Knockout suppresses punch requests and movement.
        assert!(!fighter.request_punch(PunchType::Jab));
        assert!(!fighter.can_move());
    }

    #[test]
    fn test_damage_ignored_while_knocked_out() {
        let mut rng = GameRng::from_seed(7);
        let mut fighter = test_fighter();
        fighter.health = 5.0;
        fighter.apply_damage(10.0, &mut rng);
        assert!(fighter.knocked_out);
        fighter.tick();
        let timer = fighter.knockout_timer;

        // A fighter already down takes no further damage and the count is
        // not re-armed.
        let outcome = fighter.apply_damage(50.0, &mut rng);
        assert_eq!(outcome, DamageOutcome::Knockout);
        assert_eq!(fighter.health, 0.0);
        assert_eq!(fighter.damage_taken, 10.0);
        assert_eq!(fighter.knockout_timer, timer);
    }

    #[test]
    fn test_knockout_recovery_floors_health_to_one() {
        let mut rng = GameRng::from_seed(7);
        let mut fighter = test_fighter();
        fighter.health = 5.0;
        fighter.apply_damage(5.0, &mut rng);
        assert!(fighter.knocked_out);
        for _ in 0..KNOCKOUT_TICKS {
            fighter.tick();
        }
        assert!(!fighter.knocked_out);
        assert_eq!(fighter.health, 1.0);
    }

    #[test]
    fn test_no_stun_above_health_threshold() {
        // Health stays well above the stun threshold, so across many seeds
        // the outcome must always be a plain hit.
        for seed in 0..100 {
            let mut rng = GameRng::from_seed(seed);
            let mut fighter = test_fighter();
            let outcome = fighter.apply_damage(10.0, &mut rng);
            assert_eq!(outcome, DamageOutcome::Hit);
        }
    }

    #[test]
    fn test_stun_possible_below_health_threshold() {
        let mut stuns = 0;
        for seed in 0..200 {
            let mut rng = GameRng::from_seed(seed);
            let mut fighter = test_fighter();
            fighter.health = 100.0;
            if fighter.apply_damage(10.0, &mut rng) == DamageOutcome::Stunned {
                stuns += 1;
                assert_eq!(fighter.stun_timer, STUN_TICKS);
            }
        }
        // 10% chance over 200 independent seeds; zero would mean the roll
        // is never taken.
        assert!(stuns > 0);
    }

    #[test]
    fn test_hit_stagger_slows_but_allows_movement() {
        let mut rng = GameRng::from_seed(1);
        let mut fighter = test_fighter();
        fighter.apply_damage(10.0, &mut rng);
        assert!(fighter.can_move());
        assert_eq!(
            fighter.current_move_speed(),
            PLAYER_MOVE_SPEED * HIT_MOVE_FACTOR
        );
        // Hit stagger does not block punches, only stun and knockout do.
        assert!(fighter.request_punch(PunchType::Jab));
    }

    #[test]
    fn test_strike_point_follows_facing() {
        let mut fighter = test_fighter();
        assert!(fighter.request_punch(PunchType::Jab));
        let reach = PunchType::Jab.profile().reach;
        let pos = Vec2::new(300.0, 350.0);
        assert_eq!(
            fighter.strike_point(pos),
            Some(Vec2::new(300.0 + reach, 350.0))
        );
        fighter.facing = Facing::Left;
        assert_eq!(
            fighter.strike_point(pos),
            Some(Vec2::new(300.0 - reach, 350.0))
        );
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = GameRng::from_seed(42);
        let mut b = GameRng::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.random_f32(), b.random_f32());
            assert_eq!(a.random_ticks(20, 40), b.random_ticks(20, 40));
        }
    }
}
