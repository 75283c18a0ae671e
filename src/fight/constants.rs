//! Simulation constants for the boxing core.
//!
//! All durations are in simulation ticks (60 per second) and all distances
//! are in ring units (canvas-style coordinates, +y pointing down).

use bevy::prelude::Vec2;

/// Fixed simulation rate. The round timer loses one second every time this
/// many ticks elapse.
pub const TICKS_PER_SECOND: u32 = 60;

// Ring bounds. Fighters are clamped into this box every tick.
pub const RING_MIN_X: f32 = 100.0;
pub const RING_MAX_X: f32 = 700.0;
pub const RING_MIN_Y: f32 = 200.0;
pub const RING_MAX_Y: f32 = 450.0;

/// Starting corners, restored at the top of every round.
pub const PLAYER_SPAWN: Vec2 = Vec2::new(200.0, 350.0);
pub const OPPONENT_SPAWN: Vec2 = Vec2::new(600.0, 350.0);

pub const STARTING_HEALTH: f32 = 500.0;
pub const PLAYER_MOVE_SPEED: f32 = 4.0;
pub const OPPONENT_MOVE_SPEED: f32 = 3.0;
/// The opponent picks up speed, durability, power, and reach each round.
pub const OPPONENT_SPEED_PER_ROUND: f32 = 0.5;
pub const OPPONENT_HEALTH_PER_ROUND: f32 = 50.0;
/// Fractional damage bonus per completed round.
pub const OPPONENT_DAMAGE_PER_ROUND: f32 = 0.05;
pub const OPPONENT_RANGE_PER_ROUND: f32 = 5.0;

pub const HIT_STAGGER_TICKS: u32 = 10;
pub const STUN_TICKS: u32 = 60;
pub const KNOCKOUT_TICKS: u32 = 180;
/// Stun roll only happens once health is below this fraction of max.
pub const STUN_HEALTH_FRACTION: f32 = 0.35;
pub const STUN_CHANCE: f32 = 0.1;
/// Movement speed factor while hit-staggered.
pub const HIT_MOVE_FACTOR: f32 = 0.5;

/// Base punching distance; extended by difficulty aggression and per-round
/// escalation.
pub const AI_ATTACK_RANGE: f32 = 80.0;
pub const AI_RANGE_PER_LEVEL: f32 = 2.0;
/// Distance below which the AI switches to its close-range punch table.
pub const AI_CLOSE_RANGE: f32 = 45.0;

pub const DEFAULT_ROUNDS: u32 = 3;
pub const DEFAULT_ROUND_SECS: u32 = 30;
/// Breather between rounds (and before the opening bell).
pub const ROUND_REST_TICKS: u32 = 180;
/// Flat heal applied to both fighters between rounds, capped at max health.
pub const ROUND_HEAL: f32 = 150.0;

/// Points awarded per point of damage the player lands, before the
/// difficulty score multiplier.
pub const SCORE_PER_DAMAGE: f32 = 10.0;
