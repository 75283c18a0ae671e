//! Punch types and their timing/damage profiles.
//!
//! The profile table is the single source of truth for punch behavior; both
//! the player mapping and the AI consult it. Frames are simulation ticks and
//! active windows are inclusive on both ends.

use serde::{Deserialize, Serialize};

/// The four punch types a fighter can throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PunchType {
    Jab,
    Cross,
    Hook,
    Uppercut,
}

impl PunchType {
    pub const ALL: [PunchType; 4] = [
        PunchType::Jab,
        PunchType::Cross,
        PunchType::Hook,
        PunchType::Uppercut,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PunchType::Jab => "jab",
            PunchType::Cross => "cross",
            PunchType::Hook => "hook",
            PunchType::Uppercut => "uppercut",
        }
    }

    pub fn profile(&self) -> &'static PunchProfile {
        match self {
            PunchType::Jab => &JAB,
            PunchType::Cross => &CROSS,
            PunchType::Hook => &HOOK,
            PunchType::Uppercut => &UPPERCUT,
        }
    }
}

/// Static timing and damage data for one punch type.
#[derive(Debug, Clone, Copy)]
pub struct PunchProfile {
    /// Ticks before the same punch can be thrown again. Scheduled at request
    /// time, so it always covers the animation itself.
    pub cooldown_frames: u32,
    /// Total animation length; the punch clears once `frame` reaches this.
    pub total_frames: u32,
    /// First frame (inclusive) on which the strike can land.
    pub active_start: u32,
    /// Last frame (inclusive) on which the strike can land.
    pub active_end: u32,
    pub damage_min: f32,
    pub damage_max: f32,
    /// How far the strike point extends from the fighter's center, along
    /// the facing direction.
    pub reach: f32,
    /// The strike connects when its point is within this distance of the
    /// defender's center.
    pub hit_radius: f32,
}

// Fast punches open their windows early; power punches wind up longer and
// hit later.
static JAB: PunchProfile = PunchProfile {
    cooldown_frames: 20,
    total_frames: 15,
    active_start: 4,
    active_end: 8,
    damage_min: 8.0,
    damage_max: 15.0,
    reach: 60.0,
    hit_radius: 42.0,
};

static CROSS: PunchProfile = PunchProfile {
    cooldown_frames: 45,
    total_frames: 15,
    active_start: 6,
    active_end: 11,
    damage_min: 25.0,
    damage_max: 40.0,
    reach: 85.0,
    hit_radius: 44.0,
};

static HOOK: PunchProfile = PunchProfile {
    cooldown_frames: 35,
    total_frames: 15,
    active_start: 5,
    active_end: 10,
    damage_min: 15.0,
    damage_max: 25.0,
    reach: 70.0,
    hit_radius: 48.0,
};

static UPPERCUT: PunchProfile = PunchProfile {
    cooldown_frames: 40,
    total_frames: 15,
    active_start: 7,
    active_end: 12,
    damage_min: 20.0,
    damage_max: 35.0,
    reach: 50.0,
    hit_radius: 46.0,
};
