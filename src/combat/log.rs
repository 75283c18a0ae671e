//! Fight logging
//!
//! Records fight events for display and post-match analysis, and serializes
//! the whole log (plus match metadata) to JSON at the end of a headless run.

use bevy::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// A single entry in the fight log.
#[derive(Debug, Clone, Serialize)]
pub struct FightLogEntry {
    /// Timestamp in match time (seconds since match start).
    pub timestamp: f32,
    /// The type of event.
    pub event_type: FightLogEventType,
    /// Human-readable description of the event.
    pub message: String,
    /// Structured payload, present for hit entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit: Option<HitRecord>,
}

/// Types of fight log events for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FightLogEventType {
    /// A punch connected.
    Hit,
    /// A fighter was stunned.
    Stun,
    /// A fighter went down.
    Knockout,
    /// Round start/end.
    RoundEvent,
    /// Match start, end, pause.
    MatchEvent,
}

/// Structured record of one landed punch.
#[derive(Debug, Clone, Serialize)]
pub struct HitRecord {
    pub attacker: String,
    pub defender: String,
    pub punch: String,
    pub damage: f32,
}

/// The fight log resource storing all events.
#[derive(Resource, Default)]
pub struct FightLog {
    /// All log entries in chronological order.
    pub entries: Vec<FightLogEntry>,
    /// Current match time.
    pub match_time: f32,
}

impl FightLog {
    /// Clear the log for a new match.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.match_time = 0.0;
    }

    /// Add a new entry to the log.
    pub fn log(&mut self, event_type: FightLogEventType, message: String) {
        self.entries.push(FightLogEntry {
            timestamp: self.match_time,
            event_type,
            message,
            hit: None,
        });
    }

    /// Record a landed punch with its structured payload.
    pub fn log_hit(&mut self, attacker: String, defender: String, punch: String, damage: f32) {
        let message = format!(
            "{} lands a {} on {} for {:.1} damage",
            attacker, punch, defender, damage
        );
        self.entries.push(FightLogEntry {
            timestamp: self.match_time,
            event_type: FightLogEventType::Hit,
            message,
            hit: Some(HitRecord {
                attacker,
                defender,
                punch,
                damage,
            }),
        });
    }

    /// Get entries filtered by event type.
    pub fn filter_by_type(&self, event_type: FightLogEventType) -> Vec<&FightLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get the last N entries.
    pub fn recent(&self, count: usize) -> Vec<&FightLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Total damage landed by one fighter, broken down by punch type.
    pub fn damage_by_punch(&self, attacker: &str) -> HashMap<String, f32> {
        let mut totals = HashMap::new();
        for entry in &self.entries {
            if let Some(hit) = &entry.hit {
                if hit.attacker == attacker {
                    *totals.entry(hit.punch.clone()).or_insert(0.0) += hit.damage;
                }
            }
        }
        totals
    }

    /// Total damage landed by one fighter across all punch types.
    pub fn total_damage_dealt(&self, attacker: &str) -> f32 {
        self.entries
            .iter()
            .filter_map(|e| e.hit.as_ref())
            .filter(|h| h.attacker == attacker)
            .map(|h| h.damage)
            .sum()
    }

    /// Number of punches one fighter landed.
    pub fn hits_landed(&self, attacker: &str) -> usize {
        self.entries
            .iter()
            .filter_map(|e| e.hit.as_ref())
            .filter(|h| h.attacker == attacker)
            .count()
    }

    /// Save the full log with match metadata to a JSON file. Returns the
    /// path written to.
    pub fn save_to_file(
        &self,
        metadata: &MatchMetadata,
        output_path: Option<&str>,
    ) -> Result<String, String> {
        let filename = match output_path {
            Some(path) => path.to_string(),
            None => {
                let stamp = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                format!("fight_log_{}.json", stamp)
            }
        };

        let file = FightLogFile {
            metadata,
            entries: &self.entries,
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| format!("Failed to serialize fight log: {}", e))?;
        std::fs::write(&filename, json)
            .map_err(|e| format!("Failed to write fight log to {}: {}", filename, e))?;
        Ok(filename)
    }
}

/// On-disk shape of a saved fight log.
#[derive(Serialize)]
struct FightLogFile<'a> {
    metadata: &'a MatchMetadata,
    entries: &'a [FightLogEntry],
}

/// Match summary stored alongside the entries in a saved log.
#[derive(Debug, Clone, Serialize)]
pub struct MatchMetadata {
    pub difficulty: String,
    pub outcome: String,
    pub winner: Option<String>,
    pub rounds_played: u32,
    pub round_results: Vec<String>,
    pub score: u64,
    pub random_seed: Option<u64>,
    pub player: FighterMetadata,
    pub opponent: FighterMetadata,
}

/// Per-fighter summary stored in a saved log.
#[derive(Debug, Clone, Serialize)]
pub struct FighterMetadata {
    pub max_health: f32,
    pub final_health: f32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
    pub final_position: (f32, f32),
}
