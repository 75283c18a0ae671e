//! Difficulty levels and their multiplier bundles.
//!
//! A difficulty is picked once at match setup and is immutable for the
//! whole match. Every tuning knob the opponent gets lives in the profile
//! table here, so balance changes are data edits.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
    Legendary,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 4] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
        DifficultyLevel::Legendary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
            DifficultyLevel::Legendary => "legendary",
        }
    }

    /// Parse a difficulty name as it appears in config files.
    pub fn parse(name: &str) -> Result<DifficultyLevel, String> {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyLevel::Easy),
            "medium" => Ok(DifficultyLevel::Medium),
            "hard" => Ok(DifficultyLevel::Hard),
            "legendary" => Ok(DifficultyLevel::Legendary),
            _ => Err(format!(
                "Unknown difficulty: '{}'. Valid levels: easy, medium, hard, legendary",
                name
            )),
        }
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        match self {
            DifficultyLevel::Easy => &EASY,
            DifficultyLevel::Medium => &MEDIUM,
            DifficultyLevel::Hard => &HARD,
            DifficultyLevel::Legendary => &LEGENDARY,
        }
    }
}

/// Multiplier bundle for one difficulty level.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyProfile {
    /// Scales damage dealt to the player-side fighter.
    pub incoming_damage: f32,
    /// Scales the opponent's punch damage.
    pub opponent_damage: f32,
    /// Scales the opponent's movement speed.
    pub opponent_speed: f32,
    /// Abstract aggression knob driving attack cadence and combo chance.
    pub ai_level: u32,
    /// Scales points the player earns per landed punch.
    pub score_multiplier: f32,
}

static EASY: DifficultyProfile = DifficultyProfile {
    incoming_damage: 0.7,
    opponent_damage: 0.8,
    opponent_speed: 0.85,
    ai_level: 2,
    score_multiplier: 1.0,
};

static MEDIUM: DifficultyProfile = DifficultyProfile {
    incoming_damage: 1.0,
    opponent_damage: 1.0,
    opponent_speed: 1.0,
    ai_level: 4,
    score_multiplier: 1.5,
};

static HARD: DifficultyProfile = DifficultyProfile {
    incoming_damage: 1.3,
    opponent_damage: 1.25,
    opponent_speed: 1.15,
    ai_level: 7,
    score_multiplier: 2.0,
};

static LEGENDARY: DifficultyProfile = DifficultyProfile {
    incoming_damage: 1.6,
    opponent_damage: 1.5,
    opponent_speed: 1.3,
    ai_level: 9,
    score_multiplier: 3.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legendary_multipliers() {
        let p = DifficultyLevel::Legendary.profile();
        assert_eq!(p.incoming_damage, 1.6);
        assert_eq!(p.score_multiplier, 3.0);
    }

    #[test]
    fn test_score_multipliers_ascend() {
        let mults: Vec<f32> = DifficultyLevel::ALL
            .iter()
            .map(|d| d.profile().score_multiplier)
            .collect();
        assert_eq!(mults, vec![1.0, 1.5, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_accepts_mixed_case() {
        assert_eq!(
            DifficultyLevel::parse("Legendary"),
            Ok(DifficultyLevel::Legendary)
        );
        assert!(DifficultyLevel::parse("nightmare").is_err());
    }

    #[test]
    fn test_profiles_get_tougher() {
        for pair in DifficultyLevel::ALL.windows(2) {
            let (lo, hi) = (pair[0].profile(), pair[1].profile());
            assert!(hi.incoming_damage > lo.incoming_damage);
            assert!(hi.opponent_damage > lo.opponent_damage);
            assert!(hi.ai_level > lo.ai_level);
        }
    }
}
