//! Keybinding system for remappable controls
//!
//! Lets players customize the fight controls and persists their preferences
//! to a RON file next to the executable.
//!
//! `PlayerInputPlugin` only reads bindings; `save`, `reset_to_defaults`, and
//! the per-action labels are the seam for a graphical shell's rebinding
//! screen, which owns writing them back.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// All possible actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    // Movement
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Punches
    PunchJab,
    PunchCross,
    PunchHook,
    PunchUppercut,

    // Match
    PausePlay,
    QuitMatch,
}

impl GameAction {
    pub fn description(&self) -> &'static str {
        match self {
            GameAction::MoveUp => "Move Up",
            GameAction::MoveDown => "Move Down",
            GameAction::MoveLeft => "Move Left",
            GameAction::MoveRight => "Move Right",
            GameAction::PunchJab => "Jab",
            GameAction::PunchCross => "Cross",
            GameAction::PunchHook => "Hook",
            GameAction::PunchUppercut => "Uppercut",
            GameAction::PausePlay => "Pause / Play",
            GameAction::QuitMatch => "Quit Match",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            GameAction::MoveUp
            | GameAction::MoveDown
            | GameAction::MoveLeft
            | GameAction::MoveRight => "Movement",
            GameAction::PunchJab
            | GameAction::PunchCross
            | GameAction::PunchHook
            | GameAction::PunchUppercut => "Punches",
            GameAction::PausePlay | GameAction::QuitMatch => "Match",
        }
    }

    pub fn all() -> Vec<GameAction> {
        vec![
            GameAction::MoveUp,
            GameAction::MoveDown,
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::PunchJab,
            GameAction::PunchCross,
            GameAction::PunchHook,
            GameAction::PunchUppercut,
            GameAction::PausePlay,
            GameAction::QuitMatch,
        ]
    }
}

/// Serializable wrapper for KeyCode (stores as string)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SerializableKeyCode(String);

impl From<KeyCode> for SerializableKeyCode {
    fn from(key: KeyCode) -> Self {
        Self(format!("{:?}", key))
    }
}

impl From<SerializableKeyCode> for KeyCode {
    fn from(sk: SerializableKeyCode) -> Self {
        match sk.0.as_str() {
            "Escape" => KeyCode::Escape,
            "Enter" => KeyCode::Enter,
            "Space" => KeyCode::Space,
            "Tab" => KeyCode::Tab,
            "KeyA" => KeyCode::KeyA,
            "KeyD" => KeyCode::KeyD,
            "KeyE" => KeyCode::KeyE,
            "KeyQ" => KeyCode::KeyQ,
            "KeyR" => KeyCode::KeyR,
            "KeyS" => KeyCode::KeyS,
            "KeyW" => KeyCode::KeyW,
            "KeyX" => KeyCode::KeyX,
            "KeyZ" => KeyCode::KeyZ,
            "Digit1" => KeyCode::Digit1,
            "Digit2" => KeyCode::Digit2,
            "Digit3" => KeyCode::Digit3,
            "Digit4" => KeyCode::Digit4,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            _ => KeyCode::Escape, // Default fallback
        }
    }
}

/// Key binding with primary and optional secondary key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyBinding {
    #[serde(with = "keycode_serde")]
    pub primary: KeyCode,
    #[serde(with = "option_keycode_serde")]
    pub secondary: Option<KeyCode>,
}

mod keycode_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(key: &KeyCode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let sk: SerializableKeyCode = (*key).into();
        sk.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<KeyCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let sk = SerializableKeyCode::deserialize(deserializer)?;
        Ok(sk.into())
    }
}

mod option_keycode_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(key: &Option<KeyCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match key {
            Some(k) => {
                let sk: SerializableKeyCode = (*k).into();
                serializer.serialize_some(&sk)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<KeyCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt_sk: Option<SerializableKeyCode> = Option::deserialize(deserializer)?;
        Ok(opt_sk.map(|sk| sk.into()))
    }
}

impl KeyBinding {
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn matches(&self, key: KeyCode) -> bool {
        self.primary == key || self.secondary == Some(key)
    }
}

/// Complete keybindings configuration
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Keybindings {
    bindings: HashMap<GameAction, KeyBinding>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    /// Create default keybindings
    pub fn create_defaults() -> Self {
        let mut bindings = HashMap::new();

        // Movement on the arrows
        bindings.insert(GameAction::MoveUp, KeyBinding::new(KeyCode::ArrowUp));
        bindings.insert(GameAction::MoveDown, KeyBinding::new(KeyCode::ArrowDown));
        bindings.insert(GameAction::MoveLeft, KeyBinding::new(KeyCode::ArrowLeft));
        bindings.insert(GameAction::MoveRight, KeyBinding::new(KeyCode::ArrowRight));

        // Punches on QWER, in profile-table order
        bindings.insert(GameAction::PunchJab, KeyBinding::new(KeyCode::KeyQ));
        bindings.insert(GameAction::PunchCross, KeyBinding::new(KeyCode::KeyW));
        bindings.insert(GameAction::PunchHook, KeyBinding::new(KeyCode::KeyE));
        bindings.insert(GameAction::PunchUppercut, KeyBinding::new(KeyCode::KeyR));

        // Match control
        bindings.insert(GameAction::PausePlay, KeyBinding::new(KeyCode::Space));
        bindings.insert(GameAction::QuitMatch, KeyBinding::new(KeyCode::Escape));

        Self { bindings }
    }

    /// Path of the persisted bindings file
    fn bindings_path() -> PathBuf {
        PathBuf::from("controls.ron")
    }

    /// Load bindings from file, or return defaults if the file is missing
    /// or unreadable.
    pub fn load() -> Self {
        let path = Self::bindings_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => match ron::from_str(&contents) {
                    Ok(bindings) => {
                        info!("Loaded keybindings from {:?}", path);
                        bindings
                    }
                    Err(e) => {
                        warn!("Failed to parse keybindings file: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    warn!("Failed to read keybindings file: {}", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Save bindings to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::bindings_path();
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(&path, contents)?;
        info!("Saved keybindings to {:?}", path);
        Ok(())
    }

    /// Get the binding for an action
    pub fn get(&self, action: GameAction) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Set a new binding for an action
    pub fn set(&mut self, action: GameAction, binding: KeyBinding) {
        self.bindings.insert(action, binding);
    }

    /// Reset all bindings to defaults
    pub fn reset_to_defaults(&mut self) {
        *self = Self::create_defaults();
    }

    /// Check if an action is currently pressed
    pub fn action_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        if let Some(binding) = self.get(action) {
            keyboard.pressed(binding.primary)
                || binding.secondary.map_or(false, |key| keyboard.pressed(key))
        } else {
            false
        }
    }

    /// Check if an action was just pressed this frame
    pub fn action_just_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        if let Some(binding) = self.get(action) {
            keyboard.just_pressed(binding.primary)
                || binding
                    .secondary
                    .map_or(false, |key| keyboard.just_pressed(key))
        } else {
            false
        }
    }

    /// Check if a key is already bound to any action (for conflict detection)
    pub fn is_key_bound(
        &self,
        key: KeyCode,
        exclude_action: Option<GameAction>,
    ) -> Option<GameAction> {
        self.bindings
            .iter()
            .find(|(action, binding)| {
                if let Some(excluded) = exclude_action {
                    if **action == excluded {
                        return false;
                    }
                }
                binding.matches(key)
            })
            .map(|(action, _)| *action)
    }
}
