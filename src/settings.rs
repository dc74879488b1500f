//! Pre-game settings
//!
//! Edited in the start modal before each run and persisted in LocalStorage
//! so the next visit starts with the same field.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::storage::KeyValueStore;
use crate::sim::MovementPolicy;

/// Numeric fields exposed in the start modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    MaxAsteroids,
    AsteroidFrequency,
    StartingAsteroids,
}

impl SettingField {
    pub const ALL: [SettingField; 3] = [
        SettingField::MaxAsteroids,
        SettingField::AsteroidFrequency,
        SettingField::StartingAsteroids,
    ];

    /// Form input name / element id
    pub fn input_id(&self) -> &'static str {
        match self {
            SettingField::MaxAsteroids => "max-asteroids",
            SettingField::AsteroidFrequency => "asteroid-frequency",
            SettingField::StartingAsteroids => "starting-asteroids",
        }
    }

    /// Value substituted when the field is empty or unparsable
    pub fn default_value(&self) -> u32 {
        match self {
            SettingField::MaxAsteroids => DEFAULT_MAX_ASTEROIDS,
            SettingField::AsteroidFrequency => DEFAULT_SPAWN_INTERVAL_MS,
            SettingField::StartingAsteroids => DEFAULT_STARTING_ASTEROIDS,
        }
    }

    pub fn min_value(&self) -> u32 {
        match self {
            SettingField::MaxAsteroids => MIN_MAX_ASTEROIDS,
            SettingField::AsteroidFrequency => MIN_SPAWN_INTERVAL_MS,
            SettingField::StartingAsteroids => MIN_STARTING_ASTEROIDS,
        }
    }

    /// Coerce raw input text into a valid value for this field
    ///
    /// Empty or non-numeric text yields the default; anything below the
    /// minimum is raised to the minimum. Fractions are truncated the way
    /// a number input would report them.
    pub fn coerce(&self, raw: &str) -> u32 {
        let raw = raw.trim();
        let parsed = raw
            .parse::<u32>()
            .ok()
            .or_else(|| {
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|v| v.clamp(0.0, u32::MAX as f64) as u32)
            });
        match parsed {
            Some(v) => v.max(self.min_value()),
            None => self.default_value(),
        }
    }

    pub fn get(&self, settings: &GameSettings) -> u32 {
        match self {
            SettingField::MaxAsteroids => settings.max_asteroids,
            SettingField::AsteroidFrequency => settings.spawn_interval_ms,
            SettingField::StartingAsteroids => settings.starting_asteroids,
        }
    }

    /// Write coerced input into the settings; returns the stored value
    pub fn apply(&self, settings: &mut GameSettings, raw: &str) -> u32 {
        let value = self.coerce(raw);
        match self {
            SettingField::MaxAsteroids => settings.max_asteroids = value,
            SettingField::AsteroidFrequency => settings.spawn_interval_ms = value,
            SettingField::StartingAsteroids => settings.starting_asteroids = value,
        }
        value
    }
}

/// Game settings chosen before a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Spawner stops adding asteroids at this count
    pub max_asteroids: u32,
    /// Milliseconds between spawner ticks
    pub spawn_interval_ms: u32,
    /// Asteroids present when a run starts
    pub starting_asteroids: u32,
    /// How arrow keys move the player at the canvas edges
    pub movement: MovementPolicy,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_asteroids: DEFAULT_MAX_ASTEROIDS,
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            starting_asteroids: DEFAULT_STARTING_ASTEROIDS,
            movement: MovementPolicy::default(),
        }
    }
}

impl GameSettings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "asteroid_dodge_settings";

    /// Raise any out-of-range value to its minimum
    ///
    /// Stored settings may predate the current minimums or have been
    /// edited by hand.
    pub fn sanitized(mut self) -> Self {
        self.max_asteroids = self.max_asteroids.max(MIN_MAX_ASTEROIDS);
        self.spawn_interval_ms = self.spawn_interval_ms.max(MIN_SPAWN_INTERVAL_MS);
        self.starting_asteroids = self.starting_asteroids.max(MIN_STARTING_ASTEROIDS);
        self
    }

    /// Asteroids actually created at start (never above the maximum)
    pub fn effective_starting_asteroids(&self) -> u32 {
        self.starting_asteroids.min(self.max_asteroids)
    }

    /// Load settings from storage, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            if let Ok(settings) = serde_json::from_str::<GameSettings>(&json) {
                log::info!("Loaded settings from storage");
                return settings.sanitized();
            }
            log::info!("Stored settings unreadable, using defaults");
            return Self::default();
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if store.set(Self::STORAGE_KEY, &json) {
                    log::info!("Settings saved");
                } else {
                    log::warn!("Settings could not be written");
                }
            }
            Err(e) => log::warn!("Settings serialization failed: {}", e),
        }
    }
}
