//! Asteroid Dodge - survive the drifting asteroid field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game loop)
//! - `renderer`: Drawing surface abstraction and frame composition
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Pre-game configuration with input coercion
//! - `best_time`: Persisted best survival time
//! - `shell`: View model for the start/game-over modal

pub mod best_time;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod shell;
pub mod sim;

pub use best_time::BestTime;
pub use settings::{GameSettings, SettingField};
pub use sim::MovementPolicy;

/// Game configuration constants
pub mod consts {
    /// Player square edge length (pixels)
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Player fill colour
    pub const PLAYER_COLOR: &str = "red";
    /// Distance moved per arrow key press (pixels)
    pub const PLAYER_STEP: f32 = 10.0;

    /// Asteroid square edge length (pixels)
    pub const ASTEROID_SIZE: f32 = 20.0;
    /// How far outside the canvas asteroids spawn and wrap
    pub const EDGE_MARGIN: f32 = 20.0;
    /// Maximum per-axis asteroid speed (pixels per frame)
    pub const ASTEROID_MAX_SPEED: f32 = 2.5;

    /// Settings defaults and lower bounds
    pub const DEFAULT_MAX_ASTEROIDS: u32 = 10;
    pub const MIN_MAX_ASTEROIDS: u32 = 5;
    pub const DEFAULT_SPAWN_INTERVAL_MS: u32 = 5000;
    pub const MIN_SPAWN_INTERVAL_MS: u32 = 1000;
    pub const DEFAULT_STARTING_ASTEROIDS: u32 = 5;
    pub const MIN_STARTING_ASTEROIDS: u32 = 1;
}

/// Sign-correct modulo: wraps `value` into `[0, extent)`
///
/// Returns 0 for a non-positive extent (no canvas yet).
#[inline]
pub fn wrap_coord(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}
