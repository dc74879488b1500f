//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Motion integrated per frame, never scaled by wall-clock time
//! - Stable iteration order (asteroids in insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod movement;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{first_collision, player_hits, rects_overlap};
pub use movement::{Direction, MovementPolicy};
pub use session::{RunResult, Session, format_duration};
pub use spawn::{SpawnTimer, advance_spawner, generate_asteroid, spawn_tick};
pub use state::{Asteroid, Bounds, GamePhase, GameState, Player};
pub use tick::{GameEvent, handle_key, record_run, resize, start_game, tick};
