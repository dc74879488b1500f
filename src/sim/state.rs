//! Game state and core simulation types
//!
//! Everything a frame reads or writes lives in [`GameState`], which the
//! host owns and passes by `&mut` into each operation.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::session::Session;
use super::spawn::SpawnTimer;
use crate::best_time::BestTime;
use crate::consts::*;
use crate::settings::GameSettings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start modal shown, no run yet
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; modal shown with restart framing
    GameOver,
}

/// Canvas extent in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Top-left corner that centres a box of `size`
    pub fn centered(&self, size: Vec2) -> Vec2 {
        (self.size() - size) / 2.0
    }
}

/// The player's square
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: &'static str,
}

impl Player {
    /// Player centred in the given bounds
    pub fn centered(bounds: &Bounds) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        Self {
            pos: bounds.centered(size),
            size,
            color: PLAYER_COLOR,
        }
    }

    /// Same player moved to `pos`
    pub fn moved_to(&self, pos: Vec2) -> Self {
        Self {
            pos,
            ..self.clone()
        }
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
}

impl Asteroid {
    pub fn size(&self) -> Vec2 {
        Vec2::splat(ASTEROID_SIZE)
    }

    /// Advance one frame and wrap to the far side once past the margin
    pub fn advance(&mut self, bounds: &Bounds) {
        self.pos += self.vel;
        self.pos.x = wrap_past_margin(self.pos.x, bounds.width);
        self.pos.y = wrap_past_margin(self.pos.y, bounds.height);
    }
}

/// Teleport a coordinate that has drifted more than [`EDGE_MARGIN`] outside
/// `[0, extent]` to just outside the opposite edge
fn wrap_past_margin(v: f32, extent: f32) -> f32 {
    if v > extent + EDGE_MARGIN {
        -EDGE_MARGIN
    } else if v < -EDGE_MARGIN {
        extent + EDGE_MARGIN
    } else {
        v
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Canvas extent
    pub bounds: Bounds,
    /// The single player
    pub player: Player,
    /// Live asteroids (never removed during a run)
    pub asteroids: Vec<Asteroid>,
    /// Pre-game settings, bound to the modal inputs
    pub settings: GameSettings,
    /// Run timing and best time
    pub session: Session,
    /// Spawner clock for hosts without their own interval timer
    pub spawn_timer: SpawnTimer,
    /// Frames simulated in the current run
    pub frame: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create an idle game with the given seed
    pub fn new(seed: u64, bounds: Bounds, settings: GameSettings, best: BestTime) -> Self {
        let spawn_timer = SpawnTimer::new(settings.spawn_interval_ms);
        Self {
            seed,
            phase: GamePhase::Idle,
            bounds,
            player: Player::centered(&bounds),
            asteroids: Vec::new(),
            settings,
            session: Session::new(best),
            spawn_timer,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// The start/config modal is visible whenever no run is in progress
    pub fn show_start_modal(&self) -> bool {
        !self.is_running()
    }
}
