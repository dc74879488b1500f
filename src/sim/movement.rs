//! Keyboard movement
//!
//! One fixed step per key-down event. What happens at the canvas edge is
//! decided by the [`MovementPolicy`] chosen in the settings.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bounds, Player};
use crate::consts::PLAYER_STEP;
use crate::wrap_coord;

/// Arrow key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value; other keys are ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Offset for a single step (screen coordinates, y down)
    pub fn delta(&self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-PLAYER_STEP, 0.0),
            Direction::Right => Vec2::new(PLAYER_STEP, 0.0),
            Direction::Up => Vec2::new(0.0, -PLAYER_STEP),
            Direction::Down => Vec2::new(0.0, PLAYER_STEP),
        }
    }
}

/// Edge behaviour for player movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementPolicy {
    /// Coordinates wrap modulo the canvas size (always in `[0, extent)`)
    #[default]
    Wrap,
    /// Leaving one edge puts the player flush against the opposite edge
    Teleport,
}

impl MovementPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementPolicy::Wrap => "Wrap",
            MovementPolicy::Teleport => "Teleport",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wrap" => Some(MovementPolicy::Wrap),
            "teleport" => Some(MovementPolicy::Teleport),
            _ => None,
        }
    }

    /// New top-left position after one step in `dir`
    pub fn step(&self, player: &Player, dir: Direction, bounds: &Bounds) -> Vec2 {
        let next = player.pos + dir.delta();
        match self {
            MovementPolicy::Wrap => Vec2::new(
                wrap_coord(next.x, bounds.width),
                wrap_coord(next.y, bounds.height),
            ),
            MovementPolicy::Teleport => Vec2::new(
                teleport_axis(next.x, player.size.x, bounds.width),
                teleport_axis(next.y, player.size.y, bounds.height),
            ),
        }
    }
}

fn teleport_axis(v: f32, size: f32, extent: f32) -> f32 {
    if v < 0.0 {
        (extent - size).max(0.0)
    } else if v + size > extent {
        0.0
    } else {
        v
    }
}
