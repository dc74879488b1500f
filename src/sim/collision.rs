//! Axis-aligned bounding box collision
//!
//! Both the player and asteroids are squares anchored at their top-left
//! corner, so a strict AABB overlap test is all the game needs.

use glam::Vec2;

use super::state::{Asteroid, Player};

/// Whether two rectangles overlap
///
/// Strict on every edge: rectangles that only touch do not collide.
#[inline]
pub fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Check whether an asteroid overlaps the player
#[inline]
pub fn player_hits(player: &Player, asteroid: &Asteroid) -> bool {
    rects_overlap(player.pos, player.size, asteroid.pos, asteroid.size())
}

/// Index of the first asteroid overlapping the player, in iteration order
pub fn first_collision(player: &Player, asteroids: &[Asteroid]) -> Option<usize> {
    asteroids.iter().position(|a| player_hits(player, a))
}
