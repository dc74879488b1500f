//! Frame rendering
//!
//! The simulation never draws. [`draw_frame`] composes a frame onto any
//! [`Surface`]; on the web that is the canvas 2D context.

pub mod colors;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::consts::ASTEROID_MAX_SPEED;
use crate::sim::GameState;

pub use colors::speed_color;

/// Soft drop shadow under every filled shape
pub const SHADOW_BLUR: f32 = 5.0;
pub const SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.5)";

/// Minimal 2D drawing target
pub trait Surface {
    /// Clear the whole drawable area
    fn clear(&mut self, width: f32, height: f32);
    fn set_shadow(&mut self, blur: f32, color: &str);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str);
}

/// Draw one frame: clear, asteroids, then the player on top
pub fn draw_frame(state: &GameState, surface: &mut dyn Surface) {
    surface.clear(state.bounds.width, state.bounds.height);
    surface.set_shadow(SHADOW_BLUR, SHADOW_COLOR);

    // Top speed is reached diagonally
    let max_speed = ASTEROID_MAX_SPEED * std::f32::consts::SQRT_2;
    for asteroid in &state.asteroids {
        let color = speed_color(asteroid.vel.length(), max_speed);
        surface.fill_rect(asteroid.pos, asteroid.size(), &color);
    }

    surface.fill_rect(state.player.pos, state.player.size, state.player.color);
}
