//! Canvas 2D context as a drawing surface (WASM only)

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::Surface;

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f32, height: f32) {
        self.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn set_shadow(&mut self, blur: f32, color: &str) {
        self.set_shadow_blur(blur as f64);
        self.set_shadow_color(color);
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str) {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_rect(
            self,
            pos.x as f64,
            pos.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }
}
