//! Drawing primitives shared by both games

use macroquad::color::Color;
use macroquad::math::Vec2 as MqVec2;
use macroquad::shapes::{draw_rectangle, draw_rectangle_lines, draw_triangle};
use macroquad::text::{draw_text, measure_text};

use crate::sim::Tint;

pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const GRAY: Color = Color::new(0.5, 0.5, 0.5, 1.0);

/// Base RGB of a tint
pub fn tint_rgb(tint: Tint) -> [u8; 3] {
    match tint {
        Tint::Yellow => [255, 255, 0],
        Tint::Orange => [255, 165, 0],
        Tint::Red => [255, 60, 60],
        Tint::Purple => [180, 80, 255],
        Tint::Pink => [255, 105, 180],
        Tint::Cyan => [0, 255, 255],
        Tint::Blue => [80, 140, 255],
        Tint::Green => [0, 255, 100],
    }
}

/// Tint with alpha in 0..=1
pub fn tint_color(tint: Tint, alpha: f32) -> Color {
    let [r, g, b] = tint_rgb(tint);
    rgba(r, g, b, alpha)
}

pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Color {
    Color::from_rgba(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Same colour, different alpha
pub fn faded(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, alpha.clamp(0.0, 1.0))
}

/// Health bar colour: green above 60%, yellow above 30%, red below
pub fn health_color(fraction: f32) -> Color {
    if fraction > 0.6 {
        rgba(0, 220, 0, 1.0)
    } else if fraction > 0.3 {
        rgba(230, 220, 0, 1.0)
    } else {
        rgba(230, 40, 40, 1.0)
    }
}

/// glam -> macroquad vector
pub fn mq(v: glam::Vec2) -> MqVec2 {
    MqVec2::new(v.x, v.y)
}

/// Filled health bar with a dark backing and a thin outline
pub fn health_bar(x: f32, y: f32, w: f32, h: f32, fraction: f32) {
    let fraction = fraction.clamp(0.0, 1.0);
    draw_rectangle(x, y, w, h, rgba(60, 0, 0, 0.8));
    draw_rectangle(x, y, w * fraction, h, health_color(fraction));
    draw_rectangle_lines(x, y, w, h, 1.0, faded(WHITE, 0.6));
}

/// Isosceles triangle pointing along `angle` (radians, 0 = right)
pub fn arrow(center: glam::Vec2, angle: f32, length: f32, width: f32, color: Color) {
    let forward = crate::direction(angle);
    let side = glam::Vec2::new(-forward.y, forward.x);
    let nose = center + forward * length;
    let tail = center - forward * length * 0.6;
    draw_triangle(mq(nose), mq(tail + side * width), mq(tail - side * width), color);
}

/// Translucent box behind HUD text
pub fn panel(x: f32, y: f32, w: f32, h: f32) {
    draw_rectangle(x, y, w, h, rgba(0, 0, 0, 0.6));
    draw_rectangle_lines(x, y, w, h, 1.0, rgba(90, 90, 140, 0.8));
}

/// Dim the whole screen under an overlay
pub fn shade(w: f32, h: f32, alpha: f32) {
    draw_rectangle(0.0, 0.0, w, h, faded(BLACK, alpha));
}

/// Text whose horizontal centre is `cx`; `y` is the baseline
pub fn centered_text(text: &str, cx: f32, y: f32, size: f32, color: Color) {
    let dims = measure_text(text, None, size as u16, 1.0);
    draw_text(text, cx - dims.width / 2.0, y, size, color);
}

/// Brightness of snake segment `index` (head = 0), fading towards the tail
pub fn segment_shade(index: usize, len: usize) -> f32 {
    if len <= 1 {
        return 1.0;
    }
    1.0 - 0.6 * (index as f32 / (len - 1) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_color_bands() {
        assert_eq!(health_color(1.0), rgba(0, 220, 0, 1.0));
        assert_eq!(health_color(0.5), rgba(230, 220, 0, 1.0));
        assert_eq!(health_color(0.1), rgba(230, 40, 40, 1.0));
    }

    #[test]
    fn test_segment_shade_fades_to_tail() {
        assert_eq!(segment_shade(0, 1), 1.0);
        assert_eq!(segment_shade(0, 5), 1.0);
        assert!((segment_shade(4, 5) - 0.4).abs() < 1e-6);
        assert!(segment_shade(2, 5) > segment_shade(3, 5));
    }

    #[test]
    fn test_tint_alpha_clamped() {
        assert_eq!(tint_color(Tint::Cyan, 2.0).a, 1.0);
        assert_eq!(tint_color(Tint::Cyan, -1.0).a, 0.0);
    }
}
