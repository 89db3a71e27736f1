//! Burst Breakout - a single-screen ball-and-paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, brick effects, session state)
//! - `renderer`: Render pass over an abstract drawing surface
//! - `platform`: Host boundary (input events, modal dialog, frame loop driver)
//! - `audio`: Fire-and-forget sound cues
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Default tunables. Distances are pixels, speeds are pixels per frame.
pub mod consts {
    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 375.0;
    pub const CANVAS_HEIGHT: f32 = 667.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between paddle bottom and playfield bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;
    /// Distance moved per arrow key press
    pub const PADDLE_KEY_STEP: f32 = 20.0;
    /// Launch angle at the paddle edges (degrees from vertical)
    pub const PADDLE_MAX_ANGLE_DEG: f32 = 75.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 4.0;
    /// Spawn height of the primary ball, measured up from the playfield bottom
    pub const BALL_START_OFFSET: f32 = 30.0;

    /// Brick grid
    pub const BRICK_ROW_COUNT: usize = 5;
    pub const BRICK_COLUMN_COUNT: usize = 5;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;
    pub const BRICK_HEIGHT: f32 = 20.0;

    /// Brick effects
    pub const SPEED_UP_MULTIPLIER: f32 = 1.2;
    pub const EXPLOSION_RANGE: i32 = 1;
    pub const FADE_OUT_DURATION_MS: f64 = 500.0;
    /// Split balls leave at this angle either side of vertical (degrees)
    pub const SPLIT_ANGLE_DEG: f32 = 45.0;

    /// Per-session caps on special bricks
    pub const MAX_SPLIT_BRICKS: u32 = 2;
    pub const MAX_SPEED_BRICKS: u32 = 1;

    /// Brick type rolls
    pub const SPECIAL_BRICK_CHANCE: f32 = 0.3;
    pub const SPLIT_BRICK_CHANCE: f32 = 0.5;
    pub const SPEED_BRICK_CHANCE: f32 = 0.3;
    pub const EXPLOSIVE_BRICK_CHANCE: f32 = 0.3;
}

/// Unit vector `angle` radians away from straight up (clockwise positive).
///
/// Screen coordinates grow downward, so "up" has a negative y component.
#[inline]
pub fn upward_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Clamp `value` into `[min, max]`, collapsing to `min` when the range is empty
#[inline]
pub fn clamp_span(value: f32, min: f32, max: f32) -> f32 {
    if max < min { min } else { value.clamp(min, max) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upward_direction() {
        let up = upward_direction(0.0);
        assert!(up.x.abs() < 1e-6);
        assert!((up.y + 1.0).abs() < 1e-6);

        let right = upward_direction(std::f32::consts::FRAC_PI_2);
        assert!((right.x - 1.0).abs() < 1e-6);
        assert!(right.y.abs() < 1e-6);
    }

    #[test]
    fn test_clamp_span_empty_range() {
        assert_eq!(clamp_span(50.0, 0.0, 100.0), 50.0);
        assert_eq!(clamp_span(-5.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp_span(500.0, 0.0, 100.0), 100.0);
        // Paddle wider than the canvas: pin to the left edge
        assert_eq!(clamp_span(20.0, 0.0, -10.0), 0.0);
    }
}
