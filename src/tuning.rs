//! Game balance and playfield tunables
//!
//! Every knob the simulation reads lives here. Defaults mirror `crate::consts`;
//! a JSON document can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be a probability in [0, 1] (got {value})")]
    NotProbability { field: &'static str, value: f32 },
    #[error("speed-up multiplier must exceed 1.0 (got {0})")]
    MultiplierTooSmall(f32),
    #[error("paddle width {paddle} does not fit a canvas {canvas} wide")]
    PaddleTooWide { paddle: f32, canvas: f32 },
    #[error("brick grid needs at least one row and one column")]
    EmptyGrid,
    #[error("explosion range cannot be negative (got {0})")]
    NegativeRange(i32),
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// Tunable constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_bottom_margin: f32,
    pub paddle_key_step: f32,
    /// Launch angle at either paddle edge (degrees from vertical)
    pub paddle_max_angle_deg: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub ball_start_offset: f32,

    // === Bricks ===
    /// Bricks per grid line; also drives the derived brick width
    pub brick_row_count: usize,
    /// Number of grid lines stacked down the screen
    pub brick_column_count: usize,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,
    pub brick_height: f32,

    // === Effects ===
    pub speed_up_multiplier: f32,
    /// Chebyshev radius of an explosion, in bricks
    pub explosion_range: i32,
    pub fade_out_duration_ms: f64,
    pub split_angle_deg: f32,

    // === Grid generation ===
    pub max_split_bricks: u32,
    pub max_speed_bricks: u32,
    pub special_brick_chance: f32,
    pub split_brick_chance: f32,
    pub speed_brick_chance: f32,
    pub explosive_brick_chance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,
            paddle_key_step: PADDLE_KEY_STEP,
            paddle_max_angle_deg: PADDLE_MAX_ANGLE_DEG,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            ball_start_offset: BALL_START_OFFSET,

            brick_row_count: BRICK_ROW_COUNT,
            brick_column_count: BRICK_COLUMN_COUNT,
            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,
            brick_offset_left: BRICK_OFFSET_LEFT,
            brick_height: BRICK_HEIGHT,

            speed_up_multiplier: SPEED_UP_MULTIPLIER,
            explosion_range: EXPLOSION_RANGE,
            fade_out_duration_ms: FADE_OUT_DURATION_MS,
            split_angle_deg: SPLIT_ANGLE_DEG,

            max_split_bricks: MAX_SPLIT_BRICKS,
            max_speed_bricks: MAX_SPEED_BRICKS,
            special_brick_chance: SPECIAL_BRICK_CHANCE,
            split_brick_chance: SPLIT_BRICK_CHANCE,
            speed_brick_chance: SPEED_BRICK_CHANCE,
            explosive_brick_chance: EXPLOSIVE_BRICK_CHANCE,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load overrides from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Width of one brick, derived so a grid line spans the canvas between the side offsets
    pub fn brick_width(&self) -> f32 {
        let rows = self.brick_row_count as f32;
        (self.canvas_width - 2.0 * self.brick_offset_left - (rows - 1.0) * self.brick_padding)
            / rows
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("canvas_width", self.canvas_width as f64),
            ("canvas_height", self.canvas_height as f64),
            ("paddle_width", self.paddle_width as f64),
            ("paddle_height", self.paddle_height as f64),
            ("ball_radius", self.ball_radius as f64),
            ("ball_speed", self.ball_speed as f64),
            ("brick_height", self.brick_height as f64),
            ("fade_out_duration_ms", self.fade_out_duration_ms),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        let probabilities = [
            ("special_brick_chance", self.special_brick_chance),
            ("split_brick_chance", self.split_brick_chance),
            ("speed_brick_chance", self.speed_brick_chance),
            ("explosive_brick_chance", self.explosive_brick_chance),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::NotProbability { field, value });
            }
        }

        if !(self.speed_up_multiplier > 1.0) {
            return Err(TuningError::MultiplierTooSmall(self.speed_up_multiplier));
        }
        if self.paddle_width > self.canvas_width {
            return Err(TuningError::PaddleTooWide {
                paddle: self.paddle_width,
                canvas: self.canvas_width,
            });
        }
        if self.brick_row_count == 0 || self.brick_column_count == 0 {
            return Err(TuningError::EmptyGrid);
        }
        if self.explosion_range < 0 {
            return Err(TuningError::NegativeRange(self.explosion_range));
        }
        let brick_width = self.brick_width();
        if !(brick_width > 0.0) {
            return Err(TuningError::NotPositive {
                field: "brick_width",
                value: brick_width as f64,
            });
        }

        Ok(())
    }
}
