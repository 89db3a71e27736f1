//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, host time passed in
//! - Seeded RNG only
//! - Stable iteration order (grid scan order, split balls in spawn order)
//! - No rendering or platform dependencies; sound leaves only through the
//!   [`AudioCue`](crate::audio::AudioCue) trait the host implements

pub mod effects;
pub mod geometry;
pub mod state;
pub mod tick;

pub use effects::{advance_fades, apply_effect, explode, split_balls, start_fade};
pub use geometry::{BounceAxis, Rect, circle_rect_overlap, reflect_off_paddle};
pub use state::{
    Ball, BallState, Brick, BrickGrid, BrickKind, BrickStatus, FadeOut, GamePhase, Paddle, Session,
};
pub use tick::{BallStep, Input, KeyAction, TickOutcome, apply_input, step_ball, tick};
