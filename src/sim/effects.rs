//! Brick special effects and fade-out animation
//!
//! Fades are data, not timers: a brick stores when its fade began and
//! [`advance_fades`] samples every fade against the frame clock. Replacing
//! the grid on reset therefore drops all pending fades with it.

use glam::Vec2;

use super::state::{Ball, Brick, BrickGrid, BrickKind, BrickStatus, FadeOut};
use crate::tuning::Tuning;
use crate::upward_direction;

/// Begin fading a brick out at `now_ms`
///
/// Returns false (and changes nothing) if the brick is already destroyed
/// or already fading.
pub fn start_fade(brick: &mut Brick, now_ms: f64) -> bool {
    if !brick.is_alive() || brick.is_fading() {
        return false;
    }
    brick.fade = Some(FadeOut {
        started_at_ms: now_ms,
    });
    true
}

/// Sample one brick's fade at `now_ms`
///
/// Opacity falls linearly from 1 to 0 over `duration_ms`. Once the full
/// duration has elapsed the brick is destroyed and its fade cleared.
/// Returns true when this call destroyed the brick.
pub fn advance_fade(brick: &mut Brick, now_ms: f64, duration_ms: f64) -> bool {
    let Some(fade) = brick.fade else {
        return false;
    };

    let elapsed = (now_ms - fade.started_at_ms).max(0.0);
    if elapsed >= duration_ms {
        brick.status = BrickStatus::Destroyed;
        brick.opacity = 0.0;
        brick.fade = None;
        log::trace!("Brick ({}, {}) faded out", brick.col, brick.row);
        true
    } else {
        // Never climb back up if the clock is sampled out of order
        let opacity = (1.0 - elapsed / duration_ms) as f32;
        brick.opacity = brick.opacity.min(opacity);
        false
    }
}

/// Advance every in-flight fade in the grid; returns how many bricks finished
pub fn advance_fades(grid: &mut BrickGrid, now_ms: f64, duration_ms: f64) -> usize {
    grid.iter_mut()
        .map(|brick| advance_fade(brick, now_ms, duration_ms))
        .filter(|&done| done)
        .count()
}

/// Apply a brick's special effect for a hit by `ball`
///
/// New balls from a split are pushed onto `spawned`; the caller appends
/// them to the active set once it is done iterating.
#[allow(clippy::too_many_arguments)]
pub fn apply_effect(
    kind: BrickKind,
    col: usize,
    row: usize,
    ball: &mut Ball,
    grid: &mut BrickGrid,
    tuning: &Tuning,
    now_ms: f64,
    spawned: &mut Vec<Ball>,
) {
    match kind {
        BrickKind::Normal => {}
        BrickKind::Speed => {
            speed_up(ball, tuning.speed_up_multiplier);
            log::debug!("Speed brick: ball speed now {:.2}", ball.speed());
        }
        BrickKind::Split => {
            spawned.extend(split_balls(ball, tuning.split_angle_deg));
            log::debug!("Split brick: spawned 2 balls at {:?}", ball.pos);
        }
        BrickKind::Explosive => {
            let faded = explode(grid, col, row, tuning.explosion_range, now_ms);
            log::debug!("Explosive brick at ({}, {}): {} bricks caught", col, row, faded);
        }
    }
}

/// Scale the ball's velocity, keeping its direction
pub fn speed_up(ball: &mut Ball, multiplier: f32) {
    ball.vel *= multiplier;
}

/// Two free balls at the parent's position, `angle_deg` either side of
/// straight up, each at the parent's speed
pub fn split_balls(parent: &Ball, angle_deg: f32) -> [Ball; 2] {
    let speed = parent.speed();
    let angle = angle_deg.to_radians();
    let launch = |a: f32| -> Vec2 { upward_direction(a) * speed };

    [
        Ball::free(parent.pos, launch(angle), parent.radius),
        Ball::free(parent.pos, launch(-angle), parent.radius),
    ]
}

/// Start fading every live brick within Chebyshev distance `range` of
/// `(col, row)`, the centre included. Neighbours' own effects do not fire.
/// Positions off the grid are skipped. Returns how many fades were started.
pub fn explode(grid: &mut BrickGrid, col: usize, row: usize, range: i32, now_ms: f64) -> usize {
    let range = i64::from(range);
    let (col, row) = (col as i64, row as i64);
    let mut started = 0;

    for dc in -range..=range {
        for dr in -range..=range {
            if let Some(brick) = grid.get_offset_mut(col + dc, row + dr) {
                if start_fade(brick, now_ms) {
                    started += 1;
                }
            }
        }
    }

    started
}
