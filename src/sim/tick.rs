//! Per-frame simulation step
//!
//! One call to [`tick`] advances fades, every split ball and the primary
//! ball by one frame. Velocities are per-frame displacements.

use super::effects::{advance_fades, apply_effect, start_fade};
use super::geometry::{circle_rect_overlap, reflect_off_paddle};
use super::state::{Ball, BrickGrid, GamePhase, Paddle, Session};
use crate::audio::{AudioCue, SoundEffect};
use crate::tuning::Tuning;

/// Logical key actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    MoveLeft,
    MoveRight,
    /// Toggle pause while running
    Pause,
}

/// Player input, applied synchronously between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Primary pointer pressed (tap / click)
    PointerDown,
    /// Pointer moved to an absolute horizontal position
    PointerMove { x: f32 },
    Key(KeyAction),
}

/// Fate of a ball after one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallStep {
    /// Still in play
    InPlay,
    /// Dropped past the playfield bottom
    Fell,
}

/// How the session stands after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Won,
    Lost,
}

/// Apply one input event to the session
pub fn apply_input(session: &mut Session, input: Input) {
    match input {
        Input::PointerDown => {
            let can_launch = !session.phase.is_terminal() && session.phase != GamePhase::Paused;
            if session.ball.is_stuck() && can_launch {
                session.ball.launch(&session.tuning);
                if session.phase == GamePhase::NotStarted {
                    session.phase = GamePhase::Running;
                }
                log::info!("Ball launched");
            }
        }
        Input::PointerMove { x } => session.paddle.center_on(x),
        Input::Key(KeyAction::MoveLeft) => session.paddle.nudge(-session.tuning.paddle_key_step),
        Input::Key(KeyAction::MoveRight) => session.paddle.nudge(session.tuning.paddle_key_step),
        Input::Key(KeyAction::Pause) => match session.phase {
            GamePhase::Running => {
                session.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                session.phase = GamePhase::Running;
                log::info!("Resumed");
            }
            _ => {}
        },
    }
}

/// Advance the session by one frame at host time `now_ms`
pub fn tick(session: &mut Session, now_ms: f64, audio: &mut dyn AudioCue) -> TickOutcome {
    match session.phase {
        GamePhase::Won => return TickOutcome::Won,
        GamePhase::Lost => return TickOutcome::Lost,
        _ => {}
    }

    advance_fades(
        &mut session.bricks,
        now_ms,
        session.tuning.fade_out_duration_ms,
    );

    match session.phase {
        GamePhase::NotStarted => {
            session.ball.follow_paddle(&session.paddle);
            TickOutcome::Continue
        }
        GamePhase::Paused => TickOutcome::Continue,
        GamePhase::Running => {
            session.frame += 1;
            step_running(session, now_ms, audio)
        }
        GamePhase::Won => TickOutcome::Won,
        GamePhase::Lost => TickOutcome::Lost,
    }
}

fn step_running(session: &mut Session, now_ms: f64, audio: &mut dyn AudioCue) -> TickOutcome {
    // Checked before anything moves; a hit brick only counts once its fade completes
    if session.bricks.all_destroyed() {
        session.phase = GamePhase::Won;
        log::info!("All bricks cleared after {} frames", session.frame);
        return TickOutcome::Won;
    }

    let Session {
        tuning,
        phase,
        paddle,
        ball,
        split_balls,
        bricks,
        ..
    } = session;

    // Balls spawned by split bricks join the set after this frame's sweep
    let mut spawned: Vec<Ball> = Vec::new();

    let before = split_balls.len();
    split_balls.retain_mut(|split| {
        step_ball(split, paddle, bricks, tuning, now_ms, audio, &mut spawned) == BallStep::InPlay
    });
    if split_balls.len() < before {
        log::debug!("{} split ball(s) lost", before - split_balls.len());
    }

    if ball.is_stuck() {
        ball.follow_paddle(paddle);
    } else if step_ball(ball, paddle, bricks, tuning, now_ms, audio, &mut spawned) == BallStep::Fell
    {
        if split_balls.is_empty() && spawned.is_empty() {
            *phase = GamePhase::Lost;
            log::info!("Ball lost - game over");
            return TickOutcome::Lost;
        }
        ball.stick_to(paddle, tuning);
        log::info!("Primary ball lost, {} split ball(s) still in play", split_balls.len());
    }

    split_balls.append(&mut spawned);
    TickOutcome::Continue
}

/// Advance one ball by a frame: walls, paddle, at most one brick, then integrate
#[allow(clippy::too_many_arguments)]
pub fn step_ball(
    ball: &mut Ball,
    paddle: &Paddle,
    bricks: &mut BrickGrid,
    tuning: &Tuning,
    now_ms: f64,
    audio: &mut dyn AudioCue,
    spawned: &mut Vec<Ball>,
) -> BallStep {
    let next = ball.pos + ball.vel;
    let r = ball.radius;

    // Side walls: flip only, no positional correction
    if next.x + r > tuning.canvas_width || next.x - r < 0.0 {
        ball.vel.x = -ball.vel.x;
    }

    if next.y - r < 0.0 {
        ball.vel.y = -ball.vel.y;
    } else if next.y + r > paddle.pos.y {
        let over_paddle =
            ball.pos.x >= paddle.pos.x - r && ball.pos.x <= paddle.pos.x + paddle.width + r;
        let was_above = ball.pos.y < paddle.pos.y;

        if over_paddle && was_above {
            ball.vel = reflect_off_paddle(
                ball.pos.x,
                paddle.pos.x,
                paddle.width,
                ball.speed(),
                tuning.paddle_max_angle_deg,
            );
            ball.pos.y = paddle.pos.y - r;
        } else if next.y + r > tuning.canvas_height {
            return BallStep::Fell;
        }
    }

    hit_first_brick(ball, bricks, tuning, now_ms, audio, spawned);

    ball.pos += ball.vel;
    BallStep::InPlay
}

/// Resolve a collision with the first collidable brick the ball overlaps
///
/// Scans outer index then inner index and stops at the first hit.
/// Returns the grid position of the brick hit, if any.
pub fn hit_first_brick(
    ball: &mut Ball,
    bricks: &mut BrickGrid,
    tuning: &Tuning,
    now_ms: f64,
    audio: &mut dyn AudioCue,
    spawned: &mut Vec<Ball>,
) -> Option<(usize, usize)> {
    let (col, row, kind, axis) = bricks.iter().find_map(|brick| {
        if !brick.is_collidable() {
            return None;
        }
        circle_rect_overlap(ball.pos, ball.radius, &bricks.brick_rect(brick))
            .map(|hit| (brick.col, brick.row, brick.kind, hit.bounce_axis()))
    })?;

    audio.play(SoundEffect::BrickHit);
    ball.vel = axis.apply(ball.vel);
    log::debug!("Brick ({}, {}) hit: {:?}, bounce {:?}", col, row, kind, axis);

    apply_effect(kind, col, row, ball, bricks, tuning, now_ms, spawned);
    if let Some(brick) = bricks.get_mut(col, row) {
        start_fade(brick, now_ms);
    }

    Some((col, row))
}
