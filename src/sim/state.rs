//! Game state and core simulation types
//!
//! A [`Session`] owns every mutable entity of one round: paddle, primary
//! ball, split balls and the brick grid.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::clamp_span;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Primary ball stuck to the paddle, waiting for the first tap
    NotStarted,
    /// Active gameplay
    Running,
    /// Balls frozen until unpaused
    Paused,
    /// Every brick destroyed
    Won,
    /// Primary ball lost with no split balls left
    Lost,
}

impl GamePhase {
    /// Won or Lost: the frame loop stops until a reset
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Ball state - riding the paddle or free-moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Bound to the paddle center until launched (primary ball only)
    Stuck,
    Free,
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per frame
    pub vel: Vec2,
    pub radius: f32,
    pub state: BallState,
}

impl Ball {
    /// Primary ball at its spawn point, stuck and primed with the launch velocity
    pub fn primary(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.canvas_width / 2.0,
                tuning.canvas_height - tuning.ball_start_offset,
            ),
            vel: launch_velocity(tuning),
            radius: tuning.ball_radius,
            state: BallState::Stuck,
        }
    }

    /// Free ball with the given velocity (used for split balls)
    pub fn free(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            state: BallState::Free,
        }
    }

    #[inline]
    pub fn is_stuck(&self) -> bool {
        self.state == BallState::Stuck
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Rest the ball on top of the paddle center
    pub fn follow_paddle(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.center_x(), paddle.pos.y - self.radius);
    }

    /// Re-bind to the paddle after falling off the bottom
    pub fn stick_to(&mut self, paddle: &Paddle, tuning: &Tuning) {
        self.state = BallState::Stuck;
        self.vel = launch_velocity(tuning);
        self.follow_paddle(paddle);
    }

    /// Release from the paddle
    pub fn launch(&mut self, tuning: &Tuning) {
        if self.is_stuck() {
            self.vel = launch_velocity(tuning);
            self.state = BallState::Free;
        }
    }
}

/// Up and to the right at `ball_speed` per axis
fn launch_velocity(tuning: &Tuning) -> Vec2 {
    Vec2::new(tuning.ball_speed, -tuning.ball_speed)
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Right-most x the paddle's left edge may reach
    max_x: f32,
}

impl Paddle {
    /// Centered paddle resting `paddle_bottom_margin` above the playfield bottom
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.canvas_width / 2.0 - tuning.paddle_width / 2.0,
                tuning.canvas_height - tuning.paddle_height - tuning.paddle_bottom_margin,
            ),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            max_x: tuning.canvas_width - tuning.paddle_width,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Move the left edge to `x`, clamped to the playfield
    pub fn set_x(&mut self, x: f32) {
        self.pos.x = clamp_span(x, 0.0, self.max_x);
    }

    /// Center the paddle on `x`, clamped to the playfield
    pub fn center_on(&mut self, x: f32) {
        self.set_x(x - self.width / 2.0);
    }

    /// Shift by `dx`, clamped to the playfield
    pub fn nudge(&mut self, dx: f32) {
        self.set_x(self.pos.x + dx);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }
}

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Normal,
    /// Speeds up the ball that hits it
    Speed,
    /// Spawns two extra balls
    Split,
    /// Fades out its neighbours
    Explosive,
}

/// Brick liveness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Alive,
    Destroyed,
}

/// An in-progress fade-out, stamped with the time it began
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeOut {
    pub started_at_ms: f64,
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Outer grid index
    pub col: usize,
    /// Inner grid index
    pub row: usize,
    /// Top-left corner in pixels
    pub pos: Vec2,
    pub kind: BrickKind,
    pub status: BrickStatus,
    /// 1.0 solid, 0.0 gone
    pub opacity: f32,
    pub fade: Option<FadeOut>,
}

impl Brick {
    pub fn new(col: usize, row: usize, pos: Vec2, kind: BrickKind) -> Self {
        Self {
            col,
            row,
            pos,
            kind,
            status: BrickStatus::Alive,
            opacity: 1.0,
            fade: None,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    #[inline]
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Only fully opaque, live bricks that have not started fading can be hit
    #[inline]
    pub fn is_collidable(&self) -> bool {
        self.is_alive() && self.opacity == 1.0 && !self.is_fading()
    }

    /// Rendered while alive or still fading out
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.is_alive() || self.opacity > 0.0
    }
}

/// Fixed-size brick grid, stored outer-index-major
///
/// The outer index (`col`) selects the pixel *y* band and the inner index
/// (`row`) selects the pixel *x* position. That swap is deliberate level
/// layout behavior and is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    pub brick_size: Vec2,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Roll a fresh grid, honouring the per-session special brick caps
    pub fn generate(tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let columns = tuning.brick_column_count;
        let rows = tuning.brick_row_count;
        let brick_size = Vec2::new(tuning.brick_width(), tuning.brick_height);

        let mut split_count = 0u32;
        let mut speed_count = 0u32;
        let mut bricks = Vec::with_capacity(columns * rows);

        for col in 0..columns {
            for row in 0..rows {
                let kind = roll_brick_kind(tuning, rng, &mut split_count, &mut speed_count);
                let pos = Vec2::new(
                    row as f32 * (brick_size.x + tuning.brick_padding) + tuning.brick_offset_left,
                    col as f32 * (brick_size.y + tuning.brick_padding) + tuning.brick_offset_top,
                );
                bricks.push(Brick::new(col, row, pos, kind));
            }
        }

        log::debug!(
            "Generated {}x{} brick grid ({} split, {} speed)",
            columns,
            rows,
            split_count,
            speed_count
        );

        Self {
            columns,
            rows,
            brick_size,
            bricks,
        }
    }

    /// Grid with every brick set to `kind` (handy for deterministic setups)
    pub fn uniform(tuning: &Tuning, kind: BrickKind) -> Self {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut grid = Self::generate(tuning, &mut rng);
        for brick in &mut grid.bricks {
            brick.kind = kind;
        }
        grid
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        col * self.rows + row
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Brick> {
        if col < self.columns && row < self.rows {
            self.bricks.get(self.index(col, row))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut Brick> {
        if col < self.columns && row < self.rows {
            let idx = self.index(col, row);
            self.bricks.get_mut(idx)
        } else {
            None
        }
    }

    /// Signed lookup; anything off the grid is `None`
    pub fn get_offset_mut(&mut self, col: i64, row: i64) -> Option<&mut Brick> {
        let col = usize::try_from(col).ok()?;
        let row = usize::try_from(row).ok()?;
        self.get_mut(col, row)
    }

    /// Bricks in scan order: outer index first, then inner
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn brick_rect(&self, brick: &Brick) -> Rect {
        Rect::new(brick.pos, self.brick_size)
    }

    /// Bricks still standing (including ones mid-fade)
    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_alive())
    }

    pub fn count_kind(&self, kind: BrickKind) -> usize {
        self.bricks.iter().filter(|b| b.kind == kind).count()
    }
}

/// Decide a brick's type. Roughly 30% of bricks are special; split and
/// speed bricks stop appearing once their caps are reached.
fn roll_brick_kind(
    tuning: &Tuning,
    rng: &mut Pcg32,
    split_count: &mut u32,
    speed_count: &mut u32,
) -> BrickKind {
    if rng.random::<f32>() >= tuning.special_brick_chance {
        return BrickKind::Normal;
    }

    if *split_count < tuning.max_split_bricks && rng.random::<f32>() < tuning.split_brick_chance {
        *split_count += 1;
        BrickKind::Split
    } else if *speed_count < tuning.max_speed_bricks
        && rng.random::<f32>() < tuning.speed_brick_chance
    {
        *speed_count += 1;
        BrickKind::Speed
    } else if rng.random::<f32>() < tuning.explosive_brick_chance {
        BrickKind::Explosive
    } else {
        BrickKind::Normal
    }
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct Session {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub paddle: Paddle,
    /// The primary ball; never removed, only re-stuck
    pub ball: Ball,
    pub split_balls: Vec<Ball>,
    pub bricks: BrickGrid,
    /// Frames stepped since the last reset
    pub frame: u64,
    rng: Pcg32,
}

impl Session {
    /// Create a new session with the given seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bricks = BrickGrid::generate(&tuning, &mut rng);
        let paddle = Paddle::new(&tuning);
        let mut ball = Ball::primary(&tuning);
        ball.follow_paddle(&paddle);

        log::info!("Session created with seed {}", seed);

        Self {
            tuning,
            phase: GamePhase::NotStarted,
            paddle,
            ball,
            split_balls: Vec::new(),
            bricks,
            frame: 0,
            rng,
        }
    }

    /// Rebuild balls, paddle and bricks in place and wait for a new launch
    ///
    /// Discarding the old grid also discards every in-flight fade.
    pub fn reset(&mut self) {
        self.split_balls.clear();
        self.paddle = Paddle::new(&self.tuning);
        self.ball = Ball::primary(&self.tuning);
        self.ball.follow_paddle(&self.paddle);
        self.bricks = BrickGrid::generate(&self.tuning, &mut self.rng);
        self.phase = GamePhase::NotStarted;
        self.frame = 0;
        log::info!("Session reset");
    }

    /// Every ball in play, primary first
    pub fn balls(&self) -> impl Iterator<Item = &Ball> {
        std::iter::once(&self.ball).chain(self.split_balls.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_stuck() {
        let session = Session::new(Tuning::default(), 7);
        assert_eq!(session.phase, GamePhase::NotStarted);
        assert!(session.ball.is_stuck());
        assert!(session.split_balls.is_empty());
        assert_eq!(session.ball.pos.x, session.paddle.center_x());
        assert_eq!(session.ball.pos.y, session.paddle.pos.y - session.ball.radius);
    }

    #[test]
    fn test_paddle_placement() {
        let tuning = Tuning::default();
        let paddle = Paddle::new(&tuning);
        assert_eq!(paddle.center_x(), tuning.canvas_width / 2.0);
        assert_eq!(paddle.pos.y, tuning.canvas_height - 20.0 - 10.0);
    }

    #[test]
    fn test_paddle_clamps() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);

        paddle.center_on(-500.0);
        assert_eq!(paddle.pos.x, 0.0);

        paddle.center_on(10_000.0);
        assert_eq!(paddle.pos.x, tuning.canvas_width - tuning.paddle_width);

        paddle.nudge(20.0);
        assert_eq!(paddle.pos.x, tuning.canvas_width - tuning.paddle_width);

        paddle.set_x(5.0);
        paddle.nudge(-20.0);
        assert_eq!(paddle.pos.x, 0.0);
    }

    #[test]
    fn test_grid_layout_swaps_axes() {
        let tuning = Tuning::default();
        let grid = BrickGrid::uniform(&tuning, BrickKind::Normal);
        let w = tuning.brick_width();

        let brick = grid.get(2, 3).unwrap();
        assert_eq!(brick.col, 2);
        assert_eq!(brick.row, 3);
        // Inner index drives x, outer index drives y
        assert!((brick.pos.x - (3.0 * (w + 10.0) + 30.0)).abs() < 1e-4);
        assert!((brick.pos.y - (2.0 * (20.0 + 10.0) + 30.0)).abs() < 1e-4);
    }

    #[test]
    fn test_grid_bounds() {
        let mut grid = BrickGrid::uniform(&Tuning::default(), BrickKind::Normal);
        assert!(grid.get(5, 0).is_none());
        assert!(grid.get(0, 5).is_none());
        assert!(grid.get_offset_mut(-1, 0).is_none());
        assert!(grid.get_offset_mut(0, -1).is_none());
        assert!(grid.get_offset_mut(4, 4).is_some());
    }

    #[test]
    fn test_generated_grid_respects_caps() {
        let tuning = Tuning::default();
        for seed in 0..200 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let grid = BrickGrid::generate(&tuning, &mut rng);
            assert!(grid.count_kind(BrickKind::Split) <= 2);
            assert!(grid.count_kind(BrickKind::Speed) <= 1);
            assert_eq!(grid.alive_count(), 25);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Session::new(Tuning::default(), 42);
        let b = Session::new(Tuning::default(), 42);
        assert_eq!(a.bricks, b.bricks);
    }

    #[test]
    fn test_brick_collidable_rules() {
        let mut brick = Brick::new(0, 0, Vec2::ZERO, BrickKind::Normal);
        assert!(brick.is_collidable());

        brick.opacity = 0.4;
        assert!(!brick.is_collidable());
        assert!(brick.is_visible());

        brick.opacity = 1.0;
        brick.fade = Some(FadeOut { started_at_ms: 0.0 });
        assert!(!brick.is_collidable());

        brick.status = BrickStatus::Destroyed;
        brick.opacity = 0.0;
        assert!(!brick.is_visible());
    }

    #[test]
    fn test_reset_restores_round() {
        let mut session = Session::new(Tuning::default(), 3);
        session.phase = GamePhase::Lost;
        session.ball.launch(&session.tuning);
        session.ball.pos = Vec2::new(12.0, 700.0);
        session.paddle.set_x(0.0);
        session
            .split_balls
            .push(Ball::free(Vec2::new(50.0, 50.0), Vec2::new(1.0, -1.0), 10.0));
        for brick in session.bricks.iter_mut() {
            brick.status = BrickStatus::Destroyed;
            brick.opacity = 0.0;
        }

        session.reset();

        assert_eq!(session.phase, GamePhase::NotStarted);
        assert!(session.ball.is_stuck());
        assert!(session.split_balls.is_empty());
        assert_eq!(session.paddle.center_x(), session.tuning.canvas_width / 2.0);
        assert_eq!(session.bricks.alive_count(), 25);
        assert!(session.bricks.iter().all(|b| b.fade.is_none() && b.opacity == 1.0));
        assert!(session.bricks.count_kind(BrickKind::Split) <= 2);
        assert!(session.bricks.count_kind(BrickKind::Speed) <= 1);
    }

    #[test]
    fn test_brick_serializes() {
        let brick = Brick::new(1, 2, Vec2::new(3.0, 4.0), BrickKind::Explosive);
        let json = serde_json::to_string(&brick).unwrap();
        let back: Brick = serde_json::from_str(&json).unwrap();
        assert_eq!(back, brick);
    }
}
