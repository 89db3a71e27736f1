//! Per-frame render pass
//!
//! Pure drawing: reads the session, never mutates it.

use super::Surface;
use super::vertex::{Rgba, colors};
use crate::sim::{Ball, Brick, BrickKind, Session};

/// Base color for a brick type
pub fn brick_color(kind: BrickKind) -> Rgba {
    match kind {
        BrickKind::Normal => colors::BRICK_NORMAL,
        BrickKind::Speed => colors::BRICK_SPEED,
        BrickKind::Split => colors::BRICK_SPLIT,
        BrickKind::Explosive => colors::BRICK_EXPLOSIVE,
    }
}

/// Alpha a brick is drawn with
///
/// Fading bricks use their opacity. A brick at opacity 0 that is somehow
/// still alive is drawn solid rather than vanishing.
pub fn brick_alpha(brick: &Brick) -> f32 {
    if brick.opacity > 0.0 { brick.opacity } else { 1.0 }
}

/// Draw one frame: bricks, primary ball, paddle, then split balls
pub fn draw_session(session: &Session, surface: &mut dyn Surface) {
    surface.clear();

    for brick in session.bricks.iter().filter(|b| b.is_visible()) {
        let color = colors::with_alpha(brick_color(brick.kind), brick_alpha(brick));
        surface.fill_rect(brick.pos, session.bricks.brick_size, color);
    }

    draw_ball(&session.ball, surface);

    let paddle = &session.paddle;
    surface.fill_rect(paddle.rect().pos, paddle.rect().size, colors::PADDLE);

    for ball in &session.split_balls {
        draw_ball(ball, surface);
    }
}

fn draw_ball(ball: &Ball, surface: &mut dyn Surface) {
    surface.fill_circle(ball.pos, ball.radius, colors::BALL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BrickGrid, BrickStatus};
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Rect { pos: Vec2, color: Rgba },
        Circle { center: Vec2, radius: f32 },
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn fill_rect(&mut self, pos: Vec2, _size: Vec2, color: Rgba) {
            self.ops.push(Op::Rect { pos, color });
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Rgba) {
            self.ops.push(Op::Circle { center, radius });
        }
    }

    fn session() -> Session {
        let mut session = Session::new(Tuning::default(), 11);
        session.bricks = BrickGrid::uniform(&session.tuning, BrickKind::Normal);
        session
    }

    #[test]
    fn test_draw_order() {
        let session = session();
        let mut surface = RecordingSurface::default();
        draw_session(&session, &mut surface);

        assert_eq!(surface.ops[0], Op::Clear);
        // 25 bricks, ball, paddle
        assert_eq!(surface.ops.len(), 1 + 25 + 1 + 1);
        assert!(matches!(surface.ops[26], Op::Circle { .. }));
        assert!(matches!(surface.ops[27], Op::Rect { .. }));
    }

    #[test]
    fn test_fading_brick_alpha_and_destroyed_skipped() {
        let mut session = session();
        session.bricks.get_mut(0, 0).unwrap().opacity = 0.25;
        {
            let gone = session.bricks.get_mut(0, 1).unwrap();
            gone.status = BrickStatus::Destroyed;
            gone.opacity = 0.0;
        }

        let mut surface = RecordingSurface::default();
        draw_session(&session, &mut surface);

        let bricks: Vec<_> = surface.ops[1..]
            .iter()
            .filter_map(|op| match op {
                Op::Rect { pos, color } => Some((*pos, *color)),
                _ => None,
            })
            .collect();
        // 24 bricks plus the paddle
        assert_eq!(bricks.len(), 25);
        assert_eq!(bricks[0].1[3], 0.25);
        assert_eq!(bricks[1].0, session.bricks.get(0, 2).unwrap().pos);
    }

    #[test]
    fn test_split_balls_drawn_last() {
        let mut session = session();
        session
            .split_balls
            .push(Ball::free(Vec2::new(40.0, 50.0), Vec2::ZERO, 10.0));

        let mut surface = RecordingSurface::default();
        draw_session(&session, &mut surface);
        assert_eq!(
            surface.ops.last(),
            Some(&Op::Circle {
                center: Vec2::new(40.0, 50.0),
                radius: 10.0
            })
        );
    }

    #[test]
    fn test_brick_colors() {
        assert_eq!(brick_color(BrickKind::Speed), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(brick_color(BrickKind::Split), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(brick_color(BrickKind::Normal), colors::BALL);
    }
}
