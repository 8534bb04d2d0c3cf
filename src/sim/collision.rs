//! Collision detection for the brick field
//!
//! Pure geometry: axis-aligned boxes and the circular ball. These helpers
//! only measure; the simulation step decides what a hit means.

use glam::Vec2;

use crate::consts::{INITIAL_BALL_VELOCITY, PADDLE_DEFLECT_STRENGTH};

/// Which face of a box the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// Result of a ball-vs-box check
#[derive(Debug, Clone, Copy)]
pub struct BallHit {
    /// Whether an overlap occurred
    pub hit: bool,
    /// Struck face, meaningful only when `hit`
    pub dir: Direction,
    /// Vector from the closest point on the box to the ball center
    pub delta: Vec2,
}

impl BallHit {
    pub fn miss() -> Self {
        Self {
            hit: false,
            dir: Direction::Up,
            delta: Vec2::ZERO,
        }
    }
}

/// Axis-aligned box overlap, inclusive on both axes
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x <= b_pos.x + b_size.x
        && b_pos.x <= a_pos.x + a_size.x
        && a_pos.y <= b_pos.y + b_size.y
        && b_pos.y <= a_pos.y + a_size.y
}

/// Check the ball against an axis-aligned box.
///
/// Clamps the box-center-to-ball vector to the box half-extents to find the
/// closest point on the box, then compares its distance to the ball center
/// against the radius. The comparison is inclusive: grazing contact counts.
pub fn ball_box_collision(center: Vec2, radius: f32, box_pos: Vec2, box_size: Vec2) -> BallHit {
    let half = box_size * 0.5;
    let box_center = box_pos + half;
    let clamped = (center - box_center).clamp(-half, half);
    let closest = box_center + clamped;
    let delta = center - closest;

    if delta.length() <= radius {
        BallHit {
            hit: true,
            dir: vector_direction(delta),
            delta,
        }
    } else {
        BallHit::miss()
    }
}

/// Classify a vector against the four compass directions.
///
/// Takes the compass axis with the strictly largest dot product, starting
/// from 0.0, so a zero-length or all-non-positive vector classifies as `Up`.
pub fn vector_direction(target: Vec2) -> Direction {
    const COMPASS: [(Vec2, Direction); 4] = [
        (Vec2::new(0.0, 1.0), Direction::Up),
        (Vec2::new(1.0, 0.0), Direction::Right),
        (Vec2::new(0.0, -1.0), Direction::Down),
        (Vec2::new(-1.0, 0.0), Direction::Left),
    ];

    let normalized = target.normalize_or_zero();
    let mut best = Direction::Up;
    let mut max = 0.0;
    for (axis, dir) in COMPASS {
        let dot = normalized.dot(axis);
        if dot > max {
            max = dot;
            best = dir;
        }
    }
    best
}

/// Velocity after an off-center paddle bounce.
///
/// The horizontal component steers by how far from the paddle center the
/// ball struck; the vertical component always sends the ball back up
/// (negative y in screen space). The result keeps the magnitude of `vel`.
pub fn paddle_deflect(
    vel: Vec2,
    ball_center_x: f32,
    paddle_center_x: f32,
    paddle_half_width: f32,
) -> Vec2 {
    let percentage = (ball_center_x - paddle_center_x) / paddle_half_width;
    let steered = Vec2::new(
        INITIAL_BALL_VELOCITY.x * percentage * PADDLE_DEFLECT_STRENGTH,
        -vel.y.abs(),
    );
    steered.normalize_or_zero() * vel.length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_aabb_overlap_basic() {
        let a = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = (Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = (Vec2::new(20.0, 20.0), Vec2::new(4.0, 4.0));

        assert!(aabb_overlap(a.0, a.1, b.0, b.1));
        assert!(!aabb_overlap(a.0, a.1, c.0, c.1));
    }

    #[test]
    fn test_aabb_overlap_edge_touch_counts() {
        // Right edge of a exactly meets left edge of b
        let a = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = (Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(aabb_overlap(a.0, a.1, b.0, b.1));
        assert!(aabb_overlap(b.0, b.1, a.0, a.1));
    }

    #[test]
    fn test_ball_box_boundary_inclusive() {
        // Box [0,10]x[0,10]; ball center at (22.5, 5) with radius 12.5 is
        // exactly radius away from the closest point (10, 5).
        let hit = ball_box_collision(
            Vec2::new(22.5, 5.0),
            12.5,
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
        );
        assert!(hit.hit);
        assert_eq!(hit.dir, Direction::Right);

        // One unit further out misses
        let miss = ball_box_collision(
            Vec2::new(23.5, 5.0),
            12.5,
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
        );
        assert!(!miss.hit);
    }

    #[test]
    fn test_ball_box_center_inside_box() {
        // Ball center inside the box clamps to itself: zero delta, still a hit
        let hit = ball_box_collision(
            Vec2::new(5.0, 5.0),
            2.0,
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
        );
        assert!(hit.hit);
        assert_eq!(hit.dir, Direction::Up);
    }

    #[test]
    fn test_vector_direction_compass() {
        assert_eq!(vector_direction(Vec2::new(0.0, 3.0)), Direction::Up);
        assert_eq!(vector_direction(Vec2::new(7.0, 0.0)), Direction::Right);
        assert_eq!(vector_direction(Vec2::new(0.0, -0.2)), Direction::Down);
        assert_eq!(vector_direction(Vec2::new(-1.5, 0.0)), Direction::Left);
        // Diagonal leans toward the dominant axis
        assert_eq!(vector_direction(Vec2::new(0.3, -1.0)), Direction::Down);
    }

    #[test]
    fn test_vector_direction_defaults_up() {
        assert_eq!(vector_direction(Vec2::ZERO), Direction::Up);
    }

    #[test]
    fn test_paddle_deflect_bounces_upward() {
        // Ball arriving downward, struck right of center: steers right, goes up
        let out = paddle_deflect(Vec2::new(0.0, 350.0), 130.0, 100.0, 50.0);
        assert!(out.x > 0.0);
        assert!(out.y < 0.0);
    }

    #[test]
    fn test_paddle_deflect_preserves_speed() {
        let vel = Vec2::new(100.0, -350.0);
        let out = paddle_deflect(vel, 80.0, 100.0, 50.0);
        assert!((out.length() - vel.length()).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_aabb_overlap_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.1f32..200.0, ah in 0.1f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.1f32..200.0, bh in 0.1f32..200.0,
        ) {
            let a = (Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = (Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(
                aabb_overlap(a.0, a.1, b.0, b.1),
                aabb_overlap(b.0, b.1, a.0, a.1)
            );
        }

        #[test]
        fn prop_paddle_deflect_preserves_speed(
            vx in -400.0f32..400.0,
            vy in 50.0f32..400.0,
            hit_x in 10.0f32..190.0,
        ) {
            let vel = Vec2::new(vx, vy);
            let out = paddle_deflect(vel, hit_x, 100.0, 50.0);
            prop_assert!((out.length() - vel.length()).abs() < vel.length() * 1e-4);
        }
    }
}
