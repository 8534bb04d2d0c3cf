//! Power-up spawn rolls and the timed effect state machine
//!
//! Whether an effect is "active" is derived, never stored: a kind is active
//! while at least one instance of it is still `activated`. Collected
//! instances therefore stay in the list until their timer runs out, which
//! makes overlapping pickups extend an effect instead of cutting it short.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Ball, Effects, Paddle, PowerUp};
use crate::consts::{BALL_SPEED_BOOST, PADDLE_WIDEN_AMOUNT};

/// The closed set of power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    /// Spawn roll order. Fixed so a seeded session replays identically.
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// Effect length in seconds. Speed and pad-size apply instantly and
    /// keep no timed state worth waiting on.
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Confuse => 15.0,
            PowerUpKind::Chaos => 15.0,
        }
    }

    /// Capsule tint while falling
    pub fn tint(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    /// Sprite key resolved through the resource registry
    pub fn texture_key(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "powerup_speed",
            PowerUpKind::Sticky => "powerup_sticky",
            PowerUpKind::PassThrough => "powerup_passthrough",
            PowerUpKind::PadSizeIncrease => "powerup_increase",
            PowerUpKind::Confuse => "powerup_confuse",
            PowerUpKind::Chaos => "powerup_chaos",
        }
    }

    /// One-in-`n` spawn odds per destroyed brick
    fn spawn_chance(self) -> u32 {
        match self {
            // The screen-warping effects drop often enough to stay a threat
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15,
            _ => 75,
        }
    }
}

fn should_spawn(rng: &mut Pcg32, chance: u32) -> bool {
    rng.random_range(0..chance) == 0
}

/// Roll every kind independently for one destroyed brick. Zero, one, or
/// several capsules may drop from the same brick.
pub fn spawn_powerups(powerups: &mut Vec<PowerUp>, pos: Vec2, rng: &mut Pcg32) {
    for kind in PowerUpKind::ALL {
        if should_spawn(rng, kind.spawn_chance()) {
            powerups.push(PowerUp::new(kind, pos));
        }
    }
}

/// Apply the immediate activation effect for a collected power-up
pub fn activate(kind: PowerUpKind, ball: &mut Ball, paddle: &mut Paddle, effects: &mut Effects) {
    match kind {
        PowerUpKind::Speed => {
            ball.body.vel *= BALL_SPEED_BOOST;
        }
        PowerUpKind::Sticky => {
            ball.sticky = true;
            paddle.body.tint = Vec3::new(1.0, 0.5, 1.0);
        }
        PowerUpKind::PassThrough => {
            ball.pass_through = true;
            ball.body.tint = Vec3::new(1.0, 0.5, 0.5);
        }
        PowerUpKind::PadSizeIncrease => {
            paddle.body.size.x += PADDLE_WIDEN_AMOUNT;
        }
        PowerUpKind::Confuse => {
            if !effects.chaos {
                effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !effects.confuse {
                effects.chaos = true;
            }
        }
    }
}

/// True while any instance of `kind` is still activated
pub fn is_active(powerups: &[PowerUp], kind: PowerUpKind) -> bool {
    powerups.iter().any(|p| p.activated && p.kind == kind)
}

/// Advance every instance one frame: fall, count down active timers,
/// deactivate expired effects, then drop spent instances.
///
/// An expiring instance only clears its global effect when no other
/// instance of the same kind is still counting down.
pub fn update_powerups(
    dt: f32,
    powerups: &mut Vec<PowerUp>,
    ball: &mut Ball,
    paddle: &mut Paddle,
    effects: &mut Effects,
) {
    for i in 0..powerups.len() {
        let p = &mut powerups[i];
        p.body.pos += p.body.vel * dt;
        if !p.activated {
            continue;
        }
        p.duration -= dt;
        if p.duration > 0.0 {
            continue;
        }
        p.activated = false;
        let kind = p.kind;
        if is_active(powerups, kind) {
            continue;
        }
        match kind {
            PowerUpKind::Sticky => {
                ball.sticky = false;
                // A sticky-induced hold ends with the effect
                ball.stuck = false;
                paddle.body.tint = Vec3::ONE;
            }
            PowerUpKind::PassThrough => {
                ball.pass_through = false;
                ball.body.tint = Vec3::ONE;
            }
            PowerUpKind::Confuse => effects.confuse = false,
            PowerUpKind::Chaos => effects.chaos = false,
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
        }
    }

    powerups.retain(|p| !(p.body.destroyed && !p.activated));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{INITIAL_BALL_VELOCITY, PLAYER_SIZE};
    use rand::SeedableRng;

    fn ball() -> Ball {
        Ball::new(Vec2::new(400.0, 500.0), 12.5, INITIAL_BALL_VELOCITY)
    }

    fn paddle() -> Paddle {
        Paddle::new(Vec2::new(350.0, 580.0))
    }

    fn collected(kind: PowerUpKind, duration: f32) -> PowerUp {
        let mut p = PowerUp::new(kind, Vec2::ZERO);
        p.body.destroyed = true;
        p.activated = true;
        p.duration = duration;
        p
    }

    #[test]
    fn test_overlapping_sticky_pickups_extend_the_effect() {
        let mut ball = ball();
        let mut paddle = paddle();
        let mut effects = Effects::default();
        let mut powerups = vec![
            collected(PowerUpKind::Sticky, 5.0),
            collected(PowerUpKind::Sticky, 8.0),
        ];
        activate(PowerUpKind::Sticky, &mut ball, &mut paddle, &mut effects);
        activate(PowerUpKind::Sticky, &mut ball, &mut paddle, &mut effects);

        // Sticky must stay enabled continuously until the later pickup expires
        for _ in 0..7 {
            update_powerups(1.0, &mut powerups, &mut ball, &mut paddle, &mut effects);
            assert!(ball.sticky);
        }
        update_powerups(1.0, &mut powerups, &mut ball, &mut paddle, &mut effects);
        assert!(!ball.sticky);
        assert!(powerups.is_empty());
    }

    #[test]
    fn test_expired_instances_are_garbage_collected() {
        let mut ball = ball();
        let mut paddle = paddle();
        let mut effects = Effects::default();
        let mut powerups = vec![collected(PowerUpKind::PassThrough, 0.5)];
        activate(PowerUpKind::PassThrough, &mut ball, &mut paddle, &mut effects);

        update_powerups(0.25, &mut powerups, &mut ball, &mut paddle, &mut effects);
        // Still activated: kept despite being destroyed
        assert_eq!(powerups.len(), 1);
        assert!(ball.pass_through);

        update_powerups(0.5, &mut powerups, &mut ball, &mut paddle, &mut effects);
        assert!(powerups.is_empty());
        assert!(!ball.pass_through);
    }

    #[test]
    fn test_uncollected_capsules_keep_falling() {
        let mut ball = ball();
        let mut paddle = paddle();
        let mut effects = Effects::default();
        let mut powerups = vec![PowerUp::new(PowerUpKind::Speed, Vec2::new(100.0, 100.0))];

        update_powerups(0.1, &mut powerups, &mut ball, &mut paddle, &mut effects);
        let p = &powerups[0];
        assert!(p.body.pos.y > 100.0);
        assert_eq!(p.body.pos.x, 100.0);
    }

    #[test]
    fn test_pad_size_is_permanent() {
        let mut ball = ball();
        let mut paddle = paddle();
        let mut effects = Effects::default();
        activate(
            PowerUpKind::PadSizeIncrease,
            &mut ball,
            &mut paddle,
            &mut effects,
        );
        assert_eq!(paddle.body.size.x, PLAYER_SIZE.x + PADDLE_WIDEN_AMOUNT);

        // Expiry is a no-op for this kind: width stays
        let mut powerups = vec![collected(PowerUpKind::PadSizeIncrease, 0.0)];
        update_powerups(1.0, &mut powerups, &mut ball, &mut paddle, &mut effects);
        assert_eq!(paddle.body.size.x, PLAYER_SIZE.x + PADDLE_WIDEN_AMOUNT);
    }

    #[test]
    fn test_speed_boost_scales_velocity() {
        let mut ball = ball();
        let mut paddle = paddle();
        let mut effects = Effects::default();
        activate(PowerUpKind::Speed, &mut ball, &mut paddle, &mut effects);
        assert_eq!(ball.body.vel, INITIAL_BALL_VELOCITY * BALL_SPEED_BOOST);
    }

    #[test]
    fn test_confuse_and_chaos_exclude_each_other() {
        let mut ball = ball();
        let mut paddle = paddle();
        let mut effects = Effects::default();

        activate(PowerUpKind::Chaos, &mut ball, &mut paddle, &mut effects);
        assert!(effects.chaos);
        // Confuse cannot engage while chaos is on screen
        activate(PowerUpKind::Confuse, &mut ball, &mut paddle, &mut effects);
        assert!(!effects.confuse);

        effects.chaos = false;
        activate(PowerUpKind::Confuse, &mut ball, &mut paddle, &mut effects);
        assert!(effects.confuse);
        activate(PowerUpKind::Chaos, &mut ball, &mut paddle, &mut effects);
        assert!(!effects.chaos);
    }

    #[test]
    fn test_spawn_rolls_replay_for_a_fixed_seed() {
        let spawn_run = |seed: u64| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut powerups = Vec::new();
            for _ in 0..75 {
                spawn_powerups(&mut powerups, Vec2::ZERO, &mut rng);
            }
            let mut kinds: Vec<PowerUpKind> = powerups.iter().map(|p| p.kind).collect();
            kinds.sort_by_key(|k| PowerUpKind::ALL.iter().position(|a| a == k));
            kinds
        };

        let first = spawn_run(0xB1A5);
        let second = spawn_run(0xB1A5);
        assert_eq!(first, second);
        // With confuse/chaos at 1-in-15 odds, 75 bricks essentially always
        // drop something
        assert!(!first.is_empty());
    }

    #[test]
    fn test_spawned_capsules_start_inert() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut powerups = Vec::new();
        for _ in 0..200 {
            spawn_powerups(&mut powerups, Vec2::new(60.0, 30.0), &mut rng);
        }
        assert!(!powerups.is_empty());
        for p in &powerups {
            assert!(!p.activated);
            assert!(!p.body.destroyed);
            assert_eq!(p.body.pos, Vec2::new(60.0, 30.0));
            assert_eq!(p.body.vel, crate::consts::POWERUP_VELOCITY);
        }
    }
}
