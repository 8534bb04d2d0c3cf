//! Entity and session state
//!
//! Everything the per-frame step mutates lives here. The session owns its
//! RNG, so probabilistic power-up spawns replay exactly for a given seed.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::particles::ParticlePool;
use super::powerups::PowerUpKind;
use crate::consts::*;
use crate::level::Level;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Level select; move keys cycle levels, launch starts play
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared; launch returns to the menu
    Win,
}

/// Shared fields every on-screen entity carries.
///
/// Position is the top-left corner in screen space (y grows downward).
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub tint: Vec3,
    pub destroyed: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, tint: Vec3) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            tint,
            destroyed: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// One wall tile. Solid bricks rattle the screen instead of breaking.
#[derive(Debug, Clone)]
pub struct Brick {
    pub body: Body,
    pub solid: bool,
}

/// The ball. While `stuck` it rides the paddle and skips free movement.
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: Body,
    pub radius: f32,
    pub stuck: bool,
    /// Next paddle bounce re-attaches the ball
    pub sticky: bool,
    /// Non-solid bricks no longer deflect the ball
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        let mut body = Body::new(pos, Vec2::splat(radius * 2.0), Vec3::ONE);
        body.vel = vel;
        Self {
            body,
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Integrate one frame of free movement, reflecting off the left, right
    /// and top play-area edges. The bottom edge is the loss boundary and is
    /// handled by the step, not here.
    pub fn advance(&mut self, dt: f32, window_width: f32) {
        if self.stuck {
            return;
        }
        self.body.pos += self.body.vel * dt;

        if self.body.pos.x <= 0.0 {
            self.body.vel.x = -self.body.vel.x;
            self.body.pos.x = 0.0;
        } else if self.body.pos.x + self.body.size.x >= window_width {
            self.body.vel.x = -self.body.vel.x;
            self.body.pos.x = window_width - self.body.size.x;
        }
        if self.body.pos.y <= 0.0 {
            self.body.vel.y = -self.body.vel.y;
            self.body.pos.y = 0.0;
        }
    }

    /// Back to the serve state: repositioned, re-attached, capabilities cleared
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.body.tint = Vec3::ONE;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    pub body: Body,
}

impl Paddle {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, PLAYER_SIZE, Vec3::ONE),
        }
    }
}

/// A falling or collected power-up capsule
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Seconds of effect remaining, meaningful while `activated`
    pub duration: f32,
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        let mut body = Body::new(pos, POWERUP_SIZE, kind.tint());
        body.vel = POWERUP_VELOCITY;
        Self {
            body,
            kind,
            duration: kind.duration(),
            activated: false,
        }
    }
}

/// Timed post-process flags reported to the renderer collaborator
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub shake: bool,
    /// Seconds of shake remaining
    pub shake_time: f32,
    pub confuse: bool,
    pub chaos: bool,
}

/// Something that happened during a frame. Reported fire-and-forget to the
/// audio/rendering collaborators; never queued across frames or retried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BrickDestroyed { pos: Vec2 },
    SolidBrickHit,
    PaddleHit,
    PowerUpCollected(PowerUpKind),
    BallLost,
    LevelCleared,
}

/// Complete session state, owned exclusively by the step for one frame
#[derive(Debug)]
pub struct GameState {
    /// Play area in pixels
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub lives: u32,
    pub levels: Vec<Level>,
    /// Index of the level in play
    pub level: usize,
    pub paddle: Paddle,
    pub ball: Ball,
    pub powerups: Vec<PowerUp>,
    pub particles: ParticlePool,
    pub effects: Effects,
    /// Events emitted this frame, cleared at the start of each tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session over a `width` x `height` pixel play area. The seed
    /// drives every probabilistic spawn roll.
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let player_pos = Vec2::new((width - PLAYER_SIZE.x) / 2.0, height - PLAYER_SIZE.y);
        let ball_pos = player_pos + Vec2::new(PLAYER_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0);
        Self {
            width,
            height,
            phase: GamePhase::Menu,
            lives: START_LIVES,
            levels: Vec::new(),
            level: 0,
            paddle: Paddle::new(player_pos),
            ball: Ball::new(ball_pos, BALL_RADIUS, INITIAL_BALL_VELOCITY),
            powerups: Vec::new(),
            particles: ParticlePool::new(PARTICLE_CAPACITY),
            effects: Effects::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Parse a level grid and append it to the rotation. The brick field
    /// occupies the top half of the play area.
    pub fn add_level_text(&mut self, text: &str) {
        let level = Level::parse(text, self.width, self.height / 2.0);
        log::info!("level {} loaded: {} bricks", self.levels.len(), level.bricks.len());
        self.levels.push(level);
    }

    /// Load a level grid from disk; a missing file yields a zero-brick level
    pub fn add_level_path(&mut self, path: &std::path::Path) {
        let level = Level::load(path, self.width, self.height / 2.0);
        log::info!("level {} loaded: {} bricks", self.levels.len(), level.bricks.len());
        self.levels.push(level);
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.levels.get(self.level)
    }

    /// Canonical paddle spawn position
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(
            (self.width - PLAYER_SIZE.x) / 2.0,
            self.height - PLAYER_SIZE.y,
        )
    }

    /// Canonical ball spawn position, resting on the paddle spawn
    pub fn ball_spawn(&self) -> Vec2 {
        self.player_spawn() + Vec2::new(PLAYER_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0)
    }

    /// Rebuild the current level's bricks from its tile grid
    pub fn reset_level(&mut self) {
        if let Some(level) = self.levels.get_mut(self.level) {
            level.reset();
        }
    }

    /// Paddle and ball back to spawn; live power-ups and effects cleared
    pub fn reset_player(&mut self) {
        self.paddle.body.size = PLAYER_SIZE;
        self.paddle.body.pos = self.player_spawn();
        self.paddle.body.tint = Vec3::ONE;
        let spawn = self.ball_spawn();
        self.ball.reset(spawn, INITIAL_BALL_VELOCITY);
        self.powerups.clear();
        self.effects = Effects::default();
    }
}
