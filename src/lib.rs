//! Brickfall - a classic brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, power-ups, particles, game state)
//! - `level`: Plain-text level grids and brick layout
//! - `render`: Ordered draw-intent composition for the renderer collaborator
//! - `registry`: String-keyed texture/shader handle registry
//! - `audio`: Fire-and-forget sound-effect dispatch
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod level;
pub mod registry;
pub mod render;
pub mod settings;
pub mod sim;

pub use registry::ResourceRegistry;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Paddle size in pixels
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Paddle speed (pixels/s)
    pub const PLAYER_VELOCITY: f32 = 500.0;

    /// Ball defaults. Screen space has y growing downward, so the launch
    /// velocity's negative y component sends the ball up toward the bricks.
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    pub const BALL_RADIUS: f32 = 12.5;

    /// Horizontal steering applied by an off-center paddle bounce
    pub const PADDLE_DEFLECT_STRENGTH: f32 = 2.0;

    /// Screen shake after a solid-brick hit (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Falling power-up capsule defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);

    /// Speed power-up multiplier on the ball velocity
    pub const BALL_SPEED_BOOST: f32 = 1.2;
    /// Pixels the pad-size power-up adds to the paddle width
    pub const PADDLE_WIDEN_AMOUNT: f32 = 50.0;

    /// Particle trail defaults
    pub const PARTICLE_CAPACITY: usize = 500;
    pub const PARTICLES_PER_FRAME: usize = 2;
    pub const PARTICLE_LIFE: f32 = 1.0;
    /// Alpha fade rate (per second)
    pub const PARTICLE_FADE_RATE: f32 = 2.5;
    /// Fraction of the emitter's velocity a particle inherits
    pub const PARTICLE_VELOCITY_DAMPING: f32 = 0.1;

    /// Lives per session
    pub const START_LIVES: u32 = 3;
}
