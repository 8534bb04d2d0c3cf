//! Deterministic simulation module
//!
//! All gameplay logic lives here. The module stays pure and deterministic:
//! - One simulation step per rendered frame, single delta-time integration
//! - Seeded RNG only, owned by the session state
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod powerups;
pub mod state;
pub mod tick;

pub use collision::{BallHit, Direction, aabb_overlap, ball_box_collision, paddle_deflect, vector_direction};
pub use particles::{Particle, ParticlePool};
pub use powerups::{PowerUpKind, is_active, spawn_powerups, update_powerups};
pub use state::{Ball, Body, Brick, Effects, GameEvent, GamePhase, GameState, Paddle, PowerUp};
pub use tick::{TickInput, tick};
