//! Per-frame simulation step
//!
//! One frame runs in fixed order: input, ball movement, collision
//! resolution (bricks, then paddle, then power-up pickups), loss and
//! level-complete evaluation, particle tick, power-up tick, shake-timer
//! tick. The session state is owned exclusively for the duration of the
//! frame, so the whole step is straight-line sequential code.

use glam::Vec2;

use super::collision::{BallHit, Direction, aabb_overlap, ball_box_collision, paddle_deflect};
use super::powerups;
use super::state::{Ball, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single frame, edge-triggered by the platform layer
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Release the ball; also confirms menu/win screens
    pub launch: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    match state.phase {
        GamePhase::Menu => menu_tick(state, input),
        GamePhase::Win => {
            if input.launch {
                state.effects.chaos = false;
                state.phase = GamePhase::Menu;
            }
        }
        GamePhase::Active => active_tick(state, input, dt),
    }
}

fn menu_tick(state: &mut GameState, input: &TickInput) {
    if !state.levels.is_empty() {
        let count = state.levels.len();
        if input.move_right {
            state.level = (state.level + 1) % count;
        }
        if input.move_left {
            state.level = (state.level + count - 1) % count;
        }
    }
    if input.launch {
        log::info!("starting level {}", state.level);
        state.phase = GamePhase::Active;
    }
}

fn active_tick(state: &mut GameState, input: &TickInput, dt: f32) {
    process_input(state, input, dt);
    state.ball.advance(dt, state.width);
    do_collisions(state);

    // Falling past the bottom boundary is a reset, not an error
    if state.ball.body.pos.y >= state.height {
        state.events.push(GameEvent::BallLost);
        state.lives = state.lives.saturating_sub(1);
        log::info!("ball lost, {} lives remaining", state.lives);
        state.reset_level();
        state.reset_player();
        if state.lives == 0 {
            state.lives = START_LIVES;
            state.phase = GamePhase::Menu;
        }
    }

    if state.phase == GamePhase::Active
        && state.current_level().is_some_and(|level| level.is_completed())
    {
        log::info!("level {} cleared", state.level);
        state.events.push(GameEvent::LevelCleared);
        state.reset_level();
        state.reset_player();
        state.effects.chaos = true;
        state.phase = GamePhase::Win;
    }

    // Trail follows the ball, offset toward its center
    let emitter = state.ball.body.clone();
    let offset = Vec2::splat(state.ball.radius / 2.0);
    state
        .particles
        .update(dt, &emitter, PARTICLES_PER_FRAME, offset, &mut state.rng);

    powerups::update_powerups(
        dt,
        &mut state.powerups,
        &mut state.ball,
        &mut state.paddle,
        &mut state.effects,
    );

    if state.effects.shake_time > 0.0 {
        state.effects.shake_time -= dt;
        if state.effects.shake_time <= 0.0 {
            state.effects.shake = false;
        }
    }
}

fn process_input(state: &mut GameState, input: &TickInput, dt: f32) {
    let velocity = PLAYER_VELOCITY * dt;
    let paddle = &mut state.paddle.body;
    if input.move_left {
        paddle.pos.x -= velocity;
    }
    if input.move_right {
        paddle.pos.x += velocity;
    }
    paddle.pos.x = paddle.pos.x.clamp(0.0, state.width - paddle.size.x);

    if state.ball.stuck {
        // Carried by the paddle until released
        state.ball.body.pos.x = paddle.pos.x + paddle.size.x / 2.0 - state.ball.radius;
    }
    if input.launch {
        state.ball.stuck = false;
    }
}

/// Bricks first, then the paddle, then power-up pickups
fn do_collisions(state: &mut GameState) {
    let height = state.height;
    let GameState {
        levels,
        level,
        ball,
        paddle,
        powerups: live_powerups,
        effects,
        events,
        rng,
        ..
    } = state;

    if let Some(level) = levels.get_mut(*level) {
        for brick in &mut level.bricks {
            if brick.body.destroyed {
                continue;
            }
            let hit = ball_box_collision(ball.center(), ball.radius, brick.body.pos, brick.body.size);
            if !hit.hit {
                continue;
            }
            if !brick.solid {
                brick.body.destroyed = true;
                events.push(GameEvent::BrickDestroyed {
                    pos: brick.body.pos,
                });
                powerups::spawn_powerups(live_powerups, brick.body.pos, rng);
            } else {
                // Solid bricks rattle the screen instead of breaking
                effects.shake = true;
                effects.shake_time = SHAKE_DURATION;
                events.push(GameEvent::SolidBrickHit);
            }
            // A pass-through ball ignores everything but solid bricks
            if !(ball.pass_through && !brick.solid) {
                resolve_ball_hit(ball, &hit);
            }
        }
    }

    if !ball.stuck {
        let hit = ball_box_collision(ball.center(), ball.radius, paddle.body.pos, paddle.body.size);
        if hit.hit {
            let paddle_center_x = paddle.body.pos.x + paddle.body.size.x / 2.0;
            ball.body.vel = paddle_deflect(
                ball.body.vel,
                ball.center().x,
                paddle_center_x,
                paddle.body.size.x / 2.0,
            );
            // A sticky paddle catches the ball again
            ball.stuck = ball.sticky;
            events.push(GameEvent::PaddleHit);
        }
    }

    for powerup in live_powerups.iter_mut() {
        if powerup.body.destroyed {
            continue;
        }
        if powerup.body.pos.y >= height {
            powerup.body.destroyed = true;
            continue;
        }
        if aabb_overlap(
            paddle.body.pos,
            paddle.body.size,
            powerup.body.pos,
            powerup.body.size,
        ) {
            powerup.body.destroyed = true;
            powerup.activated = true;
            powerups::activate(powerup.kind, ball, paddle, effects);
            events.push(GameEvent::PowerUpCollected(powerup.kind));
        }
    }
}

/// Reflect velocity and push the ball out along the axis matching the
/// struck face. A vertical hit never adjusts x, and vice versa.
fn resolve_ball_hit(ball: &mut Ball, hit: &BallHit) {
    match hit.dir {
        Direction::Left | Direction::Right => {
            ball.body.vel.x = -ball.body.vel.x;
            let penetration = ball.radius - hit.delta.x.abs();
            if hit.dir == Direction::Right {
                ball.body.pos.x += penetration;
            } else {
                ball.body.pos.x -= penetration;
            }
        }
        Direction::Up | Direction::Down => {
            ball.body.vel.y = -ball.body.vel.y;
            let penetration = ball.radius - hit.delta.y.abs();
            if hit.dir == Direction::Up {
                ball.body.pos.y += penetration;
            } else {
                ball.body.pos.y -= penetration;
            }
        }
    }
}
