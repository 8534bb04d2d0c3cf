//! Draw-intent composition
//!
//! Walks the session state and emits an ordered list of sprite draw
//! requests for the renderer collaborator: background, bricks, paddle,
//! particles, ball, live power-ups. The frame also carries the
//! post-process overlay flags; the core never touches GPU state.

use glam::{Vec2, Vec3, Vec4};

use crate::registry::{ResourceRegistry, TextureHandle};
use crate::settings::Settings;
use crate::sim::GameState;

/// One sprite draw request
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub texture: TextureHandle,
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians
    pub rotation: f32,
    /// RGBA
    pub tint: Vec4,
}

/// Post-process flags for the framebuffer overlay pass
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
}

/// Everything the renderer needs for one frame, in draw order
#[derive(Debug)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    pub overlay: Overlay,
}

/// Compose the frame's draw list from the current session state
pub fn compose_frame(state: &GameState, registry: &ResourceRegistry, settings: &Settings) -> Frame {
    let mut commands = Vec::new();

    push(
        registry,
        &mut commands,
        "background",
        Vec2::ZERO,
        Vec2::new(state.width, state.height),
        Vec4::ONE,
    );

    if let Some(level) = state.current_level() {
        for brick in &level.bricks {
            if brick.body.destroyed {
                continue;
            }
            let key = if brick.solid { "block_solid" } else { "block" };
            push(
                registry,
                &mut commands,
                key,
                brick.body.pos,
                brick.body.size,
                opaque(brick.body.tint),
            );
        }
    }

    push(
        registry,
        &mut commands,
        "paddle",
        state.paddle.body.pos,
        state.paddle.body.size,
        opaque(state.paddle.body.tint),
    );

    if settings.particles {
        for particle in state.particles.alive() {
            push(
                registry,
                &mut commands,
                "particle",
                particle.pos,
                Vec2::splat(particle.scale),
                particle.color,
            );
        }
    }

    push(
        registry,
        &mut commands,
        "face",
        state.ball.body.pos,
        state.ball.body.size,
        opaque(state.ball.body.tint),
    );

    for powerup in &state.powerups {
        if powerup.body.destroyed {
            continue;
        }
        push(
            registry,
            &mut commands,
            powerup.kind.texture_key(),
            powerup.body.pos,
            powerup.body.size,
            opaque(powerup.body.tint),
        );
    }

    Frame {
        commands,
        overlay: Overlay {
            shake: state.effects.shake && settings.effective_screen_shake(),
            confuse: state.effects.confuse,
            chaos: state.effects.chaos,
        },
    }
}

#[inline]
fn opaque(tint: Vec3) -> Vec4 {
    tint.extend(1.0)
}

fn push(
    registry: &ResourceRegistry,
    out: &mut Vec<DrawCommand>,
    key: &str,
    pos: Vec2,
    size: Vec2,
    tint: Vec4,
) {
    match registry.texture(key) {
        Some(texture) => out.push(DrawCommand {
            texture,
            pos,
            size,
            rotation: 0.0,
            tint,
        }),
        None => log::warn!("missing texture {key:?}, skipping draw"),
    }
}
