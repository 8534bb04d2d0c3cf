//! Brickfall entry point
//!
//! Headless demo driver: runs the deterministic simulation with a simple
//! ball-tracking autopilot, feeding draw intents and sound effects to
//! logging collaborators. A windowed build plugs the same session into a
//! real renderer and audio backend.

use std::path::Path;

use brickfall::audio::{self, AudioQueue};
use brickfall::render::compose_frame;
use brickfall::sim::{GamePhase, GameState, TickInput, tick};
use brickfall::{ResourceRegistry, Settings};

/// Frame time for the demo loop (60 Hz)
const DT: f32 = 1.0 / 60.0;
/// Play area in pixels
const SCREEN_WIDTH: f32 = 800.0;
const SCREEN_HEIGHT: f32 = 600.0;

const SETTINGS_PATH: &str = "settings.json";

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xB51CC);
    log::info!("session seed {seed}");

    let settings = Settings::load(Path::new(SETTINGS_PATH));
    let registry = build_registry();

    let mut state = GameState::new(SCREEN_WIDTH, SCREEN_HEIGHT, seed);
    state.add_level_text(include_str!("../assets/levels/one.lvl"));
    state.add_level_text(include_str!("../assets/levels/two.lvl"));
    state.add_level_text(include_str!("../assets/levels/three.lvl"));
    state.add_level_text(include_str!("../assets/levels/four.lvl"));

    // Confirm the menu's default level selection and start playing
    let launch = TickInput {
        launch: true,
        ..Default::default()
    };
    tick(&mut state, &launch, DT);

    let mut audio_queue = AudioQueue::new();
    let mut sounds = 0usize;
    let mut frames = 0u32;
    for _ in 0..3600 {
        let input = autopilot(&state);
        tick(&mut state, &input, DT);
        frames += 1;

        audio::dispatch_events(&state.events, &mut audio_queue);
        for effect in audio_queue.drain() {
            if settings.sfx {
                log::debug!("sfx {}", effect.key());
                sounds += 1;
            }
        }

        if state.phase != GamePhase::Active {
            break;
        }
    }

    let frame = compose_frame(&state, &registry, &settings);
    let destroyed = state
        .current_level()
        .map(|level| {
            level
                .bricks
                .iter()
                .filter(|brick| brick.body.destroyed)
                .count()
        })
        .unwrap_or(0);
    log::info!(
        "demo over: {frames} frames, {destroyed} bricks down, {} lives, {sounds} sounds, {} draws in the final frame",
        state.lives,
        frame.commands.len(),
    );

    settings.save(Path::new(SETTINGS_PATH));
}

/// Register every texture and shader key the composer resolves
fn build_registry() -> ResourceRegistry {
    let mut registry = ResourceRegistry::new();
    for key in [
        "background",
        "block",
        "block_solid",
        "paddle",
        "particle",
        "face",
        "powerup_speed",
        "powerup_sticky",
        "powerup_passthrough",
        "powerup_increase",
        "powerup_confuse",
        "powerup_chaos",
    ] {
        registry.register_texture(key);
    }
    registry.register_shader("sprite");
    registry.register_shader("particle");
    registry.register_shader("postprocess");
    registry
}

/// Chase the ball's x position and relaunch whenever it is caught
fn autopilot(state: &GameState) -> TickInput {
    let paddle_center = state.paddle.body.pos.x + state.paddle.body.size.x / 2.0;
    let ball_center = state.ball.center().x;
    TickInput {
        move_left: ball_center < paddle_center - 5.0,
        move_right: ball_center > paddle_center + 5.0,
        launch: state.ball.stuck,
    }
}
