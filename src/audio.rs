//! Sound-effect dispatch
//!
//! The simulation reports what happened each frame as events; this module
//! maps them onto stable sound keys and hands them to a fire-and-forget
//! sink. No acknowledgement, no ordering guarantee, no retry.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Destructible brick shattered
    BrickBreak,
    /// Ball bounced off an indestructible brick
    SolidHit,
    /// Ball bounced off the paddle
    PaddleHit,
    /// Power-up capsule collected
    PowerUpPickup,
}

impl SoundEffect {
    /// Stable key the audio backend resolves to a clip
    pub fn key(self) -> &'static str {
        match self {
            SoundEffect::BrickBreak => "bleep",
            SoundEffect::SolidHit => "solid",
            SoundEffect::PaddleHit => "paddle",
            SoundEffect::PowerUpPickup => "powerup",
        }
    }
}

/// Anything that can play a sound by key, fire-and-forget
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Buffering sink for the headless demo and tests
#[derive(Debug, Default)]
pub struct AudioQueue {
    queued: Vec<SoundEffect>,
}

impl AudioQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand the buffered effects to the backend
    pub fn drain(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.queued)
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }
}

impl AudioSink for AudioQueue {
    fn play(&mut self, effect: SoundEffect) {
        self.queued.push(effect);
    }
}

/// Map one frame's events onto the sink. Events without a sound are
/// ignored here; other collaborators read them directly.
pub fn dispatch_events(events: &[GameEvent], sink: &mut dyn AudioSink) {
    for event in events {
        let effect = match event {
            GameEvent::BrickDestroyed { .. } => Some(SoundEffect::BrickBreak),
            GameEvent::SolidBrickHit => Some(SoundEffect::SolidHit),
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUpPickup),
            GameEvent::BallLost | GameEvent::LevelCleared => None,
        };
        if let Some(effect) = effect {
            sink.play(effect);
        }
    }
}
