//! Particle trail pool
//!
//! A fixed-capacity pool of short-lived particles that trails the ball.
//! Slots are recycled in place; the pool never grows or reallocates after
//! construction.

use glam::{Vec2, Vec4};
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Body;
use crate::consts::*;

/// One pool slot. `life <= 0` marks the slot free for respawning.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// RGBA; alpha fades while the particle is alive
    pub color: Vec4,
    pub scale: f32,
    /// Seconds remaining
    pub life: f32,
}

impl Particle {
    fn dead() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Vec4::ONE,
            scale: 10.0,
            life: 0.0,
        }
    }
}

/// Fixed-capacity recycling pool driven by a moving emitter body
#[derive(Debug)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    /// Search origin for the next free-slot scan
    last_used: usize,
}

impl ParticlePool {
    /// Pre-populate `capacity` dead slots
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::dead(); capacity],
            last_used: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Slots currently alive, in pool order
    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.life > 0.0)
    }

    /// One frame of the pool: emit `new_particles` from the emitter, then
    /// age every slot. Dead slots are left untouched until their next
    /// respawn.
    pub fn update(
        &mut self,
        dt: f32,
        emitter: &Body,
        new_particles: usize,
        offset: Vec2,
        rng: &mut Pcg32,
    ) {
        if self.particles.is_empty() {
            return;
        }

        for _ in 0..new_particles {
            let slot = self.first_free();
            self.respawn(slot, emitter, offset, rng);
        }

        for p in &mut self.particles {
            p.life -= dt;
            if p.life > 0.0 {
                p.pos -= p.vel * dt;
                p.color.w -= dt * PARTICLE_FADE_RATE;
            }
        }
    }

    /// Find a free slot, scanning from the slot after the most recent
    /// respawn and wrapping. A saturated pool overwrites slot 0 rather
    /// than growing.
    fn first_free(&mut self) -> usize {
        let cap = self.particles.len();
        for step in 1..=cap {
            let idx = (self.last_used + step) % cap;
            if self.particles[idx].life <= 0.0 {
                self.last_used = idx;
                return idx;
            }
        }
        self.last_used = 0;
        0
    }

    fn respawn(&mut self, slot: usize, emitter: &Body, offset: Vec2, rng: &mut Pcg32) {
        // One scalar jitter applied to both axes, +-5 units
        let jitter = (rng.random_range(0..100u32) as f32 - 50.0) / 10.0;
        let brightness = 0.5 + rng.random_range(0..100u32) as f32 / 100.0;
        let scale = rng.random_range(8.0..20.0f32);

        let p = &mut self.particles[slot];
        p.pos = emitter.pos + Vec2::splat(jitter) + offset;
        p.color = Vec4::new(brightness, brightness, brightness, 1.0);
        p.scale = scale;
        p.life = PARTICLE_LIFE;
        p.vel = emitter.vel * PARTICLE_VELOCITY_DAMPING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::SeedableRng;

    fn emitter() -> Body {
        let mut body = Body::new(Vec2::new(100.0, 100.0), Vec2::splat(25.0), Vec3::ONE);
        body.vel = Vec2::new(100.0, -350.0);
        body
    }

    #[test]
    fn test_pool_never_exceeds_capacity() {
        let mut pool = ParticlePool::new(4);
        let mut rng = Pcg32::seed_from_u64(1);
        // Far more emissions than slots in a single frame
        pool.update(0.016, &emitter(), 10, Vec2::ZERO, &mut rng);
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.alive().count(), 4);
    }

    #[test]
    fn test_saturated_pool_overwrites_slot_zero() {
        let mut pool = ParticlePool::new(3);
        let mut rng = Pcg32::seed_from_u64(2);
        // Fill every slot without aging them to death
        pool.update(0.0, &emitter(), 3, Vec2::ZERO, &mut rng);
        assert_eq!(pool.alive().count(), 3);

        // No free slot left: the next respawn lands on slot 0
        let slot = pool.first_free();
        assert_eq!(slot, 0);
        assert_eq!(pool.last_used, 0);
    }

    #[test]
    fn test_free_slot_scan_starts_after_last_respawn() {
        let mut pool = ParticlePool::new(4);
        let mut rng = Pcg32::seed_from_u64(3);
        pool.update(0.0, &emitter(), 1, Vec2::ZERO, &mut rng);
        // Scan begins at the slot following the origin (0), so slot 1 first
        assert_eq!(pool.last_used, 1);
        pool.update(0.0, &emitter(), 1, Vec2::ZERO, &mut rng);
        assert_eq!(pool.last_used, 2);
    }

    #[test]
    fn test_alive_particles_move_and_fade() {
        let mut pool = ParticlePool::new(2);
        let mut rng = Pcg32::seed_from_u64(4);
        pool.update(0.0, &emitter(), 1, Vec2::ZERO, &mut rng);

        let before = pool.alive().next().unwrap().clone();
        pool.update(0.1, &emitter(), 0, Vec2::ZERO, &mut rng);
        let after = pool.alive().next().unwrap();

        // Trail particles drift against the emitter velocity
        let expected = before.pos - before.vel * 0.1;
        assert!((after.pos - expected).length() < 1e-4);
        assert!((after.color.w - (1.0 - 0.1 * PARTICLE_FADE_RATE)).abs() < 1e-4);
        assert!((after.life - (PARTICLE_LIFE - 0.1)).abs() < 1e-4);
    }

    #[test]
    fn test_dead_slots_left_untouched() {
        let mut pool = ParticlePool::new(2);
        let mut rng = Pcg32::seed_from_u64(5);
        pool.update(0.0, &emitter(), 1, Vec2::ZERO, &mut rng);
        let spawned_pos = pool.particles[1].pos;

        // Age the particle to death, then keep ticking
        pool.update(2.0, &emitter(), 0, Vec2::ZERO, &mut rng);
        pool.update(1.0, &emitter(), 0, Vec2::ZERO, &mut rng);

        assert_eq!(pool.alive().count(), 0);
        assert_eq!(pool.particles[1].pos, spawned_pos);
    }

    #[test]
    fn test_respawn_parameters_in_range() {
        let mut pool = ParticlePool::new(8);
        let mut rng = Pcg32::seed_from_u64(6);
        pool.update(0.0, &emitter(), 8, Vec2::splat(6.25), &mut rng);

        for p in pool.alive() {
            assert!((8.0..20.0).contains(&p.scale));
            assert!((0.5..1.5).contains(&p.color.x));
            assert_eq!(p.color.x, p.color.y);
            assert_eq!(p.color.y, p.color.z);
            assert_eq!(p.color.w, 1.0);
            // Jitter is bounded by +-5 around emitter + offset
            assert!((p.pos.x - (100.0 + 6.25)).abs() <= 5.0);
            assert!((p.vel - emitter().vel * PARTICLE_VELOCITY_DAMPING).length() < 1e-4);
        }
    }
}
