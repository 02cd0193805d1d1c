//! Cosmetic particle bursts
//!
//! Particles never touch gameplay entities once created.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};
use crate::consts::{PARTICLE_MAX_RADIUS, PARTICLE_MIN_RADIUS, PARTICLE_SPREAD};

/// Number of particles in a burst for a given kind multiplier
///
/// Fractional counts round up (15 x 2.5 gives 38).
pub fn burst_size(base: u32, multiplier: f32) -> usize {
    (base as f32 * multiplier).ceil().max(0.0) as usize
}

/// Spawn `count` particles at `center`
pub fn spawn_burst(state: &mut GameState, center: Vec2, color: [f32; 4], count: usize) {
    let decay = state.tuning.particle_decay;
    let jitter = state.tuning.particle_decay_jitter;
    let rng = &mut state.rng;

    state.particles.reserve(count);
    for _ in 0..count {
        // Product of two uniforms biases speeds toward zero
        let vx = (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * PARTICLE_SPREAD);
        let vy = (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * PARTICLE_SPREAD);
        let radius = rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS);
        let decay = decay + rng.random::<f32>() * jitter;

        state
            .particles
            .push(Particle::new(center, Vec2::new(vx, vy), radius, color, decay));
    }
}

/// Decay pass: move, fade, and cull particles
///
/// Removal follows the frame countdown; `alpha` is only what gets drawn.
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.alpha = (particle.alpha - particle.decay).max(0.0);
        particle.frames_left = particle.frames_left.saturating_sub(1);
    }
    particles.retain(|p| p.frames_left > 0);
}
