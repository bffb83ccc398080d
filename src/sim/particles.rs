//! Decorative particles
//!
//! Confetti, floor splats and the fireball trail. Particles never interact
//! with anything; they drift under reduced gravity and fade out.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle, ParticleColor};
use crate::tuning::Tuning;

/// Spawn `count` particles at `pos` flying out in random directions
pub fn spawn_burst(state: &mut GameState, pos: Vec2, count: usize, color: ParticleColor, tuning: &Tuning) {
    let half = tuning.particle_spread / 2.0;
    for _ in 0..count {
        let vel = random_velocity(state, half);
        push_particle(state, pos, vel, 1.0, color);
    }
}

/// Maybe emit one fire trail particle behind a ball
pub fn spawn_fire(state: &mut GameState, pos: Vec2, tuning: &Tuning) {
    if !state.rng.random_bool(f64::from(tuning.fire_chance.clamp(0.0, 1.0))) {
        return;
    }
    let vel = random_velocity(state, tuning.fire_spread / 2.0);
    push_particle(state, pos, vel, tuning.fire_life, ParticleColor::Fire);
}

fn random_velocity(state: &mut GameState, half: f32) -> Vec2 {
    if half <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        state.rng.random_range(-half..half),
        state.rng.random_range(-half..half),
    )
}

/// Append a particle, evicting the oldest when over the cap
fn push_particle(state: &mut GameState, pos: Vec2, vel: Vec2, life: f32, color: ParticleColor) {
    if state.max_particles == 0 {
        return;
    }
    if state.particles.len() >= state.max_particles {
        let excess = state.particles.len() + 1 - state.max_particles;
        state.particles.drain(..excess);
    }
    let id = state.next_entity_id();
    state.particles.push(Particle {
        id,
        pos,
        vel,
        life,
        color,
    });
}

/// Advance every particle one step, then drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>, tuning: &Tuning) {
    let gravity = tuning.particle_gravity();
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += gravity;
        p.life -= tuning.particle_life_step;
    }
    particles.retain(|p| p.life > 0.0);
}
