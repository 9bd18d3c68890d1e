//! Cosmetic effects: particles and screen shake
//!
//! Nothing here feeds back into gameplay. The effects layer owns its own RNG
//! so toggling particles never shifts the simulation's random stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{SHAKE_DECAY, SHAKE_MAX};
use crate::random_between;

/// Upper bound on live particles
pub const MAX_PARTICLES: usize = 512;

/// Spark sizes; 2 is weighted double
const SPARK_SIZES: [f32; 4] = [1.0, 2.0, 2.0, 3.0];

/// Palette tags for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SparkColor {
    Cancel,
    PlayerHit,
    OverclockHit,
    Explosion,
    Clone,
    Blast,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: SparkColor,
    /// Total lifetime (s)
    pub life: f32,
    pub age: f32,
    pub size: f32,
}

impl Particle {
    /// Returns false once expired
    pub fn update(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.pos += self.vel * dt;
        self.vel *= 0.985;
        self.age < self.life
    }

    /// Remaining brightness in [0, 1]
    pub fn fade(&self) -> f32 {
        (1.0 - self.age / self.life).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct Effects {
    pub particles: Vec<Particle>,
    /// Current shake magnitude in px
    pub shake: f32,
    pub shake_enabled: bool,
    pub particles_enabled: bool,
    rng: Pcg32,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            shake: 0.0,
            shake_enabled: true,
            particles_enabled: true,
            rng: Pcg32::seed_from_u64(seed ^ 0x5EED_F00D),
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn add_shake(&mut self, amount: f32) {
        if self.shake_enabled {
            self.shake = (self.shake + amount).min(SHAKE_MAX);
        }
    }

    /// Burst of `n` sparks at `pos`
    pub fn spark(&mut self, pos: Vec2, color: SparkColor, n: usize) {
        if !self.particles_enabled {
            return;
        }
        for _ in 0..n {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = random_between((120.0, 260.0), &mut self.rng);
            let life = random_between((0.25, 0.5), &mut self.rng);
            let size = SPARK_SIZES[self.rng.random_range(0..SPARK_SIZES.len())];
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                life,
                age: 0.0,
                size,
            });
        }
    }

    pub fn update_particles(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.update(dt));
    }

    pub fn decay_shake(&mut self, dt: f32) {
        self.shake = (self.shake - SHAKE_DECAY * dt).max(0.0);
    }

    /// Random render offset for the current shake
    pub fn shake_offset(&mut self) -> Vec2 {
        if self.shake <= 0.0 {
            return Vec2::ZERO;
        }
        let s = self.shake;
        Vec2::new(
            random_between((-1.0, 1.0), &mut self.rng) * s,
            random_between((-1.0, 1.0), &mut self.rng) * s,
        )
    }
}
