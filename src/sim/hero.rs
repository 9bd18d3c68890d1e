//! The player's avatar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::to_cardinal;
use super::meter::OverclockMeter;
use super::surge::Surge;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{clamp_to_field, field_center};

/// Hero state. Recreated at the start of every sector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub pos: Vec2,
    pub radius: f32,
    pub health: u8,
    pub max_health: u8,
    /// Remaining invulnerability (s)
    pub invulnerable: f32,
    /// Remaining fire cooldown (s)
    pub cooldown: f32,
    /// Cooldown applied after each shot
    pub fire_interval: f32,
    /// Last cardinal movement direction
    pub facing: Vec2,
    pub meter: OverclockMeter,
}

impl Hero {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: field_center(),
            radius: HERO_RADIUS,
            health: tuning.hero_max_health,
            max_health: tuning.hero_max_health,
            invulnerable: 0.0,
            cooldown: 0.0,
            fire_interval: tuning.hero_fire_cooldown,
            facing: Vec2::X,
            meter: OverclockMeter::new(tuning.meter_cap),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Move from held axes (each component in -1..=1) and tick timers
    pub fn advance(&mut self, dt: f32, movement: Vec2) {
        if movement.length_squared() > 0.0 {
            let step = movement.normalize();
            self.pos += step * HERO_SPEED * dt;
            self.facing = to_cardinal(step);
        }
        self.pos = clamp_to_field(self.pos, FIELD_MARGIN);

        self.invulnerable = (self.invulnerable - dt).max(0.0);
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Take one point of damage unless invulnerable. Returns true if it landed.
    pub fn hurt(&mut self) -> bool {
        if self.invulnerable > 0.0 {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        self.invulnerable = HERO_IFRAMES;
        true
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Fire along `aim` (falls back to facing when zero) and reset the cooldown
    pub fn fire(&mut self, aim: Vec2) -> Surge {
        self.cooldown = self.fire_interval;
        let dir = if aim.length_squared() > 0.0 {
            aim
        } else {
            self.facing
        };
        Surge::player(self.pos, dir)
    }

    /// Four piercing overclock surges; drains the meter
    pub fn discharge(&mut self) -> [Surge; 4] {
        self.meter.drain();
        [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y].map(|d| Surge::overclock(self.pos, d))
    }
}
