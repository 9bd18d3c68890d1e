//! Enemy variants: shared wire motion plus a per-species behavior
//!
//! An enemy never resolves its own collisions or removes itself. The
//! simulation core applies damage via `take_damage` and asks dying enemies
//! for their death-spawns via `on_death`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{is_at_intersection, is_horizontal, random_cardinal, random_turn, snap_to_wire, to_cardinal};
use super::surge::Surge;
use crate::consts::*;
use crate::{jitter, random_between};

/// Concrete enemy type, used for mitosis matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Virus,
    Bug,
    Worm,
}

impl Species {
    pub fn speed(self) -> f32 {
        match self {
            Species::Virus => VIRUS_SPEED,
            Species::Bug => BUG_SPEED,
            Species::Worm => WORM_SPEED,
        }
    }

    /// Turn chance per 1/60 s spent at an intersection
    pub fn turn_bias(self) -> f32 {
        match self {
            Species::Virus => VIRUS_TURN_BIAS,
            Species::Bug => BUG_TURN_BIAS,
            Species::Worm => WORM_TURN_BIAS,
        }
    }

    pub fn fire_cooldown(self) -> (f32, f32) {
        match self {
            Species::Virus => VIRUS_SHOOT_CD,
            Species::Bug => BUG_SHOOT_CD,
            Species::Worm => WORM_SHOOT_CD,
        }
    }

    /// Screen shake added when this species fires a volley
    pub fn volley_shake(self) -> f32 {
        match self {
            Species::Bug => 0.0,
            Species::Virus | Species::Worm => SHAKE_ENEMY_VOLLEY,
        }
    }
}

/// Per-species state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Splits into two lower tiers on death (2 -> 1 -> 0)
    Virus { tier: u8 },
    /// Snipes toward the hero
    Bug,
    /// Lays glitch hazards on a timer
    Worm { drop_timer: f32 },
}

impl Behavior {
    pub fn species(&self) -> Species {
        match self {
            Behavior::Virus { .. } => Species::Virus,
            Behavior::Bug => Species::Bug,
            Behavior::Worm { .. } => Species::Worm,
        }
    }
}

/// Wire-bound motion shared by every enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Cardinal travel direction
    pub dir: Vec2,
    pub speed: f32,
    pub turn_bias: f32,
}

impl Motion {
    /// Move along the wire, bounce at the bounds, maybe turn at a junction
    pub fn step<R: Rng + ?Sized>(&mut self, pos: &mut Vec2, dt: f32, rng: &mut R) {
        *pos = snap_to_wire(*pos, self.dir);
        *pos += self.dir * self.speed * dt;

        let (lo_x, hi_x) = (FIELD_MARGIN, FIELD_W - FIELD_MARGIN);
        let (lo_y, hi_y) = (FIELD_MARGIN, FIELD_H - FIELD_MARGIN);
        if pos.x < lo_x || pos.x > hi_x {
            pos.x = pos.x.clamp(lo_x, hi_x);
            self.dir.x = -self.dir.x;
            *pos = snap_to_wire(*pos, self.dir);
        }
        if pos.y < lo_y || pos.y > hi_y {
            pos.y = pos.y.clamp(lo_y, hi_y);
            self.dir.y = -self.dir.y;
            *pos = snap_to_wire(*pos, self.dir);
        }

        // Rate scales with dt so the chance grows with time spent near the junction
        if is_at_intersection(*pos) && rng.random::<f32>() < self.turn_bias * dt * NOMINAL_FPS {
            self.dir = random_turn(self.dir, rng);
            *pos = snap_to_wire(*pos, self.dir);
        }
    }
}

/// What the core exposes to enemies while they update
#[derive(Debug, Clone, Copy)]
pub struct WorldView {
    pub hero_pos: Vec2,
}

/// Side effects of one enemy update
#[derive(Debug, Clone, Default)]
pub struct EnemyOutput {
    pub surges: Vec<Surge>,
    /// Hazard dropped at this position
    pub glitch: Option<Vec2>,
}

impl EnemyOutput {
    pub fn fired(&self) -> bool {
        !self.surges.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub hp: i32,
    pub motion: Motion,
    /// Seconds until next volley
    pub fire_timer: f32,
    /// Mitosis lockout (s)
    pub mitosis_cooldown: f32,
    pub behavior: Behavior,
}

impl Enemy {
    fn with_behavior<R: Rng + ?Sized>(pos: Vec2, radius: f32, hp: i32, behavior: Behavior, rng: &mut R) -> Self {
        let species = behavior.species();
        Self {
            pos,
            radius,
            hp,
            motion: Motion {
                dir: random_cardinal(rng),
                speed: species.speed(),
                turn_bias: species.turn_bias(),
            },
            fire_timer: random_between(species.fire_cooldown(), rng),
            mitosis_cooldown: 0.0,
            behavior,
        }
    }

    pub fn virus<R: Rng + ?Sized>(pos: Vec2, tier: u8, rng: &mut R) -> Self {
        let tier = tier.min(VIRUS_MAX_TIER);
        let (radius, hp) = match tier {
            2 => (VIRUS_BASE_RADIUS, 3),
            1 => (VIRUS_BASE_RADIUS - 6.0, 2),
            _ => (VIRUS_BASE_RADIUS - 10.0, 1),
        };
        Self::with_behavior(pos, radius, hp, Behavior::Virus { tier }, rng)
    }

    pub fn bug<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        Self::with_behavior(pos, BUG_RADIUS, BUG_HP, Behavior::Bug, rng)
    }

    pub fn worm<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        let drop_timer = random_between(WORM_FIRST_DROP, rng);
        Self::with_behavior(pos, WORM_RADIUS, WORM_HP, Behavior::Worm { drop_timer }, rng)
    }

    /// Fresh enemy of a species (Viruses start at full tier)
    pub fn spawn<R: Rng + ?Sized>(species: Species, pos: Vec2, rng: &mut R) -> Self {
        match species {
            Species::Virus => Self::virus(pos, VIRUS_MAX_TIER, rng),
            Species::Bug => Self::bug(pos, rng),
            Species::Worm => Self::worm(pos, rng),
        }
    }

    pub fn species(&self) -> Species {
        self.behavior.species()
    }

    /// Mitosis child: same species, and a Virus keeps its tier
    pub fn offspring<R: Rng + ?Sized>(&self, pos: Vec2, rng: &mut R) -> Self {
        match self.behavior {
            Behavior::Virus { tier } => Self::virus(pos, tier, rng),
            _ => Self::spawn(self.species(), pos, rng),
        }
    }

    pub fn can_divide(&self) -> bool {
        self.mitosis_cooldown <= 0.0
    }

    /// Apply damage. Returns true if lethal.
    pub fn take_damage(&mut self, dmg: i32) -> bool {
        self.hp -= dmg;
        self.hp <= 0
    }

    /// Move, tick timers and fire when due
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, world: &WorldView, rng: &mut R) -> EnemyOutput {
        self.motion.step(&mut self.pos, dt, rng);
        self.mitosis_cooldown = (self.mitosis_cooldown - dt).max(0.0);

        let mut out = EnemyOutput::default();

        if let Behavior::Worm { drop_timer } = &mut self.behavior {
            *drop_timer -= dt;
            if *drop_timer <= 0.0 {
                out.glitch = Some(self.pos);
                *drop_timer = random_between(WORM_DROP_INTERVAL, rng);
            }
        }

        self.fire_timer -= dt;
        if self.fire_timer <= 0.0 {
            self.volley(world, &mut out.surges);
            self.fire_timer = random_between(self.species().fire_cooldown(), rng);
        }

        out
    }

    fn volley(&self, world: &WorldView, shots: &mut Vec<Surge>) {
        match self.behavior {
            Behavior::Virus { .. } => {
                for dir in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
                    shots.push(Surge::enemy(self.pos, dir, SURGE_SPEED_ENEMY));
                }
            }
            Behavior::Bug => {
                // Aim is taken at fire time only
                let dir = to_cardinal(world.hero_pos - self.pos);
                shots.push(Surge::enemy(self.pos, dir, SURGE_SPEED_ENEMY * BUG_SURGE_SPEED_MULT));
            }
            Behavior::Worm { .. } => {
                let axis = if is_horizontal(self.motion.dir) {
                    [Vec2::X, Vec2::NEG_X]
                } else {
                    [Vec2::Y, Vec2::NEG_Y]
                };
                for dir in axis {
                    shots.push(Surge::enemy(self.pos, dir, SURGE_SPEED_ENEMY * WORM_SURGE_SPEED_MULT));
                }
            }
        }
    }

    /// Death-spawns. Only Viruses above tier 0 split, into two of tier - 1.
    pub fn on_death<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Enemy> {
        match self.behavior {
            Behavior::Virus { tier } if tier > 0 => (0..2)
                .map(|_| Self::virus(self.pos + jitter(VIRUS_SPLIT_JITTER, rng), tier - 1, rng))
                .collect(),
            _ => Vec::new(),
        }
    }
}
