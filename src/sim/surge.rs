//! Surges: grid-locked, time-limited projectiles

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{snap_to_wire, to_cardinal};
use crate::consts::*;

/// Who fired a surge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Hero's normal fire
    Player,
    /// Enemy volleys
    Enemy,
    /// Emitter trains
    Natural,
    /// Hero's overclock blast
    Overclock,
}

impl Faction {
    /// Player or overclock surges
    #[inline]
    pub fn is_friendly(self) -> bool {
        matches!(self, Faction::Player | Faction::Overclock)
    }

    /// Enemy or natural surges
    #[inline]
    pub fn is_hostile(self) -> bool {
        matches!(self, Faction::Enemy | Faction::Natural)
    }

    /// True if one side is friendly and the other hostile
    #[inline]
    pub fn opposes(self, other: Faction) -> bool {
        (self.is_friendly() && other.is_hostile()) || (self.is_hostile() && other.is_friendly())
    }
}

/// A projectile on the circuit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surge {
    pub owner: Faction,
    pub pos: Vec2,
    /// Cardinal unit direction
    pub dir: Vec2,
    pub speed: f32,
    /// Seconds left to live
    pub ttl: f32,
    pub radius: f32,
    pub damage: i32,
    /// Survives hits and overclock cancels
    pub pierce: bool,
    /// Recent positions, oldest first (rendering only)
    pub trail: VecDeque<Vec2>,
}

impl Surge {
    /// Build a surge; `dir` is cardinalized.
    pub fn new(owner: Faction, pos: Vec2, dir: Vec2, speed: f32) -> Self {
        Self {
            owner,
            pos,
            dir: to_cardinal(dir),
            speed,
            ttl: SURGE_TTL,
            radius: SURGE_RADIUS,
            damage: 1,
            pierce: false,
            trail: VecDeque::with_capacity(SURGE_TRAIL_LENGTH),
        }
    }

    /// Hero's normal shot
    pub fn player(pos: Vec2, dir: Vec2) -> Self {
        Self::new(Faction::Player, pos, dir, SURGE_SPEED_PLAYER)
    }

    /// Enemy shot at `speed`
    pub fn enemy(pos: Vec2, dir: Vec2, speed: f32) -> Self {
        Self::new(Faction::Enemy, pos, dir, speed)
    }

    /// Natural train packet
    pub fn natural(pos: Vec2, dir: Vec2) -> Self {
        Self::new(Faction::Natural, pos, dir, SURGE_SPEED_NATURAL)
    }

    /// One arm of the overclock blast
    pub fn overclock(pos: Vec2, dir: Vec2) -> Self {
        Self {
            ttl: OC_SURGE_TTL,
            radius: OC_SURGE_RADIUS,
            damage: OC_SURGE_DAMAGE,
            pierce: true,
            ..Self::new(Faction::Overclock, pos, dir, OC_SURGE_SPEED)
        }
    }

    /// Move one frame. Returns false once expired or off the playfield.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.trail.len() == SURGE_TRAIL_LENGTH {
            self.trail.pop_front();
        }
        self.trail.push_back(self.pos);

        self.pos += self.dir * self.speed * dt;
        self.ttl -= dt;
        self.pos = snap_to_wire(self.pos, self.dir);

        self.ttl > 0.0 && self.in_bounds()
    }

    /// Inside the playfield plus the overshoot margin
    pub fn in_bounds(&self) -> bool {
        let m = SURGE_OOB_MARGIN;
        self.pos.x > -m && self.pos.x < FIELD_W + m && self.pos.y > -m && self.pos.y < FIELD_H + m
    }
}
