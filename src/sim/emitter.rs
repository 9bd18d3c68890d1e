//! Natural surge trains
//!
//! An emitter fires a short burst of natural surges down a single lane,
//! entering from the screen edge. The core keeps at most one train live.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::random_lane;
use super::surge::Surge;
use crate::consts::*;

/// Lane orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal lane, surges run left/right
    Row,
    /// Vertical lane, surges run up/down
    Column,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emitter {
    pub axis: Axis,
    pub active: bool,
    /// Shots left in the current train
    pub remaining: u32,
    /// Time until the next packet
    pub fire_timer: f32,
    /// Lane coordinate (y for rows, x for columns)
    pub lane: f32,
    pub dir: Vec2,
}

impl Emitter {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            active: false,
            remaining: 0,
            fire_timer: 0.0,
            lane: 0.0,
            dir: match axis {
                Axis::Row => Vec2::X,
                Axis::Column => Vec2::Y,
            },
        }
    }

    /// Arm a new train on a random lane
    pub fn schedule<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (lo, hi) = NAT_TRAIN_SHOTS;
        self.active = true;
        self.remaining = rng.random_range(lo..=hi);
        let forward = rng.random_bool(0.5);
        match self.axis {
            Axis::Row => {
                self.lane = random_lane(FIELD_H, rng);
                self.dir = if forward { Vec2::X } else { Vec2::NEG_X };
            }
            Axis::Column => {
                self.lane = random_lane(FIELD_W, rng);
                self.dir = if forward { Vec2::Y } else { Vec2::NEG_Y };
            }
        }
        self.fire_timer = 0.0;
        log::debug!(
            "Natural train armed: {:?} lane {} x{}",
            self.axis,
            self.lane,
            self.remaining
        );
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.remaining = 0;
    }

    /// Edge spawn point for the current lane and direction
    fn entry_point(&self) -> Vec2 {
        match self.axis {
            Axis::Row => {
                let x = if self.dir.x > 0.0 {
                    FIELD_MARGIN
                } else {
                    FIELD_W - FIELD_MARGIN
                };
                Vec2::new(x, self.lane)
            }
            Axis::Column => {
                let y = if self.dir.y > 0.0 {
                    FIELD_MARGIN
                } else {
                    FIELD_H - FIELD_MARGIN
                };
                Vec2::new(self.lane, y)
            }
        }
    }

    /// Tick the train. Returns a packet when one is due.
    pub fn advance(&mut self, dt: f32) -> Option<Surge> {
        if !self.active {
            return None;
        }
        self.fire_timer -= dt;
        let mut packet = None;
        if self.fire_timer <= 0.0 && self.remaining > 0 {
            self.fire_timer = NAT_PACKET_SPACING;
            self.remaining -= 1;
            packet = Some(Surge::natural(self.entry_point(), self.dir));
        }
        if self.remaining == 0 {
            self.active = false;
        }
        packet
    }
}
