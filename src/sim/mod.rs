//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic
//! for a given seed and `dt` sequence:
//! - Seeded RNG only (cosmetic effects draw from their own stream)
//! - Stable iteration order (by index)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod emitter;
pub mod enemy;
pub mod grid;
pub mod hero;
pub mod meter;
pub mod snapshot;
pub mod state;
pub mod surge;
pub mod tick;

pub use collision::{Cancel, CancelOutcome, cancel_outcome, cancel_surges, circles_touch};
pub use effects::{Effects, Particle, SparkColor};
pub use emitter::{Axis, Emitter};
pub use enemy::{Behavior, Enemy, EnemyOutput, Motion, Species, WorldView};
pub use hero::Hero;
pub use meter::OverclockMeter;
pub use snapshot::{FrameSnapshot, SnapshotSummary};
pub use state::{GameEvent, GamePhase, GameState, Glitch};
pub use surge::{Faction, Surge};
pub use tick::{TickInput, tick};
