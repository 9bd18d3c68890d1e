//! Overclock - a neon circuit-board arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation core (entities, surges, collisions, game state machine)
//! - `audio`: Cue sink plumbing (fire-and-forget, optional backend)
//! - `settings`: Presentation preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate the balance numbers were authored against
    pub const NOMINAL_FPS: f32 = 60.0;
    /// Largest frame delta the core will integrate in one update
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (screen space, y grows downward)
    pub const FIELD_W: f32 = 960.0;
    pub const FIELD_H: f32 = 540.0;
    /// Entities are clamped this far inside the playfield edge
    pub const FIELD_MARGIN: f32 = 12.0;
    /// Surges may overshoot the playfield by this much before expiring
    pub const SURGE_OOB_MARGIN: f32 = 20.0;

    /// Circuit wire spacing
    pub const GRID: f32 = 48.0;
    /// Intersection tolerance in px
    pub const JUNC_TOL: f32 = 6.0;

    /// Hero defaults
    pub const HERO_RADIUS: f32 = 8.0;
    pub const HERO_SPEED: f32 = 260.0;
    /// Seconds of invulnerability after a hit
    pub const HERO_IFRAMES: f32 = 1.0;
    pub const HERO_SHOT_COOLDOWN: f32 = 0.22;
    pub const HERO_MAX_HEALTH: u8 = 5;

    /// Surge (projectile) defaults
    pub const SURGE_RADIUS: f32 = 5.0;
    pub const SURGE_TTL: f32 = 1.9;
    pub const SURGE_TRAIL_LENGTH: usize = 12;
    pub const SURGE_SPEED_PLAYER: f32 = 560.0;
    pub const SURGE_SPEED_ENEMY: f32 = 460.0;
    pub const SURGE_SPEED_NATURAL: f32 = 520.0;
    /// Extra slack on surge-vs-surge contact
    pub const CANCEL_SLACK: f32 = 1.0;

    /// Overclock meter
    pub const OC_FILL_PER_CANCEL: u32 = 8;
    pub const OC_FILL_PER_HIT: u32 = 12;
    pub const OC_MAX: u32 = 200;
    /// Overclock blast surge
    pub const OC_SURGE_RADIUS: f32 = 10.0;
    pub const OC_SURGE_SPEED: f32 = 700.0;
    pub const OC_SURGE_TTL: f32 = 1.6;
    pub const OC_SURGE_DAMAGE: i32 = 2;
    /// Shake window while the blast is out
    pub const OC_BLAST_SHAKE_TIME: f32 = 0.9;
    pub const OC_BLAST_SHAKE_STRENGTH: f32 = 6.0;

    /// Virus (tiered splitter)
    pub const VIRUS_BASE_RADIUS: f32 = 22.0;
    pub const VIRUS_SPEED: f32 = 90.0;
    pub const VIRUS_SHOOT_CD: (f32, f32) = (1.3, 1.9);
    pub const VIRUS_TURN_BIAS: f32 = 0.18;
    pub const VIRUS_MAX_TIER: u8 = 2;
    /// Death-spawn jitter around the parent
    pub const VIRUS_SPLIT_JITTER: f32 = 10.0;

    /// Bug (fast sniper)
    pub const BUG_RADIUS: f32 = 14.0;
    pub const BUG_HP: i32 = 2;
    pub const BUG_SPEED: f32 = 150.0;
    pub const BUG_SHOOT_CD: (f32, f32) = (0.85, 1.15);
    pub const BUG_TURN_BIAS: f32 = 0.45;
    pub const BUG_SURGE_SPEED_MULT: f32 = 1.05;

    /// Worm (hazard layer)
    pub const WORM_RADIUS: f32 = 18.0;
    pub const WORM_HP: i32 = 4;
    pub const WORM_SPEED: f32 = 110.0;
    pub const WORM_SHOOT_CD: (f32, f32) = (1.8, 2.4);
    pub const WORM_TURN_BIAS: f32 = 0.22;
    pub const WORM_SURGE_SPEED_MULT: f32 = 0.95;
    pub const WORM_FIRST_DROP: (f32, f32) = (0.25, 0.55);
    pub const WORM_DROP_INTERVAL: (f32, f32) = (0.35, 0.65);

    /// Mitosis
    pub const MITOSIS_JITTER: f32 = 6.0;
    pub const MITOSIS_COOLDOWN: f32 = 0.75;
    pub const MAX_ENEMIES_ON_FIELD: usize = 18;

    /// Glitch hazards
    pub const GLITCH_DECAY: f32 = 0.5;
    /// Added to hero radius for hazard contact
    pub const GLITCH_REACH: f32 = 7.0;

    /// Natural surge trains
    pub const NAT_SURGE_EVERY: (f32, f32) = (2.4, 3.8);
    pub const NAT_TRAIN_SHOTS: (u32, u32) = (6, 10);
    pub const NAT_PACKET_SPACING: f32 = 0.07;

    /// Sector roster (virus, bug, worm)
    pub const SECTOR_START_ENEMIES: (u32, u32, u32) = (2, 2, 1);

    /// Scoring
    pub const SCORE_HIT_PLAYER: u64 = 45;
    pub const SCORE_HIT_OVERCLOCK: u64 = 35;
    pub const SCORE_KILL_PLAYER: u64 = 120;
    pub const SCORE_KILL_OVERCLOCK: u64 = 90;

    /// Screen shake (cosmetic)
    pub const SHAKE_MAX: f32 = 12.0;
    pub const SHAKE_DECAY: f32 = 40.0;
    pub const SHAKE_SHOOT: f32 = 1.0;
    pub const SHAKE_ENEMY_VOLLEY: f32 = 2.0;
    pub const SHAKE_HURT_SURGE: f32 = 6.0;
    pub const SHAKE_HURT_GLITCH: f32 = 5.0;
}

/// Clamp a point into the playfield, `margin` px inside each edge
#[inline]
pub fn clamp_to_field(pos: glam::Vec2, margin: f32) -> glam::Vec2 {
    use consts::{FIELD_H, FIELD_W};
    glam::Vec2::new(
        pos.x.clamp(margin, FIELD_W - margin),
        pos.y.clamp(margin, FIELD_H - margin),
    )
}

/// Uniform sample from an inclusive `(min, max)` range
#[inline]
pub fn random_between<R: rand::Rng + ?Sized>(range: (f32, f32), rng: &mut R) -> f32 {
    let (lo, hi) = range;
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..=hi)
}

/// Symmetric jitter vector with components in `[-amount, amount]`
#[inline]
pub fn jitter<R: rand::Rng + ?Sized>(amount: f32, rng: &mut R) -> glam::Vec2 {
    glam::Vec2::new(
        random_between((-amount, amount), rng),
        random_between((-amount, amount), rng),
    )
}

/// Playfield centre (hero spawn point)
#[inline]
pub fn field_center() -> glam::Vec2 {
    glam::Vec2::new(consts::FIELD_W / 2.0, consts::FIELD_H / 2.0)
}
