//! Read-only post-update view for the renderer and HUD

use serde::Serialize;

use super::effects::Particle;
use super::enemy::Enemy;
use super::hero::Hero;
use super::state::{GamePhase, GameState, Glitch};
use super::surge::Surge;

/// Frame-consistent borrow of everything a presenter needs
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameSnapshot<'a> {
    pub phase: GamePhase,
    pub sector: u32,
    pub score: u64,
    pub high_score: u64,
    pub hero: &'a Hero,
    pub enemies: &'a [Enemy],
    pub surges: &'a [Surge],
    pub glitches: &'a [Glitch],
    pub particles: &'a [Particle],
    /// Overclock fill in [0, 1]
    pub meter_fraction: f32,
    pub meter_ready: bool,
    pub blast_active: bool,
    /// Shake magnitude; the renderer picks the offset
    pub shake: f32,
}

impl GameState {
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            phase: self.phase,
            sector: self.sector,
            score: self.score,
            high_score: self.high_score,
            hero: &self.hero,
            enemies: &self.enemies,
            surges: &self.surges,
            glitches: &self.glitches,
            particles: &self.effects.particles,
            meter_fraction: self.hero.meter.fraction(),
            meter_ready: self.hero.meter.is_full(),
            blast_active: self.blast_active(),
            shake: self.effects.shake,
        }
    }
}

/// Counts-only digest, handy for logs and the headless runner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    pub phase: GamePhase,
    pub sector: u32,
    pub score: u64,
    pub high_score: u64,
    pub hero_health: u8,
    pub meter_fraction: f32,
    pub enemies: usize,
    pub surges: usize,
    pub glitches: usize,
}

impl FrameSnapshot<'_> {
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            phase: self.phase,
            sector: self.sector,
            score: self.score,
            high_score: self.high_score,
            hero_health: self.hero.health,
            meter_fraction: self.meter_fraction,
            enemies: self.enemies.len(),
            surges: self.surges.len(),
            glitches: self.glitches.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(77);
        state.start_run();
        let snap = state.snapshot();
        assert_eq!(snap.enemies.len(), 5);
        assert_eq!(snap.meter_fraction, 0.0);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"phase\":\"Play\""));
        let summary = snap.summary();
        assert_eq!(summary.enemies, 5);
        assert_eq!(summary.hero_health, state.tuning.hero_max_health);
    }
}
