//! Session state and core simulation types
//!
//! One `GameState` per running session. It owns every live entity; hosts
//! only read it (via `snapshot`) between updates.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use super::emitter::{Axis, Emitter};
use super::enemy::{Enemy, Species};
use super::grid::random_grid_pos;
use super::hero::Hero;
use super::surge::Surge;
use crate::consts::GLITCH_DECAY;
use crate::random_between;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Play,
    /// Frozen mid-sector
    Paused,
    /// Hero destroyed, waiting for restart
    GameOver,
    /// Sector purged, waiting for advance
    SectorClear,
}

/// Fire-and-forget cues raised during an update, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    Menu,
    Fire,
    EnemyFire,
    Cancel,
    Hit,
    Hurt,
    Explode,
    OverclockOn,
    Win,
    Lose,
    Natural,
    Clone,
}

impl GameEvent {
    /// Cue name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Menu => "menu",
            GameEvent::Fire => "fire",
            GameEvent::EnemyFire => "enemyfire",
            GameEvent::Cancel => "cancel",
            GameEvent::Hit => "hit",
            GameEvent::Hurt => "hurt",
            GameEvent::Explode => "explode",
            GameEvent::OverclockOn => "over_on",
            GameEvent::Win => "win",
            GameEvent::Lose => "lose",
            GameEvent::Natural => "natural",
            GameEvent::Clone => "clone",
        }
    }
}

/// Stationary hazard left by a Worm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glitch {
    pub pos: Vec2,
    /// 1.0 when dropped, removed at 0
    pub intensity: f32,
}

impl Glitch {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            intensity: 1.0,
        }
    }

    /// Returns false once fully decayed
    pub fn decay(&mut self, dt: f32) -> bool {
        self.intensity -= dt * GLITCH_DECAY;
        self.intensity > 0.0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// 1-based sector index
    pub sector: u32,
    pub score: u64,
    pub high_score: u64,
    pub hero: Hero,
    pub enemies: Vec<Enemy>,
    pub surges: Vec<Surge>,
    pub glitches: Vec<Glitch>,
    /// Cosmetic layer (particles, shake)
    pub effects: Effects,
    pub emit_row: Emitter,
    pub emit_col: Emitter,
    /// Countdown to the next natural train
    pub natural_timer: f32,
    /// Remaining overclock blast window (s)
    pub blast_timer: f32,
    pub tuning: Tuning,
    /// Simulated frames in `Play`
    pub frames: u64,
    /// Cues raised since the last drain
    pub events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
}

impl GameState {
    /// New session on the menu, default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "tuning must be validated before use");
        let mut rng = Pcg32::seed_from_u64(seed);
        let natural_timer = random_between(tuning.natural_interval, &mut rng);
        Self {
            seed,
            phase: GamePhase::Menu,
            sector: 1,
            score: 0,
            high_score: 0,
            hero: Hero::new(&tuning),
            enemies: Vec::new(),
            surges: Vec::new(),
            glitches: Vec::new(),
            effects: Effects::new(seed),
            emit_row: Emitter::new(Axis::Row),
            emit_col: Emitter::new(Axis::Column),
            natural_timer,
            blast_timer: 0.0,
            tuning,
            frames: 0,
            events: vec![GameEvent::Menu],
            rng,
        }
    }

    /// Apply presentation preferences that the core honors
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.effects.shake_enabled = settings.effective_screen_shake();
        self.effects.particles_enabled = settings.particles;
    }

    /// Simulation RNG
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all cues raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fresh run from sector 1
    pub fn start_run(&mut self) {
        self.score = 0;
        self.sector = 1;
        let (v, b, w) = self.tuning.roster_for_sector(1);
        log::info!("Run started (seed {})", self.seed);
        self.build_sector(v, b, w);
        self.phase = GamePhase::Play;
    }

    /// Advance to the next sector after a clear
    pub fn next_sector(&mut self) {
        self.sector += 1;
        let (v, b, w) = self.tuning.roster_for_sector(self.sector);
        self.build_sector(v, b, w);
        self.phase = GamePhase::Play;
    }

    /// Populate a sector: fresh hero, empty field, `v + b + w` enemies
    pub fn build_sector(&mut self, n_virus: u32, n_bug: u32, n_worm: u32) {
        self.enemies.clear();
        let roster = [
            (Species::Virus, n_virus),
            (Species::Bug, n_bug),
            (Species::Worm, n_worm),
        ];
        'roster: for (species, count) in roster {
            for _ in 0..count {
                if !self.has_room(0) {
                    log::warn!(
                        "Sector {} roster truncated at the cap of {}",
                        self.sector,
                        self.tuning.max_enemies
                    );
                    break 'roster;
                }
                let pos = random_grid_pos(&mut self.rng);
                let enemy = Enemy::spawn(species, pos, &mut self.rng);
                self.enemies.push(enemy);
            }
        }
        self.surges.clear();
        self.glitches.clear();
        self.effects.clear();
        self.hero = Hero::new(&self.tuning);
        self.natural_timer = random_between(self.tuning.natural_interval, &mut self.rng);
        self.emit_row.deactivate();
        self.emit_col.deactivate();
        self.blast_timer = 0.0;

        log::info!(
            "Sector {}: {} virus, {} bug, {} worm",
            self.sector,
            n_virus,
            n_bug,
            n_worm
        );
    }

    pub fn record_high_score(&mut self) {
        self.high_score = self.high_score.max(self.score);
    }

    /// True while another enemy fits under the cap, counting `pending` spawns
    pub fn has_room(&self, pending: usize) -> bool {
        self.enemies.len() + pending < self.tuning.max_enemies
    }

    pub fn spawn_glitch(&mut self, pos: Vec2) {
        self.glitches.push(Glitch::new(pos));
    }

    /// Either emitter mid-train
    pub fn train_active(&self) -> bool {
        self.emit_row.active || self.emit_col.active
    }

    /// Blast shake window still open
    pub fn blast_active(&self) -> bool {
        self.blast_timer > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::SparkColor;

    #[test]
    fn test_new_session_on_menu() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.enemies.is_empty());
        assert_eq!(state.drain_events(), vec![GameEvent::Menu]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_build_sector_counts_and_clears() {
        let mut state = GameState::new(5);
        state.surges.push(Surge::player(Vec2::new(96.0, 96.0), Vec2::X));
        state.spawn_glitch(Vec2::new(10.0, 10.0));
        state.build_sector(3, 1, 2);
        assert_eq!(state.enemies.len(), 6);
        let count = |s: Species| state.enemies.iter().filter(|e| e.species() == s).count();
        assert_eq!(count(Species::Virus), 3);
        assert_eq!(count(Species::Bug), 1);
        assert_eq!(count(Species::Worm), 2);
        assert!(state.surges.is_empty());
        assert!(state.glitches.is_empty());
        assert!(state.effects.particles.is_empty());
        assert!(!state.train_active());
    }

    #[test]
    fn test_next_sector_roster() {
        let mut state = GameState::new(5);
        state.start_run();
        assert_eq!(state.enemies.len(), 5);
        state.next_sector();
        assert_eq!(state.sector, 2);
        assert_eq!(state.enemies.len(), 7);
        state.next_sector();
        assert_eq!(state.enemies.len(), 8);
    }

    #[test]
    fn test_roster_truncated_at_cap() {
        let tuning = Tuning {
            max_enemies: 6,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(5, tuning);
        state.build_sector(4, 4, 4);
        assert_eq!(state.enemies.len(), 6);
    }

    #[test]
    fn test_apply_settings_honors_reduced_motion() {
        let mut state = GameState::new(5);
        state.apply_settings(&Settings {
            reduced_motion: true,
            particles: false,
            ..Settings::default()
        });
        state.effects.add_shake(4.0);
        state.effects.spark(Vec2::new(96.0, 96.0), SparkColor::Cancel, 8);
        assert_eq!(state.effects.shake, 0.0);
        assert!(state.effects.particles.is_empty());
    }

    #[test]
    fn test_glitch_decay() {
        let mut g = Glitch::new(Vec2::ZERO);
        assert!(g.decay(1.0));
        assert!(!g.decay(1.0));
    }

    #[test]
    fn test_population_room() {
        let mut state = GameState::new(5);
        state.start_run();
        let cap = state.tuning.max_enemies;
        assert!(state.has_room(cap - state.enemies.len() - 1));
        assert!(!state.has_room(cap - state.enemies.len()));
    }
}
