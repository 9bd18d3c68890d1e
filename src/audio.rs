//! Audio cue plumbing
//!
//! The core only raises `GameEvent`s. This module turns them into sound
//! effects with a procedural tone recipe and hands them to whatever backend
//! the host installs. No backend means silence, never an error.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Title screen sting
    Menu,
    /// Hero shot
    Fire,
    /// Enemy volley
    EnemyFire,
    /// Two surges annihilate
    Cancel,
    /// Enemy damaged
    Hit,
    /// Hero damaged
    Hurt,
    /// Enemy destroyed
    Explode,
    /// Overclock blast
    OverclockOn,
    /// Sector stabilized
    Win,
    /// Hero destroyed
    Lose,
    /// Natural train packet
    Natural,
    /// Mitosis
    Clone,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Menu => SoundEffect::Menu,
            GameEvent::Fire => SoundEffect::Fire,
            GameEvent::EnemyFire => SoundEffect::EnemyFire,
            GameEvent::Cancel => SoundEffect::Cancel,
            GameEvent::Hit => SoundEffect::Hit,
            GameEvent::Hurt => SoundEffect::Hurt,
            GameEvent::Explode => SoundEffect::Explode,
            GameEvent::OverclockOn => SoundEffect::OverclockOn,
            GameEvent::Win => SoundEffect::Win,
            GameEvent::Lose => SoundEffect::Lose,
            GameEvent::Natural => SoundEffect::Natural,
            GameEvent::Clone => SoundEffect::Clone,
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A single swept oscillator with a linear gain envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Waveform,
    pub freq_start: f32,
    pub freq_end: f32,
    /// Seconds
    pub duration: f32,
    /// Peak gain before master/sfx scaling
    pub gain: f32,
}

impl SoundEffect {
    /// Procedural recipe for this effect
    pub fn tone(self) -> Tone {
        let (wave, freq_start, freq_end, duration, gain) = match self {
            SoundEffect::Menu => (Waveform::Triangle, 220.0, 440.0, 0.35, 0.25),
            SoundEffect::Fire => (Waveform::Square, 880.0, 660.0, 0.06, 0.12),
            SoundEffect::EnemyFire => (Waveform::Sawtooth, 330.0, 220.0, 0.08, 0.10),
            SoundEffect::Cancel => (Waveform::Triangle, 1200.0, 1600.0, 0.07, 0.18),
            SoundEffect::Hit => (Waveform::Square, 520.0, 380.0, 0.05, 0.15),
            SoundEffect::Hurt => (Waveform::Sawtooth, 180.0, 90.0, 0.25, 0.30),
            SoundEffect::Explode => (Waveform::Sawtooth, 140.0, 40.0, 0.35, 0.35),
            SoundEffect::OverclockOn => (Waveform::Square, 110.0, 880.0, 0.6, 0.35),
            SoundEffect::Win => (Waveform::Triangle, 523.0, 1046.0, 0.5, 0.30),
            SoundEffect::Lose => (Waveform::Sine, 330.0, 82.0, 0.9, 0.35),
            SoundEffect::Natural => (Waveform::Sine, 1400.0, 1400.0, 0.03, 0.05),
            SoundEffect::Clone => (Waveform::Triangle, 300.0, 600.0, 0.12, 0.15),
        };
        Tone {
            wave,
            freq_start,
            freq_end,
            duration,
            gain,
        }
    }
}

/// Sound backend installed by the host
pub trait AudioSink {
    /// Start `tone` at `volume` (already scaled, in (0, 1])
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32);
}

/// Backend that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: u64,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32) {
        self.played += 1;
        log::trace!(
            "sfx {:?}: {:?} {:.0}->{:.0}Hz {:.2}s vol {:.2}",
            effect,
            tone.wave,
            tone.freq_start,
            tone.freq_end,
            tone.duration,
            volume
        );
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(sink: Option<Box<dyn AudioSink>>) -> Self {
        if sink.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Pick up volume and mute from player settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect. Silent when muted or without a backend.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let tone = effect.tone();
        sink.play(effect, tone, tone.gain * vol);
    }

    /// Play every cue drained from the core this frame
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for &event in events {
            self.play(event.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records what reached the backend
    struct Capture(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl AudioSink for Capture {
        fn play(&mut self, effect: SoundEffect, _tone: Tone, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    fn capturing() -> (AudioManager, Rc<RefCell<Vec<(SoundEffect, f32)>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager = AudioManager::new(Some(Box::new(Capture(log.clone()))));
        (manager, log)
    }

    #[test]
    fn test_events_map_to_effects() {
        let (mut audio, log) = capturing();
        audio.play_events(&[GameEvent::Fire, GameEvent::OverclockOn, GameEvent::Clone]);
        let played: Vec<_> = log.borrow().iter().map(|(e, _)| *e).collect();
        assert_eq!(
            played,
            vec![SoundEffect::Fire, SoundEffect::OverclockOn, SoundEffect::Clone]
        );
    }

    #[test]
    fn test_mute_silences() {
        let (mut audio, log) = capturing();
        audio.set_muted(true);
        audio.play(SoundEffect::Explode);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_volume_scaling() {
        let (mut audio, log) = capturing();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        audio.play(SoundEffect::Hurt);
        let (_, vol) = log.borrow()[0];
        assert!((vol - SoundEffect::Hurt.tone().gain * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_missing_backend_is_silent() {
        let mut audio = AudioManager::default();
        assert!(!audio.is_enabled());
        audio.play_events(&[GameEvent::Win, GameEvent::Lose]);
    }

    #[test]
    fn test_settings_applied() {
        let (mut audio, log) = capturing();
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        audio.apply_settings(&settings);
        audio.play(SoundEffect::Win);
        assert!(log.borrow().is_empty());
    }
}
