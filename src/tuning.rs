//! Data-driven game balance
//!
//! Defaults mirror `crate::consts`. Any subset can be overridden from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
    #[error("{field} range is inverted ({min} > {max})")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("sector roster is empty")]
    EmptyRoster,
    #[error("sector roster ({roster}) exceeds population cap ({cap})")]
    RosterOverCap { roster: u32, cap: usize },
}

/// Balance knobs for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub hero_max_health: u8,
    pub hero_fire_cooldown: f32,
    pub meter_cap: u32,
    pub meter_per_cancel: u32,
    pub meter_per_hit: u32,
    /// Hard enemy population cap, mitosis and death-spawns included
    pub max_enemies: usize,
    pub mitosis_cooldown: f32,
    /// Seconds between natural surge trains (min, max)
    pub natural_interval: (f32, f32),
    /// Sector 1 roster (virus, bug, worm)
    pub sector_base: (u32, u32, u32),
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hero_max_health: HERO_MAX_HEALTH,
            hero_fire_cooldown: HERO_SHOT_COOLDOWN,
            meter_cap: OC_MAX,
            meter_per_cancel: OC_FILL_PER_CANCEL,
            meter_per_hit: OC_FILL_PER_HIT,
            max_enemies: MAX_ENEMIES_ON_FIELD,
            mitosis_cooldown: MITOSIS_COOLDOWN,
            natural_interval: NAT_SURGE_EVERY,
            sector_base: SECTOR_START_ENEMIES,
        }
    }
}

impl Tuning {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.hero_max_health == 0 {
            return Err(TuningError::NotPositive {
                field: "hero_max_health",
            });
        }
        if self.meter_cap == 0 {
            return Err(TuningError::NotPositive { field: "meter_cap" });
        }
        if self.max_enemies == 0 {
            return Err(TuningError::NotPositive {
                field: "max_enemies",
            });
        }
        let (min, max) = self.natural_interval;
        if min <= 0.0 {
            return Err(TuningError::NotPositive {
                field: "natural_interval",
            });
        }
        if min > max {
            return Err(TuningError::InvertedRange {
                field: "natural_interval",
                min,
                max,
            });
        }
        let (v, b, w) = self.sector_base;
        let roster = v + b + w;
        if roster == 0 {
            return Err(TuningError::EmptyRoster);
        }
        if roster as usize > self.max_enemies {
            return Err(TuningError::RosterOverCap {
                roster,
                cap: self.max_enemies,
            });
        }
        Ok(())
    }

    /// Enemy roster for a 1-based sector index
    pub fn roster_for_sector(&self, sector: u32) -> (u32, u32, u32) {
        let (v, b, w) = self.sector_base;
        let add = sector / 2;
        let extra_worm = u32::from(sector % 3 == 0);
        (v + add, b + add, w + extra_worm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "max_enemies": 30, "meter_cap": 50 }"#).unwrap();
        assert_eq!(t.max_enemies, 30);
        assert_eq!(t.meter_cap, 50);
        assert_eq!(t.hero_max_health, HERO_MAX_HEALTH);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "meter_cap": 0 }"#),
            Err(TuningError::NotPositive { field: "meter_cap" })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "natural_interval": [4.0, 2.0] }"#),
            Err(TuningError::InvertedRange { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "max_enemies": 3 }"#),
            Err(TuningError::RosterOverCap { .. })
        ));
        assert!(matches!(
            Tuning::from_json("{ nope"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_sector_roster_progression() {
        let t = Tuning::default();
        assert_eq!(t.roster_for_sector(1), (2, 2, 1));
        assert_eq!(t.roster_for_sector(2), (3, 3, 1));
        assert_eq!(t.roster_for_sector(3), (3, 3, 2));
        assert_eq!(t.roster_for_sector(6), (5, 5, 2));
    }

    #[test]
    fn test_json_roundtrip() {
        let t = Tuning::default();
        let json = t.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), t);
    }
}
