//! Overclock meter: bounded charge that gates the blast

use serde::{Deserialize, Serialize};

/// Charge accumulated from cancels and hits, clamped to `[0, cap]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverclockMeter {
    charge: u32,
    cap: u32,
}

impl OverclockMeter {
    pub fn new(cap: u32) -> Self {
        debug_assert!(cap > 0, "meter cap must be positive");
        Self { charge: 0, cap }
    }

    pub fn charge(&self) -> u32 {
        self.charge
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Add charge, saturating at the cap
    pub fn add(&mut self, amount: u32) {
        self.charge = self.charge.saturating_add(amount).min(self.cap);
    }

    pub fn is_full(&self) -> bool {
        self.charge >= self.cap
    }

    /// Empty the meter (blast discharge)
    pub fn drain(&mut self) {
        self.charge = 0;
    }

    /// Fill fraction in [0, 1] for the HUD
    pub fn fraction(&self) -> f32 {
        if self.cap == 0 {
            return 0.0;
        }
        self.charge as f32 / self.cap as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_and_drain() {
        let mut m = OverclockMeter::new(200);
        m.add(8);
        m.add(12);
        assert_eq!(m.charge(), 20);
        assert!(!m.is_full());
        m.add(500);
        assert_eq!(m.charge(), 200);
        assert!(m.is_full());
        assert_eq!(m.fraction(), 1.0);
        m.drain();
        assert_eq!(m.charge(), 0);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_cap(cap in 1u32..1000, adds in proptest::collection::vec(0u32..u32::MAX, 0..32)) {
            let mut m = OverclockMeter::new(cap);
            for a in adds {
                m.add(a);
                prop_assert!(m.charge() <= cap);
            }
        }
    }
}
