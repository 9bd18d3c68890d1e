//! Collision tests and the surge-vs-surge cancellation pass
//!
//! All contact is plain circle overlap (sum of radii). There is no swept
//! test, so a fast surge can tunnel through a thin target on a long frame.

use glam::Vec2;

use super::surge::{Faction, Surge};
use crate::consts::CANCEL_SLACK;

/// Circle-circle contact, inclusive
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) <= ra + rb
}

/// Which side(s) of an opposing pair are destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Both,
    /// Only the first surge dies
    First,
    /// Only the second surge dies
    Second,
}

/// Outcome for a pair, or `None` if the factions don't oppose.
///
/// Overclock surges pierce: only their hostile partner dies.
pub fn cancel_outcome(a: Faction, b: Faction) -> Option<CancelOutcome> {
    if !a.opposes(b) {
        return None;
    }
    Some(match (a, b) {
        (Faction::Overclock, _) => CancelOutcome::Second,
        (_, Faction::Overclock) => CancelOutcome::First,
        _ => CancelOutcome::Both,
    })
}

/// One resolved cancellation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cancel {
    /// Midpoint of the pair
    pub at: Vec2,
    /// A plain player surge took part
    pub feeds_meter: bool,
}

/// Resolve every opposing surge pair in contact and drop the dead.
///
/// Pairs are scanned in index order. A surge killed as the later member of a
/// pair is skipped from then on; the earlier member keeps pairing with the
/// rest of the field, so one surge can cancel several hostiles.
pub fn cancel_surges(surges: &mut Vec<Surge>) -> Vec<Cancel> {
    let n = surges.len();
    let mut dead = vec![false; n];
    let mut cancels = Vec::new();

    for i in 0..n {
        if dead[i] {
            continue;
        }
        for j in (i + 1)..n {
            if dead[j] {
                continue;
            }
            let (a, b) = (&surges[i], &surges[j]);
            let Some(outcome) = cancel_outcome(a.owner, b.owner) else {
                continue;
            };
            if !circles_touch(a.pos, a.radius + CANCEL_SLACK, b.pos, b.radius) {
                continue;
            }
            match outcome {
                CancelOutcome::Both => {
                    dead[i] = true;
                    dead[j] = true;
                }
                CancelOutcome::First => dead[i] = true,
                CancelOutcome::Second => dead[j] = true,
            }
            cancels.push(Cancel {
                at: (a.pos + b.pos) * 0.5,
                feeds_meter: a.owner == Faction::Player || b.owner == Faction::Player,
            });
        }
    }

    if !cancels.is_empty() {
        let mut idx = 0;
        surges.retain(|_| {
            let keep = !dead[idx];
            idx += 1;
            keep
        });
    }
    cancels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(owner: Faction, x: f32) -> Surge {
        let pos = Vec2::new(x, 96.0);
        match owner {
            Faction::Overclock => Surge::overclock(pos, Vec2::X),
            _ => Surge::new(owner, pos, Vec2::X, 100.0),
        }
    }

    #[test]
    fn test_outcome_table() {
        use Faction::*;
        assert_eq!(cancel_outcome(Player, Enemy), Some(CancelOutcome::Both));
        assert_eq!(cancel_outcome(Natural, Player), Some(CancelOutcome::Both));
        assert_eq!(cancel_outcome(Overclock, Enemy), Some(CancelOutcome::Second));
        assert_eq!(cancel_outcome(Natural, Overclock), Some(CancelOutcome::First));
        assert_eq!(cancel_outcome(Player, Overclock), None);
        assert_eq!(cancel_outcome(Enemy, Natural), None);
    }

    #[test]
    fn test_player_vs_enemy_both_die() {
        let mut surges = vec![at(Faction::Player, 100.0), at(Faction::Enemy, 105.0)];
        let cancels = cancel_surges(&mut surges);
        assert_eq!(cancels.len(), 1);
        assert!(cancels[0].feeds_meter);
        assert!(surges.is_empty());
    }

    #[test]
    fn test_overclock_pierces_hostiles() {
        let mut surges = vec![
            at(Faction::Natural, 100.0),
            at(Faction::Overclock, 104.0),
            at(Faction::Enemy, 110.0),
        ];
        let cancels = cancel_surges(&mut surges);
        assert_eq!(cancels.len(), 2);
        assert!(cancels.iter().all(|c| !c.feeds_meter));
        assert_eq!(surges.len(), 1);
        assert_eq!(surges[0].owner, Faction::Overclock);
    }

    #[test]
    fn test_player_surge_cancels_every_hostile_in_reach() {
        let mut surges = vec![
            at(Faction::Player, 100.0),
            at(Faction::Enemy, 102.0),
            at(Faction::Natural, 104.0),
        ];
        let cancels = cancel_surges(&mut surges);
        assert_eq!(cancels.len(), 2);
        assert!(cancels.iter().all(|c| c.feeds_meter));
        assert!(surges.is_empty());
    }

    #[test]
    fn test_dead_later_surge_skipped() {
        // Enemy@102 dies with the first player surge and can't take the second
        let mut surges = vec![
            at(Faction::Player, 100.0),
            at(Faction::Enemy, 102.0),
            at(Faction::Player, 104.0),
        ];
        let cancels = cancel_surges(&mut surges);
        assert_eq!(cancels.len(), 1);
        assert_eq!(surges.len(), 1);
        assert_eq!(surges[0].pos.x, 104.0);
    }

    #[test]
    fn test_contact_slack() {
        // radii 5 + 5, plus 1 slack
        let mut near = vec![at(Faction::Player, 100.0), at(Faction::Enemy, 111.0)];
        assert_eq!(cancel_surges(&mut near).len(), 1);
        let mut far = vec![at(Faction::Player, 100.0), at(Faction::Enemy, 111.5)];
        assert!(cancel_surges(&mut far).is_empty());
        assert_eq!(far.len(), 2);
    }

    #[test]
    fn test_same_side_ignored() {
        let mut surges = vec![at(Faction::Player, 100.0), at(Faction::Overclock, 100.0)];
        assert!(cancel_surges(&mut surges).is_empty());
        assert_eq!(surges.len(), 2);
    }
}
