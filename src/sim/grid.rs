//! Circuit grid geometry
//!
//! Every gameplay body travels on "wires": the horizontal and vertical grid
//! lines spaced `GRID` apart. Travel directions are always one of the four
//! cardinal unit vectors.

use glam::Vec2;
use rand::Rng;

use crate::consts::{FIELD_H, FIELD_W, GRID, JUNC_TOL};

/// The four cardinal directions (screen space, +y is down)
pub const CARDINALS: [Vec2; 4] = [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y];

/// Nearest grid line coordinate
#[inline]
pub fn nearest_line(v: f32) -> f32 {
    (v / GRID).round() * GRID
}

/// True if `v` lies within the junction tolerance of a grid line
#[inline]
pub fn near_grid(v: f32) -> bool {
    (v - nearest_line(v)).abs() <= JUNC_TOL
}

/// Lock the coordinate perpendicular to `dir` onto the nearest wire.
///
/// Horizontal travel locks `y`, vertical travel locks `x`. A zero direction
/// leaves the point untouched.
pub fn snap_to_wire(pos: Vec2, dir: Vec2) -> Vec2 {
    let mut out = pos;
    if dir.x.abs() > 0.0 {
        out.y = nearest_line(pos.y);
    }
    if dir.y.abs() > 0.0 {
        out.x = nearest_line(pos.x);
    }
    out
}

/// True if both coordinates sit within tolerance of a grid line
#[inline]
pub fn is_at_intersection(pos: Vec2) -> bool {
    near_grid(pos.x) && near_grid(pos.y)
}

/// Collapse an arbitrary vector onto the dominant axis.
///
/// Ties go horizontal; a zero vector maps to `Vec2::X`.
pub fn to_cardinal(v: Vec2) -> Vec2 {
    if v.length_squared() == 0.0 {
        return Vec2::X;
    }
    if v.x.abs() >= v.y.abs() {
        if v.x >= 0.0 { Vec2::X } else { Vec2::NEG_X }
    } else if v.y >= 0.0 {
        Vec2::Y
    } else {
        Vec2::NEG_Y
    }
}

/// True if `dir` travels along the horizontal axis
#[inline]
pub fn is_horizontal(dir: Vec2) -> bool {
    dir.x.abs() > 0.0
}

/// Uniformly random cardinal direction
pub fn random_cardinal<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    CARDINALS[rng.random_range(0..CARDINALS.len())]
}

/// Random 90 degree turn away from the current travel axis
pub fn random_turn<R: Rng + ?Sized>(dir: Vec2, rng: &mut R) -> Vec2 {
    let flip = rng.random_bool(0.5);
    match (is_horizontal(dir), flip) {
        (true, false) => Vec2::Y,
        (true, true) => Vec2::NEG_Y,
        (false, false) => Vec2::X,
        (false, true) => Vec2::NEG_X,
    }
}

/// Number of interior lanes usable for spawns along an extent
#[inline]
fn lane_count(extent: f32) -> i32 {
    ((extent - 2.0) / GRID).floor() as i32 - 2
}

/// Random interior lane coordinate (lines 2 .. extent/GRID - 2)
pub fn random_lane<R: Rng + ?Sized>(extent: f32, rng: &mut R) -> f32 {
    let hi = lane_count(extent).max(2);
    rng.random_range(2..=hi) as f32 * GRID
}

/// Random interior grid intersection, used for enemy spawns
pub fn random_grid_pos<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(random_lane(FIELD_W, rng), random_lane(FIELD_H, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_snap_horizontal_locks_y() {
        let p = snap_to_wire(Vec2::new(101.0, 50.0), Vec2::X);
        assert_eq!(p, Vec2::new(101.0, 48.0));
    }

    #[test]
    fn test_snap_vertical_locks_x() {
        let p = snap_to_wire(Vec2::new(70.0, 33.0), Vec2::NEG_Y);
        assert_eq!(p, Vec2::new(48.0, 33.0));
    }

    #[test]
    fn test_intersection_tolerance() {
        assert!(is_at_intersection(Vec2::new(96.0, 144.0)));
        assert!(is_at_intersection(Vec2::new(101.9, 138.5)));
        assert!(!is_at_intersection(Vec2::new(104.0, 144.0)));
        assert!(!is_at_intersection(Vec2::new(96.0, 120.0)));
    }

    #[test]
    fn test_to_cardinal_ties_and_zero() {
        assert_eq!(to_cardinal(Vec2::ZERO), Vec2::X);
        assert_eq!(to_cardinal(Vec2::new(3.0, 3.0)), Vec2::X);
        assert_eq!(to_cardinal(Vec2::new(-3.0, 3.0)), Vec2::NEG_X);
        assert_eq!(to_cardinal(Vec2::new(0.5, -7.0)), Vec2::NEG_Y);
        assert_eq!(to_cardinal(Vec2::new(0.0, 2.0)), Vec2::Y);
    }

    #[test]
    fn test_random_turn_switches_axis() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..32 {
            assert!(!is_horizontal(random_turn(Vec2::X, &mut rng)));
            assert!(is_horizontal(random_turn(Vec2::NEG_Y, &mut rng)));
        }
    }

    #[test]
    fn test_random_grid_pos_is_interior_intersection() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let p = random_grid_pos(&mut rng);
            assert!(is_at_intersection(p));
            assert!(p.x >= 2.0 * GRID && p.x <= 17.0 * GRID);
            assert!(p.y >= 2.0 * GRID && p.y <= 9.0 * GRID);
        }
    }

    proptest! {
        #[test]
        fn prop_to_cardinal_is_unit_axis(x in -1e4f32..1e4, y in -1e4f32..1e4) {
            let c = to_cardinal(Vec2::new(x, y));
            prop_assert!(CARDINALS.contains(&c));
        }

        #[test]
        fn prop_snap_keeps_one_axis_on_wire(x in 0f32..960.0, y in 0f32..540.0, i in 0usize..4) {
            let dir = CARDINALS[i];
            let p = snap_to_wire(Vec2::new(x, y), dir);
            if is_horizontal(dir) {
                prop_assert_eq!(p.y, nearest_line(y));
                prop_assert_eq!(p.x, x);
            } else {
                prop_assert_eq!(p.x, nearest_line(x));
                prop_assert_eq!(p.y, y);
            }
        }
    }
}
