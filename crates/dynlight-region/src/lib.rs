//! Region (re-mesh cell) coordinates and the per-source lit region sets.
#![forbid(unsafe_code)]

mod coord;
mod set;

pub use coord::{REGION_SHIFT, REGION_SIZE, RegionCoord};
pub use set::RegionSet;

use dynlight_geom::DVec3;

/// The eight regions a light at `pos` may reach: the region containing it and,
/// per axis, the neighbour on the side of the region half the light sits in.
///
/// Order: origin, +X, +XZ, +Z, +Y, +XY, +XYZ, +YZ (where `+` means "towards the
/// light's half" on that axis).
pub fn octant_neighbourhood(pos: DVec3) -> [RegionCoord; 8] {
    let block = pos.block_pos();
    let origin = RegionCoord::containing(block);
    let half = REGION_SIZE / 2;
    let toward = |v: i32| if v.rem_euclid(REGION_SIZE) >= half { 1 } else { -1 };
    let (dx, dy, dz) = (toward(block.x), toward(block.y), toward(block.z));
    [
        origin,
        origin.offset(dx, 0, 0),
        origin.offset(dx, 0, dz),
        origin.offset(0, 0, dz),
        origin.offset(0, dy, 0),
        origin.offset(dx, dy, 0),
        origin.offset(dx, dy, dz),
        origin.offset(0, dy, dz),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbourhood_low_half_goes_negative() {
        let cells = octant_neighbourhood(DVec3::new(2.0, 3.0, 4.0));
        assert_eq!(cells[0], RegionCoord::new(0, 0, 0));
        assert_eq!(cells[6], RegionCoord::new(-1, -1, -1));
    }

    #[test]
    fn neighbourhood_high_half_goes_positive() {
        let cells = octant_neighbourhood(DVec3::new(8.0, 15.5, 31.0));
        assert_eq!(cells[0], RegionCoord::new(0, 0, 1));
        assert_eq!(cells[6], RegionCoord::new(1, 1, 2));
    }

    #[test]
    fn neighbourhood_is_a_full_cube() {
        let cells = octant_neighbourhood(DVec3::new(-20.3, 70.2, 100.9));
        let set: RegionSet = cells.iter().copied().collect();
        assert_eq!(set.len(), 8);
    }
}
