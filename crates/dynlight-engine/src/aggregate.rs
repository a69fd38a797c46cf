use dynlight_geom::{BlockPos, DVec3};
use dynlight_region::{REGION_SIZE, RegionCoord};
use rayon::prelude::*;

use crate::falloff::{self, MAX_RADIUS_SQUARED};

/// Snapshot of one source as seen by the aggregator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emitter {
    pub position: DVec3,
    pub luminance: u8,
}

pub const REGION_VOLUME: usize = (REGION_SIZE * REGION_SIZE * REGION_SIZE) as usize;

/// Brightest contribution at `point`, clamped to [0, 15].
pub fn level_at_point(emitters: impl IntoIterator<Item = Emitter>, point: DVec3) -> f64 {
    let mut level = 0.0f64;
    for e in emitters {
        let l = falloff::intensity(e.position.distance_sq(point), e.luminance as f64);
        if l > level {
            level = l;
        }
    }
    level.clamp(0.0, 15.0)
}

/// Level at the centre of voxel `pos`.
#[inline]
pub fn level_at_block(emitters: impl IntoIterator<Item = Emitter>, pos: BlockPos) -> f64 {
    level_at_point(emitters, pos.center())
}

/// Index of a voxel inside a region: x fastest, then z, then y.
#[inline]
pub fn region_index(x: i32, y: i32, z: i32) -> usize {
    ((y * REGION_SIZE + z) * REGION_SIZE + x) as usize
}

/// Levels for all voxels of `region`, ordered by [`region_index`].
pub fn levels_in_region(emitters: &[Emitter], region: RegionCoord) -> Vec<f64> {
    let min = region.min_block();
    let lo = DVec3::from(min);
    let hi = lo + DVec3::new(REGION_SIZE as f64, REGION_SIZE as f64, REGION_SIZE as f64);
    let near: Vec<Emitter> = emitters
        .iter()
        .copied()
        .filter(|e| distance_sq_to_box(e.position, lo, hi) <= MAX_RADIUS_SQUARED)
        .collect();
    if near.is_empty() {
        return vec![0.0; REGION_VOLUME];
    }
    (0..REGION_VOLUME)
        .into_par_iter()
        .map(|i| {
            let i = i as i32;
            let x = i % REGION_SIZE;
            let z = (i / REGION_SIZE) % REGION_SIZE;
            let y = i / (REGION_SIZE * REGION_SIZE);
            level_at_block(near.iter().copied(), min.offset(x, y, z))
        })
        .collect()
}

fn distance_sq_to_box(p: DVec3, lo: DVec3, hi: DVec3) -> f64 {
    let axis = |v: f64, a: f64, b: f64| {
        if v < a {
            a - v
        } else if v > b {
            v - b
        } else {
            0.0
        }
    };
    let d = DVec3::new(axis(p.x, lo.x, hi.x), axis(p.y, lo.y, hi.y), axis(p.z, lo.z, hi.z));
    d.length_sq()
}
