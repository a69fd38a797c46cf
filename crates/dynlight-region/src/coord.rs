use dynlight_geom::BlockPos;

/// Edge length of a region in voxels.
pub const REGION_SIZE: i32 = 16;
pub const REGION_SHIFT: u32 = 4;

/// Cubic cell of `REGION_SIZE`³ voxels; the unit of re-mesh invalidation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegionCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl RegionCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    #[inline]
    pub fn containing(pos: BlockPos) -> Self {
        Self {
            cx: pos.x >> REGION_SHIFT,
            cy: pos.y >> REGION_SHIFT,
            cz: pos.z >> REGION_SHIFT,
        }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    /// Lowest-corner voxel of the region.
    #[inline]
    pub fn min_block(self) -> BlockPos {
        BlockPos::new(
            self.cx << REGION_SHIFT,
            self.cy << REGION_SHIFT,
            self.cz << REGION_SHIFT,
        )
    }
}
