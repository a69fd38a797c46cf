//! Minimal world-space geometry for the dynamic lighting crates.
#![forbid(unsafe_code)]

use core::ops::{Add, Sub};

/// World-space position. Entities move continuously, so positions are f64.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DVec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl DVec3 {
    pub const ZERO: DVec3 = DVec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn distance_sq(self, other: DVec3) -> f64 {
        (self - other).length_sq()
    }

    /// Largest absolute component.
    #[inline]
    pub fn max_abs_component(self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    #[inline]
    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    /// Voxel containing this point (floor on every axis).
    #[inline]
    pub fn block_pos(self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

impl Add for DVec3 {
    type Output = DVec3;
    #[inline]
    fn add(self, rhs: DVec3) -> DVec3 {
        DVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for DVec3 {
    type Output = DVec3;
    #[inline]
    fn sub(self, rhs: DVec3) -> DVec3 {
        DVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Integer voxel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Centre of the voxel in world space.
    #[inline]
    pub fn center(self) -> DVec3 {
        DVec3::new(
            f64::from(self.x) + 0.5,
            f64::from(self.y) + 0.5,
            f64::from(self.z) + 0.5,
        )
    }
}

impl From<BlockPos> for DVec3 {
    fn from(value: BlockPos) -> Self {
        DVec3::new(f64::from(value.x), f64::from(value.y), f64::from(value.z))
    }
}
