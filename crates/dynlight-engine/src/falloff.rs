/// Distance, in voxels, at which a dynamic light fades to nothing.
pub const MAX_RADIUS: f64 = 7.75;
pub const MAX_RADIUS_SQUARED: f64 = MAX_RADIUS * MAX_RADIUS;

/// Linear falloff: `luminance` at the source, 0 at `MAX_RADIUS` and beyond.
#[inline]
pub fn intensity(distance_squared: f64, luminance: f64) -> f64 {
    if distance_squared > MAX_RADIUS_SQUARED {
        return 0.0;
    }
    let multiplier = 1.0 - distance_squared.sqrt() / MAX_RADIUS;
    luminance * multiplier
}
