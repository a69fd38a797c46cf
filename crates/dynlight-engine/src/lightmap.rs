//! Packed lightmap values: sky light in bits 20.., block light in bits 4..20.

pub const SKY_SHIFT: u32 = 20;
pub const BLOCK_SHIFT: u32 = 4;
const LOW_MASK: u32 = 0xF_FFFF;

#[inline]
pub fn pack(sky: u32, block: u32) -> u32 {
    (sky << SKY_SHIFT) | (block << BLOCK_SHIFT)
}

#[inline]
pub fn sky_light(packed: u32) -> u32 {
    packed >> SKY_SHIFT
}

#[inline]
pub fn block_light(packed: u32) -> u32 {
    (packed >> BLOCK_SHIFT) & 0xFFFF
}

/// Raises the block component of `packed` to `level` when that is brighter.
/// Bits 20..32 are never touched.
#[inline]
pub fn merge_into_lightmap(level: f64, packed: u32) -> u32 {
    if level > 0.0 && level > block_light(packed) as f64 {
        let low = ((level * 16.0) as u32) & LOW_MASK;
        (packed & !LOW_MASK) | low
    } else {
        packed
    }
}

/// Merge for an entity: it is at least as bright as its own luminance.
#[inline]
pub fn merge_entity_lightmap(level_at_feet: f64, entity_luminance: u8, packed: u32) -> u32 {
    let level = level_at_feet.trunc().max(entity_luminance.min(15) as f64);
    merge_into_lightmap(level, packed)
}
