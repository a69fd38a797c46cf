use dynlight_config::{DynLightsConfig, ExplosiveLightingMode};

use crate::{Fuse, ItemLightSources, LightHandlers, LightSource, SourceKind};

pub const ON_FIRE_LUMINANCE: u8 = 15;
pub const EXPLOSIVE_PROJECTILE_LUMINANCE: u8 = 14;
pub const SIMPLE_EXPLOSIVE_LUMINANCE: u8 = 10;

/// Brightness of a burning fuse in Fancy mode; grows as the fuse shortens.
pub fn fancy_fuse_luminance(fuse: Fuse) -> u8 {
    let f = fuse.fraction();
    let lum = (-(f * f) * 10.0) as i32 + 10;
    lum.clamp(0, 15) as u8
}

pub(crate) fn equipped_luminance(source: &dyn LightSource, items: &ItemLightSources) -> u8 {
    let submerged = source.is_submerged();
    let mut best = 0u8;
    source.visit_equipped(&mut |item| {
        best = best.max(items.luminance(item, submerged));
    });
    best
}

fn living_luminance(source: &dyn LightSource, items: &ItemLightSources) -> u8 {
    if source.is_on_fire() || source.is_glowing() {
        ON_FIRE_LUMINANCE
    } else {
        equipped_luminance(source, items)
    }
}

fn explosive_luminance(source: &dyn LightSource, mode: ExplosiveLightingMode) -> u8 {
    if !mode.is_enabled() {
        return 0;
    }
    if source.is_on_fire() {
        return ON_FIRE_LUMINANCE;
    }
    let Some(fuse) = source.fuse() else {
        return 0;
    };
    match mode {
        ExplosiveLightingMode::Off => 0,
        ExplosiveLightingMode::Simple => SIMPLE_EXPLOSIVE_LUMINANCE,
        ExplosiveLightingMode::Fancy => fancy_fuse_luminance(fuse),
    }
}

/// Luminance of `source` this tick: its kind strategy, maxed with the
/// per-type handlers, then gated by the feature switches.
pub(crate) fn compute(
    source: &dyn LightSource,
    config: &DynLightsConfig,
    items: &ItemLightSources,
    handlers: &LightHandlers,
) -> u8 {
    let kind = source.kind();
    if kind.is_non_player_entity() && !config.entity_lighting {
        return 0;
    }
    if kind == SourceKind::BlockEntity && !config.block_entity_lighting {
        return 0;
    }
    if kind.is_explosive() && !config.explosive_lighting.is_enabled() {
        return 0;
    }

    let builtin = match kind {
        SourceKind::Entity | SourceKind::BlockEntity => {
            if source.is_on_fire() {
                ON_FIRE_LUMINANCE
            } else {
                0
            }
        }
        SourceKind::Living | SourceKind::Player => living_luminance(source, items),
        SourceKind::ExplosiveProjectile => EXPLOSIVE_PROJECTILE_LUMINANCE,
        SourceKind::PrimedExplosive | SourceKind::Creeper => {
            explosive_luminance(source, config.explosive_lighting)
        }
    };
    let lum = builtin.max(handlers.luminance_of(source)).min(15);

    if kind == SourceKind::Player {
        // Always observe so the tick after a switch is the only dark one.
        let world_changed = source.light_state().observe_world(source.world());
        if source.is_spectator() || world_changed {
            return 0;
        }
    }
    lum
}
