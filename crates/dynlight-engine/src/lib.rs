//! Dynamic light tracking: which sources emit light, how bright each voxel is
//! because of them, and which regions need re-meshing when that changes.
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod falloff;
pub mod lightmap;
mod registry;
pub mod scheduler;
mod sink;
mod tracker;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use dynlight_config::DynLightsConfig;
use dynlight_geom::{BlockPos, DVec3};
use dynlight_providers::{LightSource, LuminanceProviders, WorldId};
use dynlight_region::RegionCoord;
use parking_lot::{Mutex, RwLock};

pub use aggregate::Emitter;
pub use falloff::{MAX_RADIUS, intensity};
pub use lightmap::merge_into_lightmap;
pub use registry::LightSourceRegistry;
pub use scheduler::{CadenceGate, Scheduler};
pub use sink::{ChannelRemeshSink, CollectingRemeshSink, RemeshSink};

/// One per game session.
pub struct DynamicLightsEngine {
    config: RwLock<DynLightsConfig>,
    providers: LuminanceProviders,
    registry: LightSourceRegistry,
    scheduler: Mutex<Scheduler>,
    sink: Arc<dyn RemeshSink>,
    last_update_count: AtomicUsize,
}

impl DynamicLightsEngine {
    pub fn new(config: DynLightsConfig, providers: LuminanceProviders, sink: Arc<dyn RemeshSink>) -> Self {
        let registry = LightSourceRegistry::new();
        registry.set_enabled(config.quality.is_enabled());
        log::info!(
            target: "dynlights",
            "dynamic lights session started (quality={})",
            config.quality
        );
        Self {
            config: RwLock::new(config),
            providers,
            registry,
            scheduler: Mutex::new(Scheduler::new()),
            sink,
            last_update_count: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> DynLightsConfig {
        *self.config.read()
    }

    pub fn providers(&self) -> &LuminanceProviders {
        &self.providers
    }

    pub fn registry(&self) -> &LightSourceRegistry {
        &self.registry
    }

    /// Applies new settings, pruning sources the new switches exclude.
    pub fn set_config(&self, new: DynLightsConfig) {
        let old = std::mem::replace(&mut *self.config.write(), new);
        if old == new {
            return;
        }
        log::info!(
            target: "dynlights::config",
            "config changed: quality {} -> {}, entities {}, block entities {}, explosives {}",
            old.quality,
            new.quality,
            new.entity_lighting,
            new.block_entity_lighting,
            new.explosive_lighting
        );
        let sink = self.sink.as_ref();
        self.registry.set_enabled(new.quality.is_enabled());
        if !new.quality.is_enabled() {
            self.registry.clear(sink);
            self.last_update_count.store(0, Ordering::Relaxed);
            return;
        }
        if old.quality != new.quality {
            self.scheduler.lock().reset();
            self.registry.reset_gates();
        }
        if old.entity_lighting && !new.entity_lighting {
            self.registry.remove_entity_sources(sink);
        }
        if old.block_entity_lighting && !new.block_entity_lighting {
            self.registry.remove_block_entity_sources(sink);
        }
        if old.explosive_lighting.is_enabled() && !new.explosive_lighting.is_enabled() {
            self.registry.remove_explosive_sources(sink);
        }
    }

    pub fn active_world(&self) -> Option<WorldId> {
        self.registry.active_world()
    }

    /// Every switch, including to `None`, drops all tracked sources.
    pub fn set_active_world(&self, world: Option<WorldId>) {
        if self.registry.active_world() == world {
            return;
        }
        let dropped = self.registry.set_active_world(world, self.sink.as_ref());
        log::info!(target: "dynlights", "active world {:?} ({} sources dropped)", world, dropped);
    }

    pub fn shutdown(&self) {
        let dropped = self.registry.clear(self.sink.as_ref());
        self.last_update_count.store(0, Ordering::Relaxed);
        log::info!(target: "dynlights", "dynamic lights session ended ({} sources dropped)", dropped);
    }

    /// Simulation-tick hook: refreshes the source's luminance and registry membership.
    pub fn on_simulation_tick(&self, source: &Arc<dyn LightSource>) {
        if self.registry.active_world() != Some(source.world()) {
            // Tracked sources that changed world stop lighting the old one.
            if self.registry.contains(source.as_ref()) {
                self.registry.remove(source.as_ref(), self.sink.as_ref());
            }
            return;
        }
        if source.is_removed() {
            self.on_source_removed(source.as_ref());
            return;
        }
        let config = self.config();
        let luminance = self.providers.compute(source.as_ref(), &config);
        source.light_state().set_luminance(luminance);

        let tracked = self.registry.contains(source.as_ref());
        if !tracked && luminance > 0 {
            self.registry.add(source);
        } else if tracked && luminance < 1 {
            self.registry.remove(source.as_ref(), self.sink.as_ref());
        }
    }

    /// Despawn hook.
    pub fn on_source_removed(&self, source: &dyn LightSource) {
        source.light_state().reset();
        self.registry.remove(source, self.sink.as_ref());
    }

    /// Frame hook; returns how many sources had their regions recomputed.
    /// A frame skipped by the global gate returns 0 and leaves
    /// [`last_update_count`](Self::last_update_count) alone.
    pub fn on_frame_render(&self, now: Instant) -> usize {
        let mode = self.config.read().quality;
        if !self.scheduler.lock().should_run_global_update(now, mode) {
            return 0;
        }
        let sink = self.sink.as_ref();
        let (updated, needs_sweep) = self
            .registry
            .update_each(|source, track| tracker::update_source(source, track, now, mode, sink));
        if needs_sweep {
            self.registry.sweep(sink);
        }
        self.last_update_count.store(updated, Ordering::Relaxed);
        log::trace!(
            target: "dynlights",
            "frame pass: {} updated, {} tracked",
            updated,
            self.registry.count()
        );
        updated
    }

    pub fn dynamic_light_level_at(&self, pos: BlockPos) -> f64 {
        self.dynamic_light_level_at_point(pos.center())
    }

    pub fn dynamic_light_level_at_point(&self, point: DVec3) -> f64 {
        if !self.registry.is_enabled() {
            return 0.0;
        }
        self.registry
            .with_emitters(|emitters| aggregate::level_at_point(emitters, point))
    }

    /// Levels for every voxel of `region`, see [`aggregate::region_index`].
    pub fn dynamic_light_levels_in(&self, region: RegionCoord) -> Vec<f64> {
        if !self.registry.is_enabled() {
            return vec![0.0; aggregate::REGION_VOLUME];
        }
        aggregate::levels_in_region(&self.registry.emitters(), region)
    }

    /// Packed lightmap value at `pos` with dynamic light merged in.
    pub fn lightmap_at(&self, pos: BlockPos, packed: u32) -> u32 {
        lightmap::merge_into_lightmap(self.dynamic_light_level_at(pos), packed)
    }

    /// Packed lightmap for rendering `entity`: never darker than its own luminance.
    pub fn entity_lightmap(&self, entity: &dyn LightSource, packed: u32) -> u32 {
        if !self.registry.is_enabled() {
            return packed;
        }
        let level = self.dynamic_light_level_at(entity.position().block_pos());
        lightmap::merge_entity_lightmap(level, entity.luminance(), packed)
    }

    pub fn light_sources_count(&self) -> usize {
        self.registry.count()
    }

    pub fn last_update_count(&self) -> usize {
        self.last_update_count.load(Ordering::Relaxed)
    }

    pub fn debug_line(&self) -> String {
        let mut line = format!(
            "Dynamic Light Sources: {} (U: {}",
            self.light_sources_count(),
            self.last_update_count()
        );
        if !self.config.read().quality.is_enabled() {
            line.push_str(" ; Disabled");
        }
        line.push(')');
        line
    }
}

impl Drop for DynamicLightsEngine {
    fn drop(&mut self) {
        if !self.registry.is_empty() {
            self.shutdown();
        }
    }
}
