use std::time::Instant;

use dynlight_config::QualityMode;
use dynlight_geom::DVec3;
use dynlight_providers::LightSource;
use dynlight_region::{RegionCoord, RegionSet, octant_neighbourhood};

use crate::scheduler::{CadenceGate, Scheduler};
use crate::sink::RemeshSink;

/// What the frame pass remembers about one tracked source.
#[derive(Debug, Default)]
pub(crate) struct TrackState {
    pub(crate) last_luminance: u8,
    /// Feet position at the last recompute; `None` until the first one.
    pub(crate) last_position: Option<DVec3>,
    pub(crate) lit: RegionSet,
    pub(crate) gate: CadenceGate,
}

impl TrackState {
    /// Moved past `threshold` on some axis, or luminance changed.
    pub(crate) fn is_stale(&self, position: DVec3, luminance: u8, threshold: f64) -> bool {
        let Some(last) = self.last_position else {
            return true;
        };
        (position - last).max_abs_component() > threshold || luminance != self.last_luminance
    }

    /// Replaces the lit set and requests re-meshes for every new region plus
    /// the regions that are no longer lit.
    pub(crate) fn recompute(&mut self, source: &dyn LightSource, sink: &dyn RemeshSink) {
        let luminance = source.luminance();
        let lit: RegionSet = if luminance > 0 {
            octant_neighbourhood(source.light_position()).into_iter().collect()
        } else {
            RegionSet::new()
        };
        for region in lit.iter() {
            request(sink, region);
        }
        for region in self.lit.difference(&lit) {
            request(sink, region);
        }
        self.lit = lit;
        self.last_luminance = luminance;
        self.last_position = Some(source.position());
    }
}

#[inline]
fn request(sink: &dyn RemeshSink, region: RegionCoord) {
    if !sink.is_remesh_pending(region) {
        sink.request_remesh(region);
    }
}

/// One source's share of the frame pass; true when its regions were recomputed.
pub(crate) fn update_source(
    source: &dyn LightSource,
    track: &mut TrackState,
    now: Instant,
    mode: QualityMode,
    sink: &dyn RemeshSink,
) -> bool {
    if !Scheduler::should_update_this_source(&mut track.gate, now, mode) {
        return false;
    }
    if !track.is_stale(source.position(), source.luminance(), mode.movement_threshold()) {
        return false;
    }
    track.recompute(source, sink);
    true
}
