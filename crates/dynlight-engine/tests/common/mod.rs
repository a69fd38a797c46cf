#![allow(dead_code)]

use std::sync::Arc;

use dynlight_config::DynLightsConfig;
use dynlight_engine::{DynamicLightsEngine, RemeshSink};
use dynlight_geom::DVec3;
use dynlight_providers::{
    ItemLightSources, LightSource, LightState, LuminanceProviders, SourceKind, WorldId,
};
use dynlight_region::RegionCoord;
use parking_lot::Mutex;

pub const OVERWORLD: WorldId = WorldId(1);
pub const NETHER: WorldId = WorldId(2);

/// Scriptable source: luminance comes from a registered constant handler on its type key
/// or from being set on fire.
pub struct TestSource {
    state: LightState,
    kind: SourceKind,
    key: String,
    world: Mutex<WorldId>,
    pos: Mutex<DVec3>,
    on_fire: Mutex<bool>,
    removed: Mutex<bool>,
}

impl TestSource {
    pub fn new(kind: SourceKind, key: &str, pos: DVec3) -> Self {
        Self {
            state: LightState::new(),
            kind,
            key: key.to_string(),
            world: Mutex::new(OVERWORLD),
            pos: Mutex::new(pos),
            on_fire: Mutex::new(false),
            removed: Mutex::new(false),
        }
    }

    /// Entity whose luminance is fixed by `luminance_handlers()`.
    pub fn glowing(key: &str, pos: DVec3) -> Arc<dyn LightSource> {
        Arc::new(Self::new(SourceKind::Entity, key, pos))
    }

    pub fn shared(self) -> Arc<TestSource> {
        Arc::new(self)
    }

    pub fn move_to(&self, pos: DVec3) {
        *self.pos.lock() = pos;
    }

    pub fn set_on_fire(&self, on: bool) {
        *self.on_fire.lock() = on;
    }

    pub fn set_world(&self, world: WorldId) {
        *self.world.lock() = world;
    }

    pub fn mark_removed(&self) {
        *self.removed.lock() = true;
    }
}

impl LightSource for TestSource {
    fn light_state(&self) -> &LightState {
        &self.state
    }
    fn world(&self) -> WorldId {
        *self.world.lock()
    }
    fn position(&self) -> DVec3 {
        *self.pos.lock()
    }
    fn kind(&self) -> SourceKind {
        self.kind
    }
    fn type_key(&self) -> &str {
        &self.key
    }
    fn is_removed(&self) -> bool {
        *self.removed.lock()
    }
    fn is_on_fire(&self) -> bool {
        *self.on_fire.lock()
    }
}

/// Records every request, duplicates included.
#[derive(Default)]
pub struct RecordingSink {
    requests: Mutex<Vec<RegionCoord>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<RegionCoord> {
        std::mem::take(&mut *self.requests.lock())
    }

    pub fn len(&self) -> usize {
        self.requests.lock().len()
    }
}

impl RemeshSink for RecordingSink {
    fn request_remesh(&self, region: RegionCoord) {
        self.requests.lock().push(region);
    }
}

/// Type keys `lum0` .. `lum15` emit their number.
pub fn luminance_handlers() -> LuminanceProviders {
    let providers = LuminanceProviders::new(Arc::new(ItemLightSources::new()));
    for l in 0..=15u8 {
        providers.handlers().register_constant(format!("lum{l}"), l);
    }
    providers
}

pub fn engine_with(config: DynLightsConfig) -> (DynamicLightsEngine, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let engine = DynamicLightsEngine::new(config, luminance_handlers(), sink.clone());
    engine.set_active_world(Some(OVERWORLD));
    (engine, sink)
}

pub fn engine() -> (DynamicLightsEngine, Arc<RecordingSink>) {
    engine_with(DynLightsConfig::default())
}

pub fn at(x: f64, y: f64, z: f64) -> DVec3 {
    DVec3::new(x, y, z)
}
