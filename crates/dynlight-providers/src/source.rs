use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use dynlight_geom::DVec3;

/// Opaque identity of a loaded world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldId(pub u64);

/// Broad class of a light source; selects the built-in luminance strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Any entity without a more specific strategy.
    Entity,
    Living,
    Player,
    ExplosiveProjectile,
    PrimedExplosive,
    Creeper,
    BlockEntity,
}

impl SourceKind {
    #[inline]
    pub fn is_entity(self) -> bool {
        self != SourceKind::BlockEntity
    }

    /// Entities gated by the entity lighting switch.
    #[inline]
    pub fn is_non_player_entity(self) -> bool {
        self.is_entity() && self != SourceKind::Player
    }

    #[inline]
    pub fn is_explosive(self) -> bool {
        matches!(self, SourceKind::PrimedExplosive | SourceKind::Creeper)
    }
}

/// Remaining and initial fuse length, in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fuse {
    pub remaining: u32,
    pub initial: u32,
}

impl Fuse {
    pub fn new(remaining: u32, initial: u32) -> Self {
        Self { remaining, initial }
    }

    /// Fraction of the fuse still left, in [0, 1].
    pub fn fraction(self) -> f64 {
        if self.initial == 0 {
            return 0.0;
        }
        (self.remaining as f64 / self.initial as f64).clamp(0.0, 1.0)
    }
}

const NO_WORLD: u64 = u64::MAX;

/// Mutable light state embedded in every source.
///
/// Written by the simulation tick, read by the frame pass and the aggregator,
/// so both fields are atomics.
#[derive(Debug)]
pub struct LightState {
    luminance: AtomicU8,
    last_world: AtomicU64,
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

impl LightState {
    pub const fn new() -> Self {
        Self {
            luminance: AtomicU8::new(0),
            last_world: AtomicU64::new(NO_WORLD),
        }
    }

    #[inline]
    pub fn luminance(&self) -> u8 {
        self.luminance.load(Ordering::Relaxed)
    }

    /// Stores `value` clamped to 15.
    #[inline]
    pub fn set_luminance(&self, value: u8) {
        self.luminance.store(value.min(15), Ordering::Relaxed);
    }

    /// Records the world seen on this tick; true when it differs from the last one.
    pub fn observe_world(&self, world: WorldId) -> bool {
        self.last_world.swap(world.0, Ordering::Relaxed) != world.0
    }

    /// Back to the never-ticked state: dark, with no world seen.
    pub fn reset(&self) {
        self.luminance.store(0, Ordering::Relaxed);
        self.last_world.store(NO_WORLD, Ordering::Relaxed);
    }
}

/// Capability surface a game object exposes to the lighting engine.
///
/// Only the first five methods are required; the rest default to "no".
pub trait LightSource: Send + Sync {
    fn light_state(&self) -> &LightState;
    fn world(&self) -> WorldId;
    /// Feet position (block entities report their block centre).
    fn position(&self) -> DVec3;
    fn kind(&self) -> SourceKind;
    /// Key used to find per-type luminance handlers, e.g. `"blaze"`.
    fn type_key(&self) -> &str;

    fn eye_height(&self) -> f64 {
        0.0
    }

    /// Point light is emitted from.
    fn light_position(&self) -> DVec3 {
        let p = self.position();
        p.with_y(p.y + self.eye_height())
    }

    fn is_removed(&self) -> bool {
        false
    }
    fn is_on_fire(&self) -> bool {
        false
    }
    fn is_glowing(&self) -> bool {
        false
    }
    /// Eyes are inside a water-like fluid.
    fn is_submerged(&self) -> bool {
        false
    }
    fn is_spectator(&self) -> bool {
        false
    }
    fn fuse(&self) -> Option<Fuse> {
        None
    }

    /// Calls `visit` with the key of every held or worn item.
    fn visit_equipped(&self, _visit: &mut dyn FnMut(&str)) {}

    #[inline]
    fn luminance(&self) -> u8 {
        self.light_state().luminance()
    }
}
