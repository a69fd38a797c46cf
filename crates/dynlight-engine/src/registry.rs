use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use dynlight_providers::{LightSource, SourceKind, WorldId};
use dynlight_region::RegionSet;
use hashbrown::HashMap;
use parking_lot::{Mutex, RwLock};

use crate::aggregate::Emitter;
use crate::sink::RemeshSink;
use crate::tracker::TrackState;

type SourceKey = usize;

// The registry's Weak keeps the allocation alive, so an address cannot be
// reused by another source while its entry exists.
#[inline]
fn key_of(source: &dyn LightSource) -> SourceKey {
    std::ptr::from_ref(source).cast::<()>() as usize
}

struct Entry {
    source: Weak<dyn LightSource>,
    kind: SourceKind,
    track: Mutex<TrackState>,
}

/// The set of sources currently emitting light in the active world.
///
/// Holds only weak references: owners keep their sources alive, and entries
/// whose source was dropped are swept by [`LightSourceRegistry::sweep`].
pub struct LightSourceRegistry {
    entries: RwLock<HashMap<SourceKey, Entry>>,
    active_world: RwLock<Option<WorldId>>,
    enabled: AtomicBool,
}

impl Default for LightSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LightSourceRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            active_world: RwLock::new(None),
            enabled: AtomicBool::new(true),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn active_world(&self) -> Option<WorldId> {
        *self.active_world.read()
    }

    /// Switches worlds; every entry is dropped (with invalidation) on a change.
    pub fn set_active_world(&self, world: Option<WorldId>, sink: &dyn RemeshSink) -> usize {
        let previous = std::mem::replace(&mut *self.active_world.write(), world);
        if previous == world {
            return 0;
        }
        self.clear(sink)
    }

    /// Starts tracking `source`. No-op when disabled, when the source is not in
    /// the active world, or when it is already tracked.
    pub fn add(&self, source: &Arc<dyn LightSource>) -> bool {
        if !self.is_enabled() || self.active_world() != Some(source.world()) {
            return false;
        }
        let key = key_of(source.as_ref());
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return false;
        }
        let kind = source.kind();
        entries.insert(
            key,
            Entry {
                source: Arc::downgrade(source),
                kind,
                track: Mutex::new(TrackState::default()),
            },
        );
        log::debug!(
            target: "dynlights::registry",
            "added {:?} '{}' ({} tracked)",
            kind,
            source.type_key(),
            entries.len()
        );
        true
    }

    pub fn contains(&self, source: &dyn LightSource) -> bool {
        self.entries.read().contains_key(&key_of(source))
    }

    /// Stops tracking `source`, re-meshing the regions it lit.
    pub fn remove(&self, source: &dyn LightSource, sink: &dyn RemeshSink) -> bool {
        let mut entries = self.entries.write();
        let Some(mut entry) = entries.remove(&key_of(source)) else {
            return false;
        };
        let regions = std::mem::take(&mut entry.track.get_mut().lit);
        invalidate(&regions, sink);
        log::debug!(
            target: "dynlights::registry",
            "removed {:?} '{}', {} region(s) invalidated, {} tracked",
            entry.kind,
            source.type_key(),
            regions.len(),
            entries.len()
        );
        true
    }

    /// Removes every live source matching `predicate`; each affected region is
    /// requested once.
    pub fn remove_where(
        &self,
        mut predicate: impl FnMut(&dyn LightSource) -> bool,
        sink: &dyn RemeshSink,
    ) -> usize {
        self.evict_where(
            |e| e.source.upgrade().is_some_and(|s| predicate(s.as_ref())),
            sink,
        )
    }

    pub fn remove_entity_sources(&self, sink: &dyn RemeshSink) -> usize {
        self.evict_where(|e| e.kind.is_non_player_entity(), sink)
    }

    pub fn remove_explosive_sources(&self, sink: &dyn RemeshSink) -> usize {
        self.evict_where(|e| e.kind.is_explosive(), sink)
    }

    pub fn remove_block_entity_sources(&self, sink: &dyn RemeshSink) -> usize {
        self.evict_where(|e| e.kind == SourceKind::BlockEntity, sink)
    }

    pub fn clear(&self, sink: &dyn RemeshSink) -> usize {
        self.evict_where(|_| true, sink)
    }

    /// Drops entries whose source no longer exists or has left the active world.
    pub fn sweep(&self, sink: &dyn RemeshSink) -> usize {
        let world = self.active_world();
        self.evict_where(
            |e| e.source.upgrade().is_none_or(|s| Some(s.world()) != world),
            sink,
        )
    }

    pub fn count(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Regions currently lit by `source`, if tracked.
    pub fn lit_regions(&self, source: &dyn LightSource) -> Option<RegionSet> {
        self.entries
            .read()
            .get(&key_of(source))
            .map(|e| e.track.lock().lit.clone())
    }

    /// Runs `f` over every live emitter of the active world, under the shared lock.
    pub fn with_emitters<R>(&self, f: impl FnOnce(&mut dyn Iterator<Item = Emitter>) -> R) -> R {
        let world = self.active_world();
        let entries = self.entries.read();
        let mut emitters = entries.values().filter_map(|entry| {
            let source = entry.source.upgrade()?;
            let luminance = source.luminance();
            (luminance > 0 && Some(source.world()) == world).then(|| Emitter {
                position: source.light_position(),
                luminance,
            })
        });
        f(&mut emitters)
    }

    pub fn emitters(&self) -> Vec<Emitter> {
        self.with_emitters(|it| it.collect())
    }

    /// Runs `update` on each live entry of the active world under the shared
    /// lock. Returns the number of `true` results and whether any entry needs
    /// a [`sweep`](Self::sweep).
    pub(crate) fn update_each(
        &self,
        mut update: impl FnMut(&dyn LightSource, &mut TrackState) -> bool,
    ) -> (usize, bool) {
        let world = self.active_world();
        let entries = self.entries.read();
        let mut updated = 0;
        let mut needs_sweep = false;
        for entry in entries.values() {
            let Some(source) = entry.source.upgrade() else {
                needs_sweep = true;
                continue;
            };
            if Some(source.world()) != world {
                needs_sweep = true;
                continue;
            }
            let mut track = entry.track.lock();
            if update(source.as_ref(), &mut track) {
                updated += 1;
            }
        }
        (updated, needs_sweep)
    }

    /// Forgets every per-source cadence timestamp.
    pub(crate) fn reset_gates(&self) {
        for entry in self.entries.read().values() {
            entry.track.lock().gate.reset();
        }
    }

    // Selection and invalidation both run under the write lock, so an entry
    // chosen here is the one that gets removed.
    fn evict_where(&self, mut doomed: impl FnMut(&Entry) -> bool, sink: &dyn RemeshSink) -> usize {
        let mut entries = self.entries.write();
        let mut regions = RegionSet::new();
        let before = entries.len();
        entries.retain(|_, entry| {
            if !doomed(entry) {
                return true;
            }
            regions.extend_from(&entry.track.get_mut().lit);
            false
        });
        let found = before - entries.len();
        invalidate(&regions, sink);
        if found > 0 {
            log::debug!(
                target: "dynlights::registry",
                "removed {} source(s), {} region(s) invalidated, {} tracked",
                found,
                regions.len(),
                entries.len()
            );
        }
        found
    }
}

fn invalidate(regions: &RegionSet, sink: &dyn RemeshSink) {
    for region in regions.iter() {
        sink.request_remesh(region);
    }
}
