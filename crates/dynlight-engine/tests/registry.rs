mod common;

use std::sync::Arc;

use common::*;
use dynlight_engine::{CollectingRemeshSink, LightSourceRegistry};
use dynlight_providers::{LightSource, SourceKind};
use dynlight_region::{RegionSet, octant_neighbourhood};

fn registry() -> LightSourceRegistry {
    let r = LightSourceRegistry::new();
    r.set_active_world(Some(OVERWORLD), &RecordingSink::default());
    r
}

#[test]
fn add_is_idempotent_and_identity_based() {
    let r = registry();
    let a = TestSource::glowing("lum10", at(0.0, 64.0, 0.0));
    let b = TestSource::glowing("lum10", at(0.0, 64.0, 0.0));
    assert!(r.add(&a));
    assert!(!r.add(&a));
    assert!(r.add(&b));
    assert_eq!(r.count(), 2);
    assert!(r.contains(a.as_ref()));
}

#[test]
fn add_ignores_other_worlds_and_disabled_registry() {
    let r = registry();
    let s = TestSource::new(SourceKind::Entity, "lum10", at(0.0, 0.0, 0.0)).shared();
    s.set_world(NETHER);
    let dyn_s: Arc<dyn LightSource> = s.clone();
    assert!(!r.add(&dyn_s));

    s.set_world(OVERWORLD);
    r.set_enabled(false);
    assert!(!r.add(&dyn_s));
    r.set_enabled(true);
    assert!(r.add(&dyn_s));
}

#[test]
fn removing_unknown_source_has_no_side_effects() {
    let r = registry();
    let sink = RecordingSink::default();
    let tracked = TestSource::glowing("lum10", at(0.0, 0.0, 0.0));
    let stranger = TestSource::glowing("lum10", at(0.0, 0.0, 0.0));
    r.add(&tracked);
    assert!(!r.remove(stranger.as_ref(), &sink));
    assert_eq!(r.count(), 1);
    assert_eq!(sink.len(), 0);
}

#[test]
fn clear_requests_each_lit_region_once() {
    let (engine, sink) = engine();
    // Two sources close enough to share most of their neighbourhood.
    let a = TestSource::glowing("lum12", at(4.0, 64.0, 4.0));
    let b = TestSource::glowing("lum9", at(5.0, 65.0, 3.0));
    let c = TestSource::glowing("lum15", at(100.0, 10.0, -40.0));
    for s in [&a, &b, &c] {
        engine.on_simulation_tick(s);
    }
    engine.on_frame_render(std::time::Instant::now());

    let mut expected = RegionSet::new();
    for s in [&a, &b, &c] {
        expected.extend(octant_neighbourhood(s.light_position()));
    }
    sink.take();

    let removed = engine.registry().clear(sink.as_ref());
    assert_eq!(removed, 3);
    assert_eq!(engine.light_sources_count(), 0);

    let requests = sink.take();
    assert_eq!(requests.len(), expected.len());
    let got: RegionSet = requests.into_iter().collect();
    assert_eq!(got, expected);
}

#[test]
fn bulk_filters_remove_by_kind() {
    let r = registry();
    let sink = CollectingRemeshSink::new();
    let sources: Vec<Arc<dyn LightSource>> = vec![
        Arc::new(TestSource::new(SourceKind::Living, "zombie", at(0.0, 0.0, 0.0))),
        Arc::new(TestSource::new(SourceKind::Player, "player", at(0.0, 0.0, 0.0))),
        Arc::new(TestSource::new(SourceKind::PrimedExplosive, "tnt", at(0.0, 0.0, 0.0))),
        Arc::new(TestSource::new(SourceKind::Creeper, "creeper", at(0.0, 0.0, 0.0))),
        Arc::new(TestSource::new(SourceKind::BlockEntity, "lantern", at(0.0, 0.0, 0.0))),
    ];
    for s in &sources {
        r.add(s);
    }
    assert_eq!(r.remove_explosive_sources(&sink), 2);
    assert_eq!(r.remove_block_entity_sources(&sink), 1);
    assert_eq!(r.remove_entity_sources(&sink), 1);
    assert_eq!(r.count(), 1);
    assert!(r.contains(sources[1].as_ref()));
}

#[test]
fn remove_where_matches_live_sources() {
    let r = registry();
    let sink = RecordingSink::default();
    let a = TestSource::glowing("lum3", at(0.0, 0.0, 0.0));
    let b = TestSource::glowing("lum8", at(0.0, 0.0, 0.0));
    r.add(&a);
    r.add(&b);
    assert_eq!(r.remove_where(|s| s.type_key() == "lum8", &sink), 1);
    assert!(r.contains(a.as_ref()));
    assert!(!r.contains(b.as_ref()));
}

#[test]
fn dropped_sources_are_swept_with_invalidation() {
    let (engine, sink) = engine();
    let s = TestSource::glowing("lum10", at(8.0, 8.0, 8.0));
    let keep = TestSource::glowing("lum10", at(40.0, 8.0, 8.0));
    engine.on_simulation_tick(&s);
    engine.on_simulation_tick(&keep);
    let t0 = std::time::Instant::now();
    engine.on_frame_render(t0);
    let lit = engine.registry().lit_regions(s.as_ref()).unwrap();
    assert_eq!(lit.len(), 8);
    sink.take();

    drop(s);
    engine.on_frame_render(t0);
    assert_eq!(engine.light_sources_count(), 1);
    let got: RegionSet = sink.take().into_iter().collect();
    assert_eq!(got, lit);
}

#[test]
fn world_switch_clears_registry() {
    let (engine, sink) = engine();
    let s = TestSource::glowing("lum10", at(0.0, 0.0, 0.0));
    engine.on_simulation_tick(&s);
    assert_eq!(engine.light_sources_count(), 1);

    engine.set_active_world(Some(NETHER));
    assert_eq!(engine.light_sources_count(), 0);
    // Source is still in the overworld, so it stays inert.
    engine.on_simulation_tick(&s);
    assert_eq!(engine.light_sources_count(), 0);
    let _ = sink.take();
}
