//! Scripted scene for the headless driver.

use std::sync::Arc;

use dynlight_geom::DVec3;
use dynlight_providers::{Fuse, LightSource, LightState, SourceKind, WorldId};
use fastnoise_lite::{FastNoiseLite, NoiseType};
use parking_lot::Mutex;

const WANDER_RADIUS: f64 = 24.0;
const GROUND_Y: f64 = 64.0;
const TNT_FUSE_TICKS: u32 = 80;

pub struct SceneEntity {
    state: LightState,
    kind: SourceKind,
    key: &'static str,
    world: WorldId,
    eye_height: f64,
    held: Vec<&'static str>,
    pos: Mutex<DVec3>,
    fuse: Mutex<Option<Fuse>>,
    submerged: Mutex<bool>,
    removed: Mutex<bool>,
}

impl SceneEntity {
    fn new(kind: SourceKind, key: &'static str, world: WorldId, pos: DVec3) -> Self {
        Self {
            state: LightState::new(),
            kind,
            key,
            world,
            eye_height: 0.0,
            held: Vec::new(),
            pos: Mutex::new(pos),
            fuse: Mutex::new(None),
            submerged: Mutex::new(false),
            removed: Mutex::new(false),
        }
    }

    fn holding(mut self, item: &'static str) -> Self {
        self.held.push(item);
        self
    }

    fn with_eye_height(mut self, eye_height: f64) -> Self {
        self.eye_height = eye_height;
        self
    }

    fn move_to(&self, pos: DVec3) {
        *self.pos.lock() = pos;
    }
}

impl LightSource for SceneEntity {
    fn light_state(&self) -> &LightState {
        &self.state
    }
    fn world(&self) -> WorldId {
        self.world
    }
    fn position(&self) -> DVec3 {
        *self.pos.lock()
    }
    fn kind(&self) -> SourceKind {
        self.kind
    }
    fn type_key(&self) -> &str {
        self.key
    }
    fn eye_height(&self) -> f64 {
        self.eye_height
    }
    fn is_removed(&self) -> bool {
        *self.removed.lock()
    }
    fn is_submerged(&self) -> bool {
        *self.submerged.lock()
    }
    fn fuse(&self) -> Option<Fuse> {
        *self.fuse.lock()
    }
    fn visit_equipped(&self, visit: &mut dyn FnMut(&str)) {
        for item in &self.held {
            visit(item);
        }
    }
}

pub struct Scene {
    mobs: Vec<Arc<SceneEntity>>,
    player: Arc<SceneEntity>,
    tnt: Arc<SceneEntity>,
    sources: Vec<Arc<dyn LightSource>>,
    noise: FastNoiseLite,
}

impl Scene {
    pub fn new(world: WorldId, mobs: usize, seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(0.02));

        let mobs: Vec<Arc<SceneEntity>> = (0..mobs)
            .map(|i| {
                let item = if i % 3 == 0 { "glowstone" } else { "torch" };
                Arc::new(
                    SceneEntity::new(SourceKind::Living, "zombie", world, DVec3::new(0.0, GROUND_Y, 0.0))
                        .holding(item)
                        .with_eye_height(1.74),
                )
            })
            .collect();
        let player = Arc::new(
            SceneEntity::new(SourceKind::Player, "player", world, DVec3::new(0.5, GROUND_Y, 0.5))
                .holding("torch")
                .with_eye_height(1.62),
        );
        let tnt = Arc::new(SceneEntity::new(
            SourceKind::PrimedExplosive,
            "tnt",
            world,
            DVec3::new(12.5, GROUND_Y, -7.5),
        ));
        *tnt.fuse.lock() = Some(Fuse::new(TNT_FUSE_TICKS, TNT_FUSE_TICKS));
        let lantern = Arc::new(SceneEntity::new(
            SourceKind::BlockEntity,
            "lantern",
            world,
            DVec3::new(-5.5, GROUND_Y + 2.5, 3.5),
        ));

        let mut sources: Vec<Arc<dyn LightSource>> = Vec::with_capacity(mobs.len() + 3);
        sources.extend(mobs.iter().map(|m| m.clone() as Arc<dyn LightSource>));
        sources.push(player.clone());
        sources.push(tnt.clone());
        sources.push(lantern);

        Self {
            mobs,
            player,
            tnt,
            sources,
            noise,
        }
    }

    pub fn sources(&self) -> &[Arc<dyn LightSource>] {
        &self.sources
    }

    /// Advances scripted motion by one simulation tick.
    pub fn tick(&mut self, tick: u64) {
        let t = tick as f32;
        for (i, mob) in self.mobs.iter().enumerate() {
            let lane = i as f32 * 97.0;
            let x = self.noise.get_noise_2d(t, lane) as f64 * WANDER_RADIUS;
            let z = self.noise.get_noise_2d(lane, t) as f64 * WANDER_RADIUS;
            mob.move_to(DVec3::new(x, GROUND_Y, z));
        }

        // Player walks along +X and wades through a pond between x=20 and x=30.
        let px = 0.5 + tick as f64 * 0.2;
        self.player.move_to(DVec3::new(px, GROUND_Y, 0.5));
        *self.player.submerged.lock() = (20.0..30.0).contains(&px);

        let mut fuse = self.tnt.fuse.lock();
        match *fuse {
            Some(Fuse { remaining: 0, .. }) => {
                *fuse = None;
                *self.tnt.removed.lock() = true;
            }
            Some(ref mut f) => f.remaining -= 1,
            None => {}
        }
    }
}
