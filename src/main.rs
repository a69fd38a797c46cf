mod scene;
mod watch;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use dynlight_config::{DynLightsConfig, QualityMode};
use dynlight_engine::{CollectingRemeshSink, DynamicLightsEngine};
use dynlight_providers::{ItemLightSources, LuminanceProviders, WorldId};

use scene::Scene;

const TICK: Duration = Duration::from_millis(50);
const OVERWORLD: WorldId = WorldId(0);

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless dynamic lighting driver", long_about = None)]
struct Args {
    /// Lighting settings (TOML, `[lighting]` table)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Item light table (TOML, `[items.<id>]` tables)
    #[arg(long)]
    items: Option<PathBuf>,
    /// Override the configured quality mode
    #[arg(long)]
    quality: Option<QualityMode>,
    #[arg(long, default_value_t = 600)]
    frames: u64,
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Torch-carrying mobs wandering around the origin
    #[arg(long, default_value_t = 8)]
    mobs: usize,
    #[arg(long, default_value_t = 1337)]
    seed: i32,
    /// Reload the item table when its file changes (runs in real time)
    #[arg(long)]
    watch: bool,
}

const DEFAULT_ITEMS: &str = r#"
[items.torch]
luminance = 14
water_sensitive = true

[items.glowstone]
luminance = 15
"#;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DynLightsConfig::load_from_path(path)?,
        None => DynLightsConfig::default(),
    };
    if let Some(q) = args.quality {
        config.quality = q;
    }

    let items = match &args.items {
        Some(path) => {
            let items = ItemLightSources::new();
            items.reload_from_path(path)?;
            items
        }
        None => ItemLightSources::from_toml_str(DEFAULT_ITEMS)?,
    };
    let providers = LuminanceProviders::with_defaults(Arc::new(items));

    let sink = Arc::new(CollectingRemeshSink::new());
    let engine = DynamicLightsEngine::new(config, providers, sink.clone());
    engine.set_active_world(Some(OVERWORLD));

    let reload_rx = match (&args.items, args.watch) {
        (Some(path), true) => Some(watch::watch_file(path.clone())),
        _ => None,
    };

    let mut scene = Scene::new(OVERWORLD, args.mobs, args.seed);
    let frame = Duration::from_millis(args.frame_ms);
    let start = Instant::now();
    let mut next_tick = Duration::ZERO;
    let mut tick = 0u64;
    let mut remeshed = 0usize;

    for i in 0..args.frames {
        let elapsed = Duration::from_millis(args.frame_ms.saturating_mul(i));
        while next_tick <= elapsed {
            scene.tick(tick);
            for source in scene.sources() {
                engine.on_simulation_tick(source);
            }
            tick += 1;
            next_tick += TICK;
        }

        if let (Some(rx), Some(path)) = (&reload_rx, &args.items) {
            if rx.try_iter().count() > 0 {
                if let Err(e) = engine.providers().items().reload_from_path(path) {
                    log::warn!(target: "dynlights::config", "item table reload failed: {}", e);
                }
            }
        }

        let now = if args.watch { Instant::now() } else { start + elapsed };
        let updated = engine.on_frame_render(now);
        let regions = sink.drain();
        remeshed += regions.len();
        log::trace!(target: "dynlights", "frame {}: {} updated, {} regions", i, updated, regions.len());
        if i % 60 == 0 {
            log::info!(target: "dynlights", "frame {}: {}", i, engine.debug_line());
        }
        if args.watch {
            std::thread::sleep(frame);
        }
    }

    log::info!(
        target: "dynlights",
        "{} frames, {} ticks, {} region re-meshes requested",
        args.frames,
        tick,
        remeshed
    );
    engine.shutdown();
    Ok(())
}
