//! Light source capabilities and the luminance providers that feed the engine.
#![forbid(unsafe_code)]

mod builtin;
mod handlers;
mod items;
mod source;

use std::sync::Arc;

use dynlight_config::DynLightsConfig;

pub use builtin::{
    EXPLOSIVE_PROJECTILE_LUMINANCE, ON_FIRE_LUMINANCE, SIMPLE_EXPLOSIVE_LUMINANCE,
    fancy_fuse_luminance,
};
pub use handlers::{LightHandlers, LuminanceHandler};
pub use items::{ItemLight, ItemLightSources};
pub use source::{Fuse, LightSource, LightState, SourceKind, WorldId};

/// Item table plus per-type handlers; one per session.
pub struct LuminanceProviders {
    items: Arc<ItemLightSources>,
    handlers: LightHandlers,
}

impl Default for LuminanceProviders {
    fn default() -> Self {
        Self::new(Arc::new(ItemLightSources::new()))
    }
}

impl LuminanceProviders {
    pub fn new(items: Arc<ItemLightSources>) -> Self {
        Self {
            items,
            handlers: LightHandlers::new(),
        }
    }

    /// Providers with the stock per-type handlers registered.
    pub fn with_defaults(items: Arc<ItemLightSources>) -> Self {
        let providers = Self::new(items);
        providers.register_default_handlers();
        providers
    }

    fn register_default_handlers(&self) {
        self.handlers.register_constant("blaze", 10);
        self.handlers.register_constant("magma_cube", 8);
        self.handlers.register_constant("spectral_arrow", 8);
        self.handlers.register_constant("glow_squid", 6);
        self.handlers.register_constant("lantern", 15);
        self.handlers.register_constant("campfire", 15);
        // Dropped items and item frames shine like the item they show.
        let items = Arc::clone(&self.items);
        let shown_item = move |source: &dyn LightSource| builtin::equipped_luminance(source, &items);
        self.handlers.register("item", shown_item.clone());
        self.handlers.register("item_frame", shown_item);
    }

    pub fn items(&self) -> &Arc<ItemLightSources> {
        &self.items
    }

    pub fn handlers(&self) -> &LightHandlers {
        &self.handlers
    }

    /// Luminance `source` emits this tick under `config`, in 0..=15.
    pub fn compute(&self, source: &dyn LightSource, config: &DynLightsConfig) -> u8 {
        builtin::compute(source, config, &self.items, &self.handlers)
    }
}
