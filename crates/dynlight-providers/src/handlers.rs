use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::LightSource;

/// Computes the luminance a source of a given type emits.
pub trait LuminanceHandler: Send + Sync {
    fn luminance(&self, source: &dyn LightSource) -> u8;
}

impl<F> LuminanceHandler for F
where
    F: Fn(&dyn LightSource) -> u8 + Send + Sync,
{
    fn luminance(&self, source: &dyn LightSource) -> u8 {
        self(source)
    }
}

/// Per-type handler chain. Several handlers on one type combine with `max`.
#[derive(Default)]
pub struct LightHandlers {
    by_type: RwLock<HashMap<String, Vec<Arc<dyn LuminanceHandler>>>>,
}

impl LightHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, type_key: impl Into<String>, handler: impl LuminanceHandler + 'static) {
        let type_key = type_key.into();
        log::debug!(target: "dynlights", "luminance handler registered for '{}'", type_key);
        self.by_type
            .write()
            .entry(type_key)
            .or_default()
            .push(Arc::new(handler));
    }

    /// Fixed luminance for every source of `type_key`.
    pub fn register_constant(&self, type_key: impl Into<String>, luminance: u8) {
        let luminance = luminance.min(15);
        self.register(type_key, move |_: &dyn LightSource| luminance);
    }

    /// Max over the handlers registered for the source's type; 0 when none are.
    pub fn luminance_of(&self, source: &dyn LightSource) -> u8 {
        let handlers = match self.by_type.read().get(source.type_key()) {
            Some(list) => list.clone(),
            None => return 0,
        };
        handlers
            .iter()
            .map(|h| h.luminance(source).min(15))
            .max()
            .unwrap_or(0)
    }
}
