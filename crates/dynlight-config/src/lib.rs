//! Dynamic lighting settings and their TOML loading.
#![forbid(unsafe_code)]

mod error;
mod explosive;
mod quality;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::ConfigError;
pub use explosive::ExplosiveLightingMode;
pub use quality::QualityMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynLightsConfig {
    pub quality: QualityMode,
    /// Non-player entities may emit light.
    pub entity_lighting: bool,
    pub block_entity_lighting: bool,
    pub explosive_lighting: ExplosiveLightingMode,
}

impl Default for DynLightsConfig {
    fn default() -> Self {
        Self {
            quality: QualityMode::Realtime,
            entity_lighting: true,
            block_entity_lighting: true,
            explosive_lighting: ExplosiveLightingMode::Fancy,
        }
    }
}

// On-disk layout: everything lives under a `[lighting]` table.
#[derive(Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    lighting: DynLightsConfig,
}

impl DynLightsConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(toml_str)?;
        Ok(file.lighting)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&s)?;
        log::info!(
            target: "dynlights::config",
            "loaded {} (quality={} entities={} block_entities={} explosives={})",
            path.display(),
            cfg.quality,
            cfg.entity_lighting,
            cfg.block_entity_lighting,
            cfg.explosive_lighting
        );
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(&ConfigFile { lighting: *self })?)
    }
}
