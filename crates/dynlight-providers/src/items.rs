use std::fs;
use std::path::Path;

use dynlight_config::ConfigError;
use hashbrown::HashMap;
use parking_lot::RwLock;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemLight {
    pub luminance: u8,
    /// Goes dark when the holder is submerged.
    pub water_sensitive: bool,
}

#[derive(Deserialize)]
struct ItemLightDef {
    luminance: i64,
    #[serde(default)]
    water_sensitive: bool,
}

#[derive(Deserialize)]
struct ItemsFile {
    #[serde(default)]
    items: std::collections::BTreeMap<String, ItemLightDef>,
}

/// Luminance of held or worn items, keyed by item id.
#[derive(Debug, Default)]
pub struct ItemLightSources {
    table: RwLock<HashMap<String, ItemLight>>,
}

impl ItemLightSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            table: RwLock::new(parse_table(toml_str)?),
        })
    }

    /// Replaces the whole table; on error the old table stays in place.
    pub fn reload_from_toml_str(&self, toml_str: &str) -> Result<usize, ConfigError> {
        let table = parse_table(toml_str)?;
        let n = table.len();
        *self.table.write() = table;
        log::info!(target: "dynlights::config", "item light table reloaded ({} items)", n);
        Ok(n)
    }

    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> Result<usize, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.reload_from_toml_str(&s)
    }

    pub fn insert(&self, item: impl Into<String>, light: ItemLight) {
        let light = ItemLight {
            luminance: light.luminance.min(15),
            ..light
        };
        self.table.write().insert(item.into(), light);
    }

    pub fn get(&self, item: &str) -> Option<ItemLight> {
        self.table.read().get(item).copied()
    }

    /// 0 for unknown items and for water-sensitive items while submerged.
    pub fn luminance(&self, item: &str, submerged: bool) -> u8 {
        match self.get(item) {
            Some(light) if light.water_sensitive && submerged => 0,
            Some(light) => light.luminance,
            None => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }
}

fn parse_table(toml_str: &str) -> Result<HashMap<String, ItemLight>, ConfigError> {
    let file: ItemsFile = toml::from_str(toml_str)?;
    let mut table = HashMap::with_capacity(file.items.len());
    for (key, def) in file.items {
        if !(0..=15).contains(&def.luminance) {
            return Err(ConfigError::LuminanceOutOfRange {
                key,
                value: def.luminance,
            });
        }
        table.insert(
            key,
            ItemLight {
                luminance: def.luminance as u8,
                water_sensitive: def.water_sensitive,
            },
        );
    }
    Ok(table)
}
