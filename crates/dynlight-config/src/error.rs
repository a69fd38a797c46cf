use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to write TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unknown {kind} mode '{value}'")]
    UnknownMode { kind: &'static str, value: String },
    #[error("luminance {value} for '{key}' is out of range (0..=15)")]
    LuminanceOutOfRange { key: String, value: i64 },
    #[error("update interval must be positive")]
    NonPositiveInterval,
}
