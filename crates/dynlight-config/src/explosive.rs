use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// How primed explosives emit light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExplosiveLightingMode {
    Off,
    /// Constant level while the fuse burns.
    Simple,
    /// Brightens as the fuse runs out.
    #[default]
    Fancy,
}

impl ExplosiveLightingMode {
    pub const ALL: [ExplosiveLightingMode; 3] = [
        ExplosiveLightingMode::Off,
        ExplosiveLightingMode::Simple,
        ExplosiveLightingMode::Fancy,
    ];

    #[inline]
    pub fn is_enabled(self) -> bool {
        self != ExplosiveLightingMode::Off
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            ExplosiveLightingMode::Off => "off",
            ExplosiveLightingMode::Simple => "simple",
            ExplosiveLightingMode::Fancy => "fancy",
        }
    }
}

impl fmt::Display for ExplosiveLightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExplosiveLightingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownMode {
                kind: "explosive lighting",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for ExplosiveLightingMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExplosiveLightingMode> for String {
    fn from(value: ExplosiveLightingMode) -> Self {
        value.name().to_string()
    }
}
