use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Global cadence of dynamic light re-evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QualityMode {
    Off,
    Slow,
    Fast,
    #[default]
    Realtime,
}

impl QualityMode {
    pub const ALL: [QualityMode; 4] = [
        QualityMode::Off,
        QualityMode::Slow,
        QualityMode::Fast,
        QualityMode::Realtime,
    ];

    #[inline]
    pub fn is_enabled(self) -> bool {
        self != QualityMode::Off
    }

    /// Minimum time between two re-evaluation passes; `None` never runs.
    #[inline]
    pub fn min_interval(self) -> Option<Duration> {
        match self {
            QualityMode::Off => None,
            QualityMode::Slow => Some(Duration::from_millis(500)),
            QualityMode::Fast => Some(Duration::from_millis(200)),
            QualityMode::Realtime => Some(Duration::ZERO),
        }
    }

    /// Per-axis movement (in voxels) below which a source is considered stationary.
    #[inline]
    pub fn movement_threshold(self) -> f64 {
        match self {
            QualityMode::Slow => 0.5,
            QualityMode::Fast => 0.2,
            QualityMode::Off | QualityMode::Realtime => 0.0,
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityMode::Off => "off",
            QualityMode::Slow => "slow",
            QualityMode::Fast => "fast",
            QualityMode::Realtime => "realtime",
        }
    }
}

impl fmt::Display for QualityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QualityMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownMode {
                kind: "quality",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for QualityMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QualityMode> for String {
    fn from(value: QualityMode) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("REALTIME".parse::<QualityMode>().unwrap(), QualityMode::Realtime);
        assert_eq!(" slow ".parse::<QualityMode>().unwrap(), QualityMode::Slow);
        assert!("medium".parse::<QualityMode>().is_err());
    }

    #[test]
    fn next_cycles_through_all_modes() {
        let mut m = QualityMode::Off;
        for expected in [QualityMode::Slow, QualityMode::Fast, QualityMode::Realtime, QualityMode::Off] {
            m = m.next();
            assert_eq!(m, expected);
        }
    }

    #[test]
    fn intervals_and_thresholds() {
        assert_eq!(QualityMode::Off.min_interval(), None);
        assert_eq!(QualityMode::Slow.min_interval(), Some(Duration::from_millis(500)));
        assert_eq!(QualityMode::Fast.min_interval(), Some(Duration::from_millis(200)));
        assert_eq!(QualityMode::Realtime.min_interval(), Some(Duration::ZERO));
        assert_eq!(QualityMode::Slow.movement_threshold(), 0.5);
        assert_eq!(QualityMode::Fast.movement_threshold(), 0.2);
        assert_eq!(QualityMode::Realtime.movement_threshold(), 0.0);
    }
}
