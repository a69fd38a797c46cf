use std::time::{Duration, Instant};

use dynlight_config::{ConfigError, QualityMode};

/// Rate limiter driven by the quality mode's minimum interval.
#[derive(Clone, Copy, Debug, Default)]
pub struct CadenceGate {
    last: Option<Instant>,
    fixed: Option<Duration>,
}

impl CadenceGate {
    pub const fn new() -> Self {
        Self {
            last: None,
            fixed: None,
        }
    }

    /// Gate with its own interval instead of the mode's; still closed when the mode is Off.
    pub fn with_interval(interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::NonPositiveInterval);
        }
        Ok(Self {
            last: None,
            fixed: Some(interval),
        })
    }

    /// Passes at most once per interval; the timestamp moves only on a pass.
    pub fn should_run(&mut self, now: Instant, mode: QualityMode) -> bool {
        let Some(mode_interval) = mode.min_interval() else {
            return false;
        };
        let interval = self.fixed.unwrap_or(mode_interval);
        let due = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= interval,
        };
        if due {
            self.last = Some(now);
        }
        due
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Global frame gate plus the per-source check.
#[derive(Debug, Default)]
pub struct Scheduler {
    global: CadenceGate,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_run_global_update(&mut self, now: Instant, mode: QualityMode) -> bool {
        self.global.should_run(now, mode)
    }

    pub fn should_update_this_source(gate: &mut CadenceGate, now: Instant, mode: QualityMode) -> bool {
        gate.should_run(now, mode)
    }

    pub fn reset(&mut self) {
        self.global.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_mode_waits_half_a_second() {
        let t0 = Instant::now();
        let mut gate = CadenceGate::new();
        assert!(gate.should_run(t0, QualityMode::Slow));
        assert!(!gate.should_run(t0 + Duration::from_millis(100), QualityMode::Slow));
        assert!(gate.should_run(t0 + Duration::from_millis(600), QualityMode::Slow));
        // Measured from the last pass, not the last call.
        assert!(!gate.should_run(t0 + Duration::from_millis(1000), QualityMode::Slow));
        assert!(gate.should_run(t0 + Duration::from_millis(1100), QualityMode::Slow));
    }

    #[test]
    fn fast_and_realtime() {
        let t0 = Instant::now();
        let mut gate = CadenceGate::new();
        assert!(gate.should_run(t0, QualityMode::Fast));
        assert!(!gate.should_run(t0 + Duration::from_millis(150), QualityMode::Fast));
        assert!(gate.should_run(t0 + Duration::from_millis(200), QualityMode::Fast));

        let mut rt = CadenceGate::new();
        for _ in 0..10 {
            assert!(rt.should_run(t0, QualityMode::Realtime));
        }
    }

    #[test]
    fn off_never_runs() {
        let mut gate = CadenceGate::new();
        assert!(!gate.should_run(Instant::now(), QualityMode::Off));
        let mut fixed = CadenceGate::with_interval(Duration::from_millis(50)).unwrap();
        assert!(!fixed.should_run(Instant::now(), QualityMode::Off));
    }

    #[test]
    fn fixed_interval_overrides_mode() {
        let t0 = Instant::now();
        let mut gate = CadenceGate::with_interval(Duration::from_millis(50)).unwrap();
        assert!(gate.should_run(t0, QualityMode::Realtime));
        assert!(!gate.should_run(t0 + Duration::from_millis(10), QualityMode::Realtime));
        assert!(gate.should_run(t0 + Duration::from_millis(60), QualityMode::Realtime));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(matches!(
            CadenceGate::with_interval(Duration::ZERO),
            Err(ConfigError::NonPositiveInterval)
        ));
    }
}
