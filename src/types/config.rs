//! Debounce configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use crate::{DEFAULT_ENTER_THRESHOLD, DEFAULT_EXIT_THRESHOLD, DEFAULT_SUSTAIN_SECS};

/// The three tunables of the debouncer, fixed for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebounceConfig {
    /// Threshold while not active
    pub enter_threshold: f64,
    /// Threshold while active
    pub exit_threshold: f64,
    /// Seconds the score must stay above `enter_threshold` before activating
    pub sustain_duration: f64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            enter_threshold: DEFAULT_ENTER_THRESHOLD,
            exit_threshold: DEFAULT_EXIT_THRESHOLD,
            sustain_duration: DEFAULT_SUSTAIN_SECS,
        }
    }
}

impl DebounceConfig {
    pub fn new(enter_threshold: f64, exit_threshold: f64, sustain_duration: f64) -> Self {
        Self {
            enter_threshold,
            exit_threshold,
            sustain_duration,
        }
    }

    /// Check ranges. Threshold ordering is a convention, not checked here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("enter_threshold", self.enter_threshold)?;
        check_threshold("exit_threshold", self.exit_threshold)?;

        let secs = self.sustain_duration;
        // try_from rejects NaN, infinities, negatives and anything past Duration::MAX
        if secs <= 0.0 || Duration::try_from_secs_f64(secs).is_err() {
            return Err(ConfigError::InvalidSustainDuration(secs));
        }
        Ok(())
    }

    /// Sustain duration as a `Duration`. Zero when `validate` would fail.
    pub fn sustain(&self) -> Duration {
        Duration::try_from_secs_f64(self.sustain_duration).unwrap_or(Duration::ZERO)
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DebounceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sustain(), Duration::from_secs(2));
    }

    #[test]
    fn test_threshold_bounds_inclusive() {
        assert!(DebounceConfig::new(0.0, 1.0, 0.5).validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let err = DebounceConfig::new(-0.1, 0.4, 2.0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold { name: "enter_threshold", .. }));

        let err = DebounceConfig::new(0.3, 1.5, 2.0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold { name: "exit_threshold", .. }));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        assert!(DebounceConfig::new(f64::NAN, 0.4, 2.0).validate().is_err());
    }

    #[test]
    fn test_sustain_must_be_positive() {
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = DebounceConfig::new(0.3, 0.4, secs).validate().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSustainDuration(_)));
        }
    }

    #[test]
    fn test_sustain_beyond_duration_range_rejected() {
        // 2^64 seconds, what `u64::MAX as f64` rounds to
        let secs = 18_446_744_073_709_551_616.0;
        let err = DebounceConfig::new(0.3, 0.4, secs).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSustainDuration(v) if v == secs));
        assert_eq!(DebounceConfig::new(0.3, 0.4, secs).sustain(), Duration::ZERO);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DebounceConfig = serde_json::from_str(r#"{"sustain_duration": 5.0}"#).unwrap();
        assert_eq!(config.enter_threshold, DEFAULT_ENTER_THRESHOLD);
        assert_eq!(config.sustain_duration, 5.0);
    }
}
