//! Run configuration
//!
//! A [`MotionConfig`] is built once before the loop starts, either from
//! defaults or from a TOML file, then overlaid with command-line flags and
//! validated. The loop only ever borrows it.
//!
//! ```toml
//! speed = 15
//! sensitivity = 4.0
//! check_interval_ms = 50
//! deviation_limit = 100.0
//! random_start = false
//! run_limit_minutes = 30
//!
//! [timing]
//! sample_delay_ms = 30
//! interference_detections = 5
//! resync_before_sample = false
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options for one bounce run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Pixels moved per iteration on each axis
    pub speed: i32,
    /// Movement (px) inside one sample window that counts as a human touch
    pub sensitivity: f64,
    /// How often the human-movement sample is taken, in milliseconds
    pub check_interval_ms: u64,
    /// Allowed distance (px) between the target and the observed cursor
    pub deviation_limit: f64,
    /// Start at a random point instead of the screen centre
    pub random_start: bool,
    /// Stop after this many minutes; 0 runs until interrupted
    pub run_limit_minutes: u64,
    /// Print progress and bounce diagnostics
    pub verbose: bool,
    /// Pacing and detection constants
    pub timing: Timing,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: 10,
            sensitivity: 5.0,
            check_interval_ms: 50,
            deviation_limit: 100.0,
            random_start: true,
            run_limit_minutes: 0,
            verbose: false,
            timing: Timing::default(),
        }
    }
}

/// Delays and detection thresholds.
///
/// The delays are empirical: long enough for real mouse input to register,
/// short enough for the animation to stay smooth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Gap between the two reads of a human-movement sample
    pub sample_delay_ms: u64,
    /// Wait after moving the cursor before checking where it landed
    pub settle_delay_ms: u64,
    /// Frame pacing sleep at the end of each iteration
    pub step_delay_ms: u64,
    /// Consecutive over-sensitivity samples needed to stop
    pub interference_detections: u32,
    /// Consecutive over-limit deviations needed to stop
    pub deviation_detections: u32,
    /// Put the cursor back on target right before sampling
    pub resync_before_sample: bool,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            sample_delay_ms: 30,
            settle_delay_ms: 1,
            step_delay_ms: 15,
            interference_detections: 3,
            deviation_detections: 3,
            resync_before_sample: true,
        }
    }
}

impl Timing {
    pub fn sample_delay(&self) -> Duration {
        Duration::from_millis(self.sample_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl MotionConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: MotionConfig = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.speed <= 0 {
            return Err(Error::InvalidConfig(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }

        if !self.sensitivity.is_finite() || self.sensitivity < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sensitivity must be a non-negative number, got {}",
                self.sensitivity
            )));
        }

        if !self.deviation_limit.is_finite() || self.deviation_limit <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "deviation limit must be a positive number, got {}",
                self.deviation_limit
            )));
        }

        if self.timing.interference_detections == 0 {
            return Err(Error::InvalidConfig(
                "interference_detections must be at least 1".to_string(),
            ));
        }

        if self.timing.deviation_detections == 0 {
            return Err(Error::InvalidConfig(
                "deviation_detections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    /// Wall-clock budget for the run, `None` when unbounded
    pub fn run_limit(&self) -> Option<Duration> {
        match self.run_limit_minutes {
            0 => None,
            minutes => Some(Duration::from_secs(minutes.saturating_mul(60))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = MotionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.run_limit(), None);
        assert_eq!(config.check_interval(), Duration::from_millis(50));
    }

    #[test]
    fn run_limit_in_minutes() {
        let config = MotionConfig {
            run_limit_minutes: 2,
            ..Default::default()
        };
        assert_eq!(config.run_limit(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            MotionConfig {
                speed: 0,
                ..Default::default()
            },
            MotionConfig {
                sensitivity: f64::NAN,
                ..Default::default()
            },
            MotionConfig {
                deviation_limit: 0.0,
                ..Default::default()
            },
            MotionConfig {
                timing: Timing {
                    deviation_detections: 0,
                    ..Default::default()
                },
                ..Default::default()
            },
        ];

        for config in bad {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "accepted {config:?}"
            );
        }
    }

    #[test]
    fn loads_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "speed = 25\nrandom_start = false\n\n[timing]\ninterference_detections = 5"
        )
        .unwrap();

        let config = MotionConfig::load(file.path()).unwrap();

        assert_eq!(config.speed, 25);
        assert!(!config.random_start);
        assert_eq!(config.sensitivity, 5.0);
        assert_eq!(config.timing.interference_detections, 5);
        assert_eq!(config.timing.deviation_detections, 3);
    }

    #[test]
    fn load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "speed = \"fast\"").unwrap();

        let err = MotionConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn load_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "speed = -3").unwrap();

        let err = MotionConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
