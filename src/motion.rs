//! The bounce loop and its human-intervention detectors.
//!
//! Every iteration runs the same fixed sequence:
//!
//! 1. stop if the [`TerminationSource`] fired
//! 2. stop if the configured run limit has elapsed
//! 3. when the check interval has passed, sample the cursor twice across a
//!    short delay and feed the movement into the interference detector
//! 4. put the cursor on the target position
//! 5. after a settle delay, feed the target-vs-actual distance into the
//!    deviation detector
//! 6. advance the animation and bounce off the screen edges
//! 7. sleep for one frame
//!
//! Both detectors need several *consecutive* hits before stopping: cursor
//! APIs lag and jitter, so one bad reading on its own means nothing.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::clock::Clock;
use crate::config::MotionConfig;
use crate::cursor::CursorPort;
use crate::error::{Error, Result};
use crate::geometry::{advance, Point, Screen, Velocity};
use crate::termination::TerminationSource;

/// How often a progress line is logged in verbose mode
const PROGRESS_EVERY: u64 = 100;

/// Why the loop stopped. None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum TerminationReason {
    /// Ctrl+C / SIGTERM
    ManualInterrupt,
    /// The run limit elapsed
    Timeout,
    /// Sampled movement stayed above the sensitivity threshold
    HumanInterference { movement: f64 },
    /// The cursor kept ending up away from where it was put
    DeviationExceeded { deviation: f64 },
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManualInterrupt => "manual-interrupt",
            Self::Timeout => "timeout",
            Self::HumanInterference { .. } => "human-interference",
            Self::DeviationExceeded { .. } => "deviation-exceeded",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManualInterrupt => write!(f, "Stopped manually (Ctrl+C)"),
            Self::Timeout => write!(f, "Run time limit reached"),
            Self::HumanInterference { movement } => {
                write!(f, "Mouse movement detected ({:.1} px)", movement)
            }
            Self::DeviationExceeded { deviation } => {
                write!(f, "Interference detected (deviation: {:.1} px)", deviation)
            }
        }
    }
}

/// Outcome of feeding one measurement into a [`StreakDetector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// At or below the threshold; the streak was reset
    Clean,
    /// Above the threshold, streak not long enough yet
    Suspect { streak: u32 },
    /// Above the threshold for the required number of observations in a row
    Triggered,
}

/// Counts consecutive measurements strictly above a threshold
#[derive(Debug, Clone, PartialEq)]
pub struct StreakDetector {
    threshold: f64,
    required: u32,
    streak: u32,
}

impl StreakDetector {
    pub fn new(threshold: f64, required: u32) -> Self {
        Self {
            threshold,
            required: required.max(1),
            streak: 0,
        }
    }

    pub fn observe(&mut self, value: f64) -> Detection {
        if value > self.threshold {
            self.streak += 1;
            if self.streak >= self.required {
                Detection::Triggered
            } else {
                Detection::Suspect {
                    streak: self.streak,
                }
            }
        } else {
            self.streak = 0;
            Detection::Clean
        }
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }
}

/// Animation and detection state owned by a single run
#[derive(Debug, Clone)]
pub struct MotionState {
    position: Point,
    velocity: Velocity,
    iterations: u64,
    started: Instant,
    last_check: Instant,
    interference: StreakDetector,
    deviation: StreakDetector,
}

impl MotionState {
    pub fn new(config: &MotionConfig, position: Point, velocity: Velocity, now: Instant) -> Self {
        Self {
            position,
            velocity,
            iterations: 0,
            started: now,
            last_check: now,
            interference: StreakDetector::new(
                config.sensitivity,
                config.timing.interference_detections,
            ),
            deviation: StreakDetector::new(
                config.deviation_limit,
                config.timing.deviation_detections,
            ),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn consecutive_interference(&self) -> u32 {
        self.interference.streak()
    }

    pub fn consecutive_deviation(&self) -> u32 {
        self.deviation.streak()
    }
}

/// What a finished run looked like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub reason: TerminationReason,
    pub iterations: u64,
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
    pub final_position: Point,
}

impl RunSummary {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Drives the cursor until something tells it to stop
pub struct MotionLoop<'a, P, T, C> {
    config: &'a MotionConfig,
    port: P,
    termination: T,
    clock: C,
    screen: Screen,
}

impl<'a, P, T, C> MotionLoop<'a, P, T, C>
where
    P: CursorPort,
    T: TerminationSource,
    C: Clock,
{
    /// Queries the screen size once; it is fixed for the rest of the run
    pub fn new(config: &'a MotionConfig, port: P, termination: T, clock: C) -> Result<Self> {
        let screen = port.screen_size()?;
        if screen.is_empty() {
            return Err(Error::EmptyScreen {
                width: screen.width,
                height: screen.height,
            });
        }

        Ok(Self {
            config,
            port,
            termination,
            clock,
            screen,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Starting point for a run: random or centred depending on the config
    pub fn initial_position<R: Rng>(&self, rng: &mut R) -> Point {
        if self.config.random_start {
            Point::new(
                rng.gen_range(0..self.screen.width),
                rng.gen_range(0..self.screen.height),
            )
        } else {
            self.screen.center()
        }
    }

    pub fn run(&mut self) -> RunSummary {
        let start = self.initial_position(&mut rand::thread_rng());
        self.run_from(start, Velocity::diagonal(self.config.speed))
    }

    pub fn run_from(&mut self, start: Point, velocity: Velocity) -> RunSummary {
        let started_at = Utc::now();
        let mut state = MotionState::new(
            self.config,
            self.screen.clamp(start),
            velocity,
            self.clock.now(),
        );

        info!(
            "Bouncing on {}x{} from ({}, {})",
            self.screen.width, self.screen.height, state.position.x, state.position.y
        );

        let reason = loop {
            if let Some(reason) = self.step(&mut state) {
                break reason;
            }
        };

        let elapsed = self.clock.now().saturating_duration_since(state.started);
        info!(
            "Stopped after {} iterations ({:?}): {}",
            state.iterations,
            elapsed,
            reason.as_str()
        );

        RunSummary {
            reason,
            iterations: state.iterations,
            elapsed,
            started_at,
            final_position: state.position,
        }
    }

    /// Non-blocking, read-only check of the termination source
    pub fn interrupted(&self) -> bool {
        self.termination.has_fired()
    }

    fn step(&mut self, state: &mut MotionState) -> Option<TerminationReason> {
        if self.interrupted() {
            return Some(TerminationReason::ManualInterrupt);
        }

        let now = self.clock.now();
        if let Some(limit) = self.config.run_limit() {
            if now.saturating_duration_since(state.started) >= limit {
                return Some(TerminationReason::Timeout);
            }
        }

        state.iterations += 1;
        let target = state.position;
        let mut placed = false;

        if now.saturating_duration_since(state.last_check) >= self.config.check_interval() {
            if self.config.timing.resync_before_sample {
                self.port.set_position(target);
                placed = true;
            }

            let movement = self.sample_movement();
            match state.interference.observe(movement) {
                Detection::Triggered => {
                    return Some(TerminationReason::HumanInterference { movement });
                }
                Detection::Suspect { streak } => {
                    debug!("Sampled movement {:.1} px (streak {})", movement, streak);
                }
                Detection::Clean => {}
            }
            state.last_check = now;
        }

        if !placed {
            self.port.set_position(target);
        }

        self.clock.sleep(self.config.timing.settle_delay());
        let deviation = self.port.position().distance(target);
        match state.deviation.observe(deviation) {
            Detection::Triggered => {
                return Some(TerminationReason::DeviationExceeded { deviation });
            }
            Detection::Suspect { streak } => {
                debug!("Cursor off target by {:.1} px (streak {})", deviation, streak);
            }
            Detection::Clean => {}
        }

        if self.config.verbose && state.iterations % PROGRESS_EVERY == 0 {
            info!(
                "Position: ({:4}, {:4}) | Deviation: {:.1} px | Iterations: {}",
                target.x, target.y, deviation, state.iterations
            );
        }

        let bounce = advance(&mut state.position, &mut state.velocity, self.screen);
        if bounce.any() {
            if self.config.verbose {
                info!(
                    "Bounce x={} y={} at ({}, {})",
                    bounce.x, bounce.y, state.position.x, state.position.y
                );
            } else {
                trace!("Bounce at ({}, {})", state.position.x, state.position.y);
            }
        }

        self.clock.sleep(self.config.timing.step_delay());
        None
    }

    /// Distance the cursor travelled across one sample delay
    fn sample_movement(&self) -> f64 {
        let before = self.port.position();
        self.clock.sleep(self.config.timing.sample_delay());
        let after = self.port.position();
        before.distance(after)
    }
}
