//! # DVD Cursor
//!
//! Bounces the system mouse cursor around the screen like the old DVD
//! screensaver logo, and gets out of the way as soon as a person reaches for
//! the mouse.
//!
//! ## Features
//!
//! - Edge-reflecting cursor animation at a configurable speed
//! - Human-movement detection by periodic before/after cursor sampling
//! - Target-vs-actual deviation tracking
//! - Clean stop on Ctrl+C / SIGTERM or after an optional time limit
//! - TOML configuration with command-line overrides
//!
//! ## Example
//!
//! ```no_run
//! use dvd_cursor::{MotionConfig, MotionLoop, SignalFlag, SystemClock, SystemCursor};
//!
//! fn main() -> dvd_cursor::Result<()> {
//!     let config = MotionConfig::default();
//!     let stop = SignalFlag::register()?;
//!     let mut motion = MotionLoop::new(&config, SystemCursor::new(), stop, SystemClock)?;
//!     let summary = motion.run();
//!     println!("{}", summary.reason);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod report;
pub mod termination;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{MotionConfig, Timing};
pub use cursor::{CursorPort, SystemCursor};
pub use error::{Error, Result};
pub use geometry::{Point, Screen, Velocity};
pub use motion::{MotionLoop, RunSummary, TerminationReason};
pub use termination::{Never, SignalFlag, TerminationSource};
