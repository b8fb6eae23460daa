//! Command-line flags

use std::path::PathBuf;

use clap::Parser;

use crate::config::MotionConfig;

/// DVD logo effect for your mouse cursor. Stops as soon as you move the mouse.
#[derive(Parser, Debug)]
#[command(name = "dvd_cursor")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    dvd_cursor                              # Run with defaults
    dvd_cursor -s 20                        # Faster (20 px per step)
    dvd_cursor --speed 5 --sensitivity 10   # Slower and less jumpy
    dvd_cursor -t 30                        # Stop on its own after 30 minutes

Ctrl+C exits. Moving the mouse exits too.")]
pub struct Cli {
    /// Cursor speed in pixels per step
    #[arg(short, long)]
    pub speed: Option<i32>,

    /// Movement in pixels that counts as a human touching the mouse
    #[arg(long, visible_alias = "sens")]
    pub sensitivity: Option<f64>,

    /// Movement check interval in milliseconds
    #[arg(short = 'i', long = "interval")]
    pub interval: Option<u64>,

    /// Target-vs-actual distance in pixels that counts as interference
    #[arg(short, long)]
    pub deviation: Option<f64>,

    /// Start at a random position (false starts at the screen centre)
    #[arg(short, long, value_name = "BOOL")]
    pub random: Option<bool>,

    /// Stop after this many minutes (0 = run until interrupted)
    #[arg(short = 't', long = "time-limit", value_name = "MINUTES")]
    pub time_limit: Option<u64>,

    /// Print progress and bounce diagnostics
    #[arg(long)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(short, long, env = "DVD_CURSOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the final statistics as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Override config with CLI arguments
    pub fn apply(&self, mut config: MotionConfig) -> MotionConfig {
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(sensitivity) = self.sensitivity {
            config.sensitivity = sensitivity;
        }
        if let Some(interval) = self.interval {
            config.check_interval_ms = interval;
        }
        if let Some(deviation) = self.deviation {
            config.deviation_limit = deviation;
        }
        if let Some(random) = self.random {
            config.random_start = random;
        }
        if let Some(minutes) = self.time_limit {
            config.run_limit_minutes = minutes;
        }
        if self.verbose {
            config.verbose = true;
        }
        config
    }
}
