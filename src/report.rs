//! Human-readable console output: the startup banner and the final statistics.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};

use crate::config::MotionConfig;
use crate::geometry::Screen;
use crate::motion::RunSummary;

/// Get current timestamp in formatted string
pub fn timestamp() -> String {
    format_timestamp(Utc::now())
}

fn format_timestamp(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Duration rounded to whole milliseconds
pub fn round_to_millis(duration: Duration) -> Duration {
    let micros = duration.as_micros();
    let millis = (micros + 500) / 1000;
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

pub fn banner(config: &MotionConfig, screen: Screen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "╔════════════════════════════════════════════╗");
    let _ = writeln!(out, "║          DVD Cursor Bounce v{:<15}║", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out, "╚════════════════════════════════════════════╝");
    let _ = writeln!(out);
    let _ = writeln!(out, "Settings:");
    let _ = writeln!(out, "   • Screen: {}x{}", screen.width, screen.height);
    let _ = writeln!(out, "   • Speed: {} px/step", config.speed);
    let _ = writeln!(out, "   • Sensitivity: {:.1} px", config.sensitivity);
    let _ = writeln!(out, "   • Check interval: {} ms", config.check_interval_ms);
    let _ = writeln!(out, "   • Deviation limit: {:.1} px", config.deviation_limit);
    match config.run_limit_minutes {
        0 => {
            let _ = writeln!(out, "   • Run limit: none");
        }
        minutes => {
            let _ = writeln!(out, "   • Run limit: {} min", minutes);
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "[{}] Starting... (Ctrl+C or move the mouse to exit)",
        timestamp()
    );
    out
}

pub fn summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}.", summary.reason);
    let _ = writeln!(out);
    let _ = writeln!(out, "Statistics:");
    let _ = writeln!(out, "   • Started: {}", format_timestamp(summary.started_at));
    let _ = writeln!(out, "   • Iterations: {}", summary.iterations);
    let _ = writeln!(out, "   • Run time: {:?}", round_to_millis(summary.elapsed));
    let _ = writeln!(out);
    let _ = writeln!(out, "See you!");
    out
}

pub fn print_banner(config: &MotionConfig, screen: Screen) {
    print!("{}", banner(config, screen));
}

pub fn print_summary(run: &RunSummary) {
    print!("{}", summary(run));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::motion::TerminationReason;

    #[test]
    fn rounds_to_millis() {
        assert_eq!(
            round_to_millis(Duration::from_micros(1_234_567)),
            Duration::from_millis(1235)
        );
        assert_eq!(
            round_to_millis(Duration::from_micros(999)),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn banner_lists_settings() {
        let config = MotionConfig {
            run_limit_minutes: 5,
            ..Default::default()
        };
        let text = banner(&config, Screen::new(1920, 1080));

        assert!(text.contains("Screen: 1920x1080"));
        assert!(text.contains("Speed: 10 px/step"));
        assert!(text.contains("Run limit: 5 min"));
    }

    #[test]
    fn summary_has_reason_and_counts() {
        let run = RunSummary {
            reason: TerminationReason::ManualInterrupt,
            iterations: 1234,
            elapsed: Duration::from_micros(2_500_400),
            started_at: Utc::now(),
            final_position: Point::new(0, 0),
        };
        let text = summary(&run);

        assert!(text.contains("Stopped manually (Ctrl+C)."));
        assert!(text.contains("Iterations: 1234"));
        assert!(text.contains("Run time: 2.5s"));
    }
}
