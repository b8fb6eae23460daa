use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dvd_cursor::cli::Cli;
use dvd_cursor::report;
use dvd_cursor::{MotionConfig, MotionLoop, SignalFlag, SystemClock, SystemCursor};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => MotionConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => MotionConfig::default(),
    };
    let config = cli.apply(config);
    config.validate().context("Invalid command-line options")?;
    debug!("Config: {:?}", config);

    let stop = SignalFlag::register()?;
    let mut motion = MotionLoop::new(&config, SystemCursor::new(), stop, SystemClock)
        .context("Failed to initialise cursor control")?;

    if !cli.json {
        report::print_banner(&config, motion.screen());
    }

    let summary = motion.run();
    info!("Finished: {}", summary.reason.as_str());

    if cli.json {
        println!("{}", summary.to_json_pretty());
    } else {
        report::print_summary(&summary);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dvd_cursor={},warn", level)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
