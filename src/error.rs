//! Error types for setting up a bounce run.
//!
//! Once the motion loop is running it has no failure modes of its own; every
//! way out of it is a [`TerminationReason`](crate::motion::TerminationReason).
//! These errors cover everything that can go wrong before that point.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`MotionConfig`](crate::config::MotionConfig)
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The platform refused to report the screen size
    #[error("Failed to query screen size: {0}")]
    ScreenQuery(String),

    /// The reported screen has no area to bounce in
    #[error("Screen has no usable area ({width}x{height})")]
    EmptyScreen { width: i32, height: i32 },

    /// Installing the interrupt handler failed
    #[error("Failed to install signal handler: {0}")]
    Signal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
