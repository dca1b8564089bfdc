//! Error types
//!
//! `GazeDebouncer::update` never fails; everything here belongs to construction or to the
//! collaborators around the debouncer.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid debounce configuration, or a config file that could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("sustain_duration must be a finite number of seconds > 0, got {0}")]
    InvalidSustainDuration(f64),
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of an external deterrent action
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write banner: {0}")]
    Write(#[from] std::io::Error),
}

/// Bad frame trace input
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid record: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: timestamp must be finite and >= 0, got {value}")]
    InvalidTimestamp { line: usize, value: f64 },
}

/// Failure while driving a monitoring session
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("action failed: {0}")]
    Sink(#[from] SinkError),
}
