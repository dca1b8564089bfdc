//! Debounce state definitions

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Monotonic time since an arbitrary origin
pub type Timestamp = Duration;

/// Mutable core state of the debouncer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DebounceState {
    /// Not looking down (or no face)
    #[default]
    Idle,
    /// Looking down, streak started at `since`, not sustained long enough yet
    Pending { since: Timestamp },
    /// Deterrent running
    Active,
}

impl DebounceState {
    /// True iff the deterrent is running
    pub fn is_active(&self) -> bool {
        matches!(self, DebounceState::Active)
    }

    /// Display projection without the streak start
    pub fn kind(&self) -> GazeState {
        match self {
            DebounceState::Idle => GazeState::Idle,
            DebounceState::Pending { .. } => GazeState::Pending,
            DebounceState::Active => GazeState::Active,
        }
    }
}

/// The three externally visible states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GazeState {
    /// Attentive, or no face in frame
    Idle,
    /// Looking down, waiting for the sustain duration
    Pending,
    /// Distracted, deterrent running
    Active,
}

impl GazeState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            GazeState::Idle => "\x1b[32m",    // Green
            GazeState::Pending => "\x1b[33m", // Yellow
            GazeState::Active => "\x1b[31m",  // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            GazeState::Idle => "👀",
            GazeState::Pending => "⏳",
            GazeState::Active => "💀",
        }
    }
}

impl std::fmt::Display for GazeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GazeState::Idle => "IDLE",
            GazeState::Pending => "PENDING",
            GazeState::Active => "ACTIVE",
        };
        write!(f, "{}", name)
    }
}
