//! State-change events emitted by the debouncer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GazeEvent {
    /// Sustained looking-down streak completed, start the deterrent
    Activate,
    /// Active streak ended, stop the deterrent
    Deactivate,
}

impl std::fmt::Display for GazeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GazeEvent::Activate => write!(f, "ACTIVATE"),
            GazeEvent::Deactivate => write!(f, "DEACTIVATE"),
        }
    }
}
