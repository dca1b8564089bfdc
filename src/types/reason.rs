//! Reason codes for per-tick debounce decisions

use serde::{Deserialize, Serialize};

/// Why the debouncer ended a tick in the state it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // G001: Input
    // =========================================================================
    /// No face or no usable blendshapes this tick
    G001_NO_FACE,

    // =========================================================================
    // G002: Threshold
    // =========================================================================
    /// Score at or below the threshold in effect
    G002_BELOW_THRESHOLD,

    // =========================================================================
    // G003: Streak
    // =========================================================================
    /// Rising edge, streak timer started
    G003_STREAK_STARTED,
    /// Still looking down, sustain duration not reached
    G003_STREAK_ACCUMULATING,
    /// Pending streak broken before it was sustained
    G003_STREAK_RESET,

    // =========================================================================
    // G004: Active
    // =========================================================================
    /// Sustain duration reached, deterrent started
    G004_ACTIVATED,
    /// Still above the exit threshold
    G004_HOLDING,

    // =========================================================================
    // G005: Deactivation
    // =========================================================================
    /// Score dropped to or below the exit threshold while active
    G005_DEACTIVATED,
    /// Face lost while active
    G005_FACE_LOST,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::G001_NO_FACE => "G001_NO_FACE",
            Self::G002_BELOW_THRESHOLD => "G002_BELOW_THRESHOLD",
            Self::G003_STREAK_STARTED => "G003_STREAK_STARTED",
            Self::G003_STREAK_ACCUMULATING => "G003_STREAK_ACCUMULATING",
            Self::G003_STREAK_RESET => "G003_STREAK_RESET",
            Self::G004_ACTIVATED => "G004_ACTIVATED",
            Self::G004_HOLDING => "G004_HOLDING",
            Self::G005_DEACTIVATED => "G005_DEACTIVATED",
            Self::G005_FACE_LOST => "G005_FACE_LOST",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::G001_NO_FACE => "No face detected",
            Self::G002_BELOW_THRESHOLD => "Attentive",
            Self::G003_STREAK_STARTED => "Looking down, timer started",
            Self::G003_STREAK_ACCUMULATING => "Looking down, timer running",
            Self::G003_STREAK_RESET => "Looked up before the timer ran out",
            Self::G004_ACTIVATED => "Doomscrolling detected",
            Self::G004_HOLDING => "Still doomscrolling",
            Self::G005_DEACTIVATED => "Looked back up",
            Self::G005_FACE_LOST => "Face lost",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
