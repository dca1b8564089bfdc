//! Lock In: debounced "looking down" detection for a webcam doomscroll deterrent
//!
//! Pipeline: frame → FaceScorer → score-or-absent → GazeDebouncer → event → ActionSink

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod types;

// =============================================================================
// THRESHOLDS
// =============================================================================

/// Score a face must exceed to start (and keep building) a looking-down streak
pub const DEFAULT_ENTER_THRESHOLD: f64 = 0.3;

/// Score a face must exceed to stay active once the deterrent is running
pub const DEFAULT_EXIT_THRESHOLD: f64 = 0.4;

/// Continuous looking-down time before the deterrent fires (seconds)
pub const DEFAULT_SUSTAIN_SECS: f64 = 2.0;

// =============================================================================
// BLENDSHAPES - MediaPipe face landmarker category layout
// =============================================================================

/// `eyeLookDownLeft` blendshape
pub const EYE_LOOK_DOWN_LEFT: (usize, &str) = (11, "eyeLookDownLeft");

/// `eyeLookDownRight` blendshape
pub const EYE_LOOK_DOWN_RIGHT: (usize, &str) = (12, "eyeLookDownRight");

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
