//! Gaze debouncer: looking-down score → hysteresis-protected Activate/Deactivate
//!
//! State transitions:
//! - IDLE → PENDING: score > enter_threshold (streak timer starts)
//! - PENDING → ACTIVE: score > enter_threshold AND held ≥ sustain_duration (emits Activate)
//! - PENDING → IDLE: score ≤ enter_threshold or no face (timer discarded)
//! - ACTIVE → IDLE: score ≤ exit_threshold or no face (immediate, emits Deactivate)
//!
//! `now` must be non-decreasing across calls. A clock that steps backwards is treated as
//! "no time elapsed" and never activates early.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::types::{DebounceConfig, DebounceState, GazeEvent, ReasonCode, TickOutput, Timestamp};

/// Debounce state machine
#[derive(Debug, Clone)]
pub struct GazeDebouncer {
    config: DebounceConfig,
    /// Cached `config.sustain()`
    sustain: Duration,
    state: DebounceState,
    /// Start of the current looking-down streak, kept through ACTIVE for reporting
    streak_since: Option<Timestamp>,
    update_count: u64,
}

impl GazeDebouncer {
    /// Create a debouncer in IDLE. Fails if any threshold is outside [0, 1] or the sustain
    /// duration is not a positive number of seconds.
    pub fn new(config: DebounceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.exit_threshold < config.enter_threshold {
            warn!(
                enter = config.enter_threshold,
                exit = config.exit_threshold,
                "exit_threshold below enter_threshold, staying active is easier than activating"
            );
        }
        Ok(Self {
            config,
            sustain: config.sustain(),
            state: DebounceState::Idle,
            streak_since: None,
            update_count: 0,
        })
    }

    /// Feed one tick, return the event to forward to the action sink (if any)
    pub fn update(&mut self, score: Option<f64>, now: Timestamp) -> Option<GazeEvent> {
        self.step(score, now).event
    }

    /// Feed one tick, return the full tick report
    pub fn step(&mut self, score: Option<f64>, now: Timestamp) -> TickOutput {
        self.update_count += 1;

        let threshold = self.threshold();
        // NaN never compares greater, so it reads as "not looking down"
        let looking_down = matches!(score, Some(s) if s > threshold);

        let (next, reason, event) = self.compute_transition(score, looking_down, now);

        match (self.state, next) {
            (DebounceState::Idle, DebounceState::Pending { since }) => {
                debug!(score = ?score, threshold, since_ms = since.as_millis() as u64, "streak started");
                self.streak_since = Some(since);
            }
            (DebounceState::Pending { since }, DebounceState::Idle) => {
                debug!(
                    score = ?score,
                    held_ms = now.saturating_sub(since).as_millis() as u64,
                    "streak reset before sustain"
                );
                self.streak_since = None;
            }
            (DebounceState::Pending { since }, DebounceState::Active) => {
                info!(
                    score = ?score,
                    held_ms = now.saturating_sub(since).as_millis() as u64,
                    "looking down sustained, activating"
                );
            }
            (DebounceState::Active, DebounceState::Idle) => {
                info!(score = ?score, threshold, reason = reason.code(), "deactivating");
                self.streak_since = None;
            }
            _ => {}
        }

        self.state = next;
        let held_ms = self.held(now).as_millis() as u64;
        TickOutput::new(score, threshold, self.state.kind(), held_ms, reason, event)
    }

    /// Transition table. Absent score behaves exactly like "not looking down".
    fn compute_transition(
        &self,
        score: Option<f64>,
        looking_down: bool,
        now: Timestamp,
    ) -> (DebounceState, ReasonCode, Option<GazeEvent>) {
        match (self.state, looking_down) {
            (DebounceState::Idle, false) => {
                let reason = if score.is_none() {
                    ReasonCode::G001_NO_FACE
                } else {
                    ReasonCode::G002_BELOW_THRESHOLD
                };
                (DebounceState::Idle, reason, None)
            }

            (DebounceState::Idle, true) => (
                DebounceState::Pending { since: now },
                ReasonCode::G003_STREAK_STARTED,
                None,
            ),

            (DebounceState::Pending { since }, true) => {
                if now.saturating_sub(since) >= self.sustain {
                    (DebounceState::Active, ReasonCode::G004_ACTIVATED, Some(GazeEvent::Activate))
                } else {
                    (
                        DebounceState::Pending { since },
                        ReasonCode::G003_STREAK_ACCUMULATING,
                        None,
                    )
                }
            }

            (DebounceState::Pending { .. }, false) => {
                (DebounceState::Idle, ReasonCode::G003_STREAK_RESET, None)
            }

            (DebounceState::Active, true) => (DebounceState::Active, ReasonCode::G004_HOLDING, None),

            (DebounceState::Active, false) => {
                let reason = if score.is_none() {
                    ReasonCode::G005_FACE_LOST
                } else {
                    ReasonCode::G005_DEACTIVATED
                };
                (DebounceState::Idle, reason, Some(GazeEvent::Deactivate))
            }
        }
    }

    /// Threshold in effect: exit while ACTIVE, enter otherwise
    pub fn threshold(&self) -> f64 {
        if self.state.is_active() {
            self.config.exit_threshold
        } else {
            self.config.enter_threshold
        }
    }

    /// Get current state
    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// How long the current looking-down streak has lasted at `now`
    pub fn held(&self, now: Timestamp) -> Duration {
        self.streak_since
            .map(|s| now.saturating_sub(s))
            .unwrap_or(Duration::ZERO)
    }

    /// Get update count
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Back to IDLE without emitting anything. Callers that were ACTIVE own the deactivation.
    pub fn reset(&mut self) {
        self.state = DebounceState::Idle;
        self.streak_since = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================
