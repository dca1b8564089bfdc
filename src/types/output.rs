//! Output structures for terminal display

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{GazeEvent, GazeState, ReasonCode};

/// Output structure for each debouncer tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickOutput {
    /// Wall-clock time of the tick
    pub timestamp: DateTime<Utc>,
    /// Subject score, None when no face
    pub score: Option<f64>,
    /// Threshold that was compared against this tick
    pub threshold: f64,
    /// State after the tick
    pub state: GazeState,
    /// How long the current looking-down streak has been held (milliseconds)
    pub held_ms: u64,
    /// Reason for the resulting state
    pub reason: ReasonCode,
    /// Event emitted this tick, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<GazeEvent>,
}

impl TickOutput {
    /// Create new output
    pub fn new(
        score: Option<f64>,
        threshold: f64,
        state: GazeState,
        held_ms: u64,
        reason: ReasonCode,
        event: Option<GazeEvent>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            score,
            threshold,
            state,
            held_ms,
            reason,
            event,
        }
    }

    fn score_display(&self) -> String {
        match self.score {
            Some(s) => format!("{:.3}", s),
            None => "--".to_string(),
        }
    }

    fn event_suffix(&self) -> String {
        match self.event {
            Some(e) => format!(" | event={}", e),
            None => String::new(),
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = GazeState::color_reset();
        let emoji = self.state.emoji();

        format!(
            "{}{} score={} (>{:.2}) | state={} | held={:.1}s | {}{}{}",
            color,
            emoji,
            self.score_display(),
            self.threshold,
            self.state,
            self.held_ms as f64 / 1000.0,
            self.reason,
            self.event_suffix(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "score={} | threshold={:.2} | state={} | held={:.1}s | reason={}{}",
            self.score_display(),
            self.threshold,
            self.state,
            self.held_ms as f64 / 1000.0,
            self.reason.code(),
            self.event_suffix()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parseable_string_absent_score() {
        let out = TickOutput::new(None, 0.3, GazeState::Idle, 0, ReasonCode::G001_NO_FACE, None);
        assert_eq!(
            out.to_parseable_string(),
            "score=-- | threshold=0.30 | state=IDLE | held=0.0s | reason=G001_NO_FACE"
        );
    }

    #[test]
    fn test_parseable_string_with_event() {
        let out = TickOutput::new(
            Some(0.5),
            0.3,
            GazeState::Active,
            2000,
            ReasonCode::G004_ACTIVATED,
            Some(GazeEvent::Activate),
        );
        let s = out.to_parseable_string();
        assert!(s.starts_with("score=0.500"));
        assert!(s.ends_with("event=ACTIVATE"));
    }

    #[test]
    fn test_terminal_string_describes_reason() {
        let out = TickOutput::new(Some(0.35), 0.3, GazeState::Pending, 1200, ReasonCode::G003_STREAK_ACCUMULATING, None);
        let s = out.to_terminal_string();
        assert!(s.contains("G003_STREAK_ACCUMULATING: Looking down, timer running"));
        assert!(s.starts_with(GazeState::Pending.color_code()));
    }

    #[test]
    fn test_json_omits_missing_event() {
        let out = TickOutput::new(Some(0.1), 0.3, GazeState::Idle, 0, ReasonCode::G002_BELOW_THRESHOLD, None);
        let json = serde_json::to_string(&out).unwrap();
        assert!(!json.contains("event"));
        assert!(json.contains("\"state\":\"IDLE\""));
    }
}
