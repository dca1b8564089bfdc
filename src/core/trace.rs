//! Frame trace input (newline-delimited JSON)
//!
//! Each line is one tick:
//! - `{"t": 1.25, "score": 0.5}` / `{"t": 1.25, "score": null}`: pre-scored
//! - `{"t": 1.25, "faces": [{"blendshapes": [...]}]}`: raw landmarker output
//!
//! `t` is seconds from an arbitrary origin; without it the live clock supplies the time.
//! Blank lines and `#` comments are skipped.

use std::time::Duration;

use serde::Deserialize;

use crate::error::TraceError;
use crate::types::{FaceBlendshapes, FaceFrame, Timestamp};

/// What a trace line feeds into the monitor
#[derive(Debug, Clone, PartialEq)]
pub enum TraceInput {
    Score(Option<f64>),
    Frame(FaceFrame),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub t: Option<Timestamp>,
    pub input: TraceInput,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    t: Option<f64>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    faces: Option<Vec<FaceBlendshapes>>,
}

/// Parse one line; `Ok(None)` for blank and comment lines
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<TraceRecord>, TraceError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let raw: RawRecord =
        serde_json::from_str(line).map_err(|source| TraceError::Json { line: line_no, source })?;

    let t = raw
        .t
        .map(|secs| {
            Duration::try_from_secs_f64(secs)
                .map_err(|_| TraceError::InvalidTimestamp { line: line_no, value: secs })
        })
        .transpose()?;

    let input = match raw.faces {
        Some(faces) => TraceInput::Frame(FaceFrame { faces }),
        None => TraceInput::Score(raw.score),
    };

    Ok(Some(TraceRecord { t, input }))
}

/// Line-numbering front end for `parse_line`, fed one raw line at a time
#[derive(Debug, Default)]
pub struct TraceParser {
    line_no: usize,
}

impl TraceParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the next line of the trace; `Ok(None)` for lines that carry no record
    pub fn feed(&mut self, line: &str) -> Result<Option<TraceRecord>, TraceError> {
        self.line_no += 1;
        parse_line(self.line_no, line)
    }

    /// Lines fed so far
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scored_line() {
        let record = parse_line(1, r#"{"t": 1.5, "score": 0.42}"#).unwrap().unwrap();
        assert_eq!(record.t, Some(Duration::from_millis(1500)));
        assert_eq!(record.input, TraceInput::Score(Some(0.42)));
    }

    #[test]
    fn test_null_and_missing_score_are_absent() {
        let a = parse_line(1, r#"{"t": 0, "score": null}"#).unwrap().unwrap();
        let b = parse_line(2, r#"{"t": 0}"#).unwrap().unwrap();
        assert_eq!(a.input, TraceInput::Score(None));
        assert_eq!(b.input, TraceInput::Score(None));
    }

    #[test]
    fn test_frame_line() {
        let line = r#"{"faces": [{"blendshapes": [{"index": 11, "category_name": "eyeLookDownLeft", "score": 0.6}]}]}"#;
        let record = parse_line(1, line).unwrap().unwrap();
        assert_eq!(record.t, None);
        match record.input {
            TraceInput::Frame(frame) => {
                assert_eq!(frame.faces.len(), 1);
                assert_eq!(frame.faces[0].blendshapes[0].score, 0.6);
            }
            other => panic!("expected frame, got {:?}", other),
        }
    }

    #[test]
    fn test_skips_blank_and_comments() {
        assert!(parse_line(1, "   ").unwrap().is_none());
        assert!(parse_line(2, "# header").unwrap().is_none());
    }

    #[test]
    fn test_negative_timestamp_rejected() {
        let err = parse_line(7, r#"{"t": -1, "score": 0.5}"#).unwrap_err();
        assert!(matches!(err, TraceError::InvalidTimestamp { line: 7, .. }));
    }

    #[test]
    fn test_timestamp_beyond_duration_range_rejected() {
        let err = parse_line(3, r#"{"t": 18446744073709551616, "score": 0.5}"#).unwrap_err();
        assert!(matches!(err, TraceError::InvalidTimestamp { line: 3, .. }));
    }

    #[test]
    fn test_parser_counts_skipped_lines() {
        let mut parser = TraceParser::new();
        assert!(parser.feed("# trace").unwrap().is_none());
        assert!(parser.feed(r#"{"t":0,"score":0.1}"#).unwrap().is_some());
        assert!(parser.feed("").unwrap().is_none());
        let err = parser.feed("not json").unwrap_err();
        assert!(matches!(err, TraceError::Json { line: 4, .. }));
        assert_eq!(parser.line_no(), 4);
    }
}
