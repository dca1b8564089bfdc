//! Core modules for Lock In

pub mod debouncer;
pub mod scorer;
pub mod sink;
pub mod clock;
pub mod monitor;
pub mod trace;

pub use debouncer::GazeDebouncer;
pub use scorer::{FaceScorer, BlendshapeScorer, select_subject};
pub use sink::{ActionSink, CommandSink, SinkCommand, BannerSink, FanoutSink, NullSink, ALARM_TEXT};
pub use clock::{Clock, MonotonicClock, ManualClock};
pub use monitor::GazeMonitor;
pub use trace::{TraceParser, TraceRecord, TraceInput, parse_line};
