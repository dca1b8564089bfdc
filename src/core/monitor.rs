//! Monitoring session: scorer → debouncer → action sink
//!
//! Owns the single debouncer of a session. The caller supplies frames (or scores) and the
//! tick time; the monitor forwards every emitted event to the sink exactly once.

use tracing::{info, instrument};

use crate::core::debouncer::GazeDebouncer;
use crate::core::scorer::{select_subject, FaceScorer};
use crate::core::sink::ActionSink;
use crate::error::MonitorError;
use crate::types::{FaceFrame, GazeEvent, TickOutput, Timestamp};

pub struct GazeMonitor<S: FaceScorer, A: ActionSink> {
    scorer: S,
    debouncer: GazeDebouncer,
    sink: A,
    activations: u64,
}

impl<S: FaceScorer, A: ActionSink> GazeMonitor<S, A> {
    pub fn new(scorer: S, debouncer: GazeDebouncer, sink: A) -> Self {
        Self {
            scorer,
            debouncer,
            sink,
            activations: 0,
        }
    }

    /// Score a raw frame and tick. Extra faces beyond the first are ignored for the tick
    /// but returned alongside it.
    pub fn tick_frame(
        &mut self,
        frame: &FaceFrame,
        now: Timestamp,
    ) -> Result<(TickOutput, Vec<f64>), MonitorError> {
        let scores = self.scorer.score(frame);
        let output = self.tick_score(select_subject(&scores), now)?;
        Ok((output, scores))
    }

    /// Tick with an already computed subject score
    pub fn tick_score(&mut self, score: Option<f64>, now: Timestamp) -> Result<TickOutput, MonitorError> {
        let output = self.debouncer.step(score, now);
        match output.event {
            Some(GazeEvent::Activate) => {
                self.activations += 1;
                self.sink.activate()?;
            }
            Some(GazeEvent::Deactivate) => self.sink.deactivate()?,
            None => {}
        }
        Ok(output)
    }

    /// End the session: stop the deterrent if it is running. Safe to call more than once.
    #[instrument(skip_all)]
    pub fn shutdown(&mut self) -> Result<(), MonitorError> {
        if !self.debouncer.is_active() {
            return Ok(());
        }
        info!("session ending while active, stopping deterrent");
        self.debouncer.reset();
        self.sink.deactivate()?;
        Ok(())
    }

    pub fn debouncer(&self) -> &GazeDebouncer {
        &self.debouncer
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    /// Number of Activate events this session
    pub fn activation_count(&self) -> u64 {
        self.activations
    }

    pub fn into_sink(self) -> A {
        self.sink
    }
}
