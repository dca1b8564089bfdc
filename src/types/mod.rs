//! Core types for Lock In

mod state;
mod event;
mod config;
mod face;
mod output;
mod reason;

pub use state::{DebounceState, GazeState, Timestamp};
pub use event::GazeEvent;
pub use config::DebounceConfig;
pub use face::{Blendshape, FaceBlendshapes, FaceFrame};
pub use output::TickOutput;
pub use reason::ReasonCode;
