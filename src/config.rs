//! Process-wide settings: config file, then CLI overrides

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::DebounceConfig;

/// Contents of the optional JSON config file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub debounce: DebounceConfig,
    /// Shell command run on Activate
    pub on_activate: Option<String>,
    /// Shell command run on Deactivate
    pub on_deactivate: Option<String>,
    /// Clip to play in QuickTime Player while active (macOS)
    pub video: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults when no file is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

/// Values given on the command line; `Some` wins over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub enter_threshold: Option<f64>,
    pub exit_threshold: Option<f64>,
    pub sustain_duration: Option<f64>,
    pub on_activate: Option<String>,
    pub on_deactivate: Option<String>,
    pub video: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn apply(mut self, o: Overrides) -> Self {
        if let Some(v) = o.enter_threshold {
            self.debounce.enter_threshold = v;
        }
        if let Some(v) = o.exit_threshold {
            self.debounce.exit_threshold = v;
        }
        if let Some(v) = o.sustain_duration {
            self.debounce.sustain_duration = v;
        }
        self.on_activate = o.on_activate.or(self.on_activate);
        self.on_deactivate = o.on_deactivate.or(self.on_deactivate);
        self.video = o.video.or(self.video);
        self.log_level = o.log_level.or(self.log_level);
        self
    }
}
