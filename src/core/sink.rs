//! Deterrent actions driven by Activate/Deactivate
//!
//! The debouncer guarantees strict alternation starting with `activate()`. Sinks still
//! ignore repeated identical calls so that shutdown paths can call them freely.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use colored::Colorize;
use tracing::{debug, warn};

use crate::error::SinkError;

pub trait ActionSink {
    /// Start the deterrent
    fn activate(&mut self) -> Result<(), SinkError>;
    /// Stop the deterrent
    fn deactivate(&mut self) -> Result<(), SinkError>;
}

impl<T: ActionSink + ?Sized> ActionSink for Box<T> {
    fn activate(&mut self) -> Result<(), SinkError> {
        (**self).activate()
    }

    fn deactivate(&mut self) -> Result<(), SinkError> {
        (**self).deactivate()
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// One external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SinkCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `sh -c <line>`
    pub fn shell(line: &str) -> Self {
        Self::new("sh", vec!["-c".to_string(), line.to_string()])
    }

    /// `osascript -e <script>`
    pub fn osascript(script: String) -> Self {
        Self::new("osascript", vec!["-e".to_string(), script])
    }

    /// Run to completion with output discarded. A non-zero exit is logged, not returned.
    fn run(&self) -> Result<(), SinkError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| SinkError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            warn!(program = %self.program, %status, "action command exited unsuccessfully");
        }
        Ok(())
    }
}

/// Runs external commands on activate / deactivate
#[derive(Debug, Clone, Default)]
pub struct CommandSink {
    on_activate: Vec<SinkCommand>,
    on_deactivate: Vec<SinkCommand>,
    active: bool,
}

impl CommandSink {
    pub fn new(on_activate: Vec<SinkCommand>, on_deactivate: Vec<SinkCommand>) -> Self {
        Self {
            on_activate,
            on_deactivate,
            active: false,
        }
    }

    /// Shell command lines, either side optional
    pub fn from_shell(on_activate: Option<&str>, on_deactivate: Option<&str>) -> Self {
        Self::new(
            on_activate.map(SinkCommand::shell).into_iter().collect(),
            on_deactivate.map(SinkCommand::shell).into_iter().collect(),
        )
    }

    /// Play `video` in QuickTime Player on activate, stop and close it on deactivate (macOS)
    pub fn quicktime(video: &Path) -> Self {
        let name = video
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(
            vec![SinkCommand::osascript(quicktime_play_script(video))],
            vec![SinkCommand::osascript(quicktime_close_script(&name))],
        )
    }

    /// Append another sink's commands
    pub fn extend(&mut self, other: CommandSink) {
        self.on_activate.extend(other.on_activate);
        self.on_deactivate.extend(other.on_deactivate);
    }

    pub fn is_empty(&self) -> bool {
        self.on_activate.is_empty() && self.on_deactivate.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl ActionSink for CommandSink {
    fn activate(&mut self) -> Result<(), SinkError> {
        if self.active {
            debug!("command sink already active");
            return Ok(());
        }
        // Flag first so a failed start is still followed by a stop attempt
        self.active = true;
        self.on_activate.iter().try_for_each(SinkCommand::run)
    }

    fn deactivate(&mut self) -> Result<(), SinkError> {
        if !self.active {
            debug!("command sink already inactive");
            return Ok(());
        }
        self.active = false;
        self.on_deactivate.iter().try_for_each(SinkCommand::run)
    }
}

fn quicktime_play_script(video: &Path) -> String {
    format!(
        r#"tell application "QuickTime Player"
    activate
    set doc to open POSIX file "{}"
    tell doc
        play
        set presenting to false
        tell front window
            set bounds to {{25, 45, 415, 825}}
        end tell
    end tell
end tell"#,
        video.display()
    )
}

fn quicktime_close_script(video_name: &str) -> String {
    format!(
        r#"tell application "QuickTime Player"
    repeat with d in documents
        try
            if (name of d) is "{}" then
                stop d
                close d saving no
            end if
        end try
    end repeat
end tell"#,
        video_name
    )
}

// =============================================================================
// BANNER
// =============================================================================

/// Default banner text
pub const ALARM_TEXT: &str = "doomscrolling alarm";

/// Writes the on-screen warning banner
pub struct BannerSink<W: Write> {
    out: W,
    text: String,
    color: bool,
    shown: bool,
}

impl<W: Write> BannerSink<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self::with_text(out, ALARM_TEXT, color)
    }

    pub fn with_text(out: W, text: &str, color: bool) -> Self {
        Self {
            out,
            text: text.to_uppercase(),
            color,
            shown: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self) -> String {
        let bar = "═".repeat(self.text.chars().count() + 6);
        let lines = [
            format!("╔{}╗", bar),
            format!("║   {}   ║", self.text),
            format!("╚{}╝", bar),
        ];
        if self.color {
            lines
                .iter()
                .map(|l| l.bright_green().bold().on_black().to_string())
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            lines.join("\n")
        }
    }
}

impl<W: Write> ActionSink for BannerSink<W> {
    fn activate(&mut self) -> Result<(), SinkError> {
        if self.shown {
            return Ok(());
        }
        let banner = self.render();
        writeln!(self.out, "{}", banner)?;
        self.out.flush()?;
        self.shown = true;
        Ok(())
    }

    fn deactivate(&mut self) -> Result<(), SinkError> {
        if !self.shown {
            return Ok(());
        }
        let line = "  ✓ back to work";
        if self.color {
            writeln!(self.out, "{}", line.green())?;
        } else {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        self.shown = false;
        Ok(())
    }
}

// =============================================================================
// COMBINATORS
// =============================================================================

/// Does nothing (dry run)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ActionSink for NullSink {
    fn activate(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn deactivate(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Forwards to every sink in order. All sinks are attempted; the first error is returned.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn ActionSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: Box<dyn ActionSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn each(
        &mut self,
        f: impl Fn(&mut Box<dyn ActionSink>) -> Result<(), SinkError>,
    ) -> Result<(), SinkError> {
        let mut first = None;
        for sink in self.sinks.iter_mut() {
            if let Err(e) = f(sink) {
                warn!(error = %e, "action sink failed");
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }
}

impl ActionSink for FanoutSink {
    fn activate(&mut self) -> Result<(), SinkError> {
        self.each(|s| s.activate())
    }

    fn deactivate(&mut self) -> Result<(), SinkError> {
        self.each(|s| s.deactivate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_banner_plain() {
        let mut sink = BannerSink::new(Vec::new(), false);
        sink.activate().unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("║   DOOMSCROLLING ALARM   ║"));
    }

    #[test]
    fn test_banner_idempotent() {
        let mut sink = BannerSink::with_text(Vec::new(), "lock in twin", false);
        sink.activate().unwrap();
        sink.activate().unwrap();
        sink.deactivate().unwrap();
        sink.deactivate().unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out.matches("LOCK IN TWIN").count(), 1);
        assert_eq!(out.matches("back to work").count(), 1);
    }

    #[test]
    fn test_deactivate_before_activate_is_noop() {
        let mut sink = BannerSink::new(Vec::new(), false);
        sink.deactivate().unwrap();
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn test_shell_command_shape() {
        assert_eq!(
            SinkCommand::shell("mpv alarm.mp4"),
            SinkCommand::new("sh", vec!["-c".to_string(), "mpv alarm.mp4".to_string()])
        );
    }

    #[test]
    fn test_quicktime_scripts() {
        let sink = CommandSink::quicktime(Path::new("/tmp/assets/skyrim-skeleton.mp4"));
        let play = &sink.on_activate[0];
        assert_eq!(play.program, "osascript");
        assert!(play.args[1].contains(r#"open POSIX file "/tmp/assets/skyrim-skeleton.mp4""#));
        assert!(play.args[1].contains("set bounds to {25, 45, 415, 825}"));

        let close = &sink.on_deactivate[0];
        assert!(close.args[1].contains(r#"if (name of d) is "skyrim-skeleton.mp4" then"#));
        assert!(close.args[1].contains("close d saving no"));
    }

    #[test]
    fn test_command_sink_guards_repeats() {
        // No commands configured, so only the flag is exercised
        let mut sink = CommandSink::from_shell(None, None);
        assert!(sink.is_empty());
        sink.activate().unwrap();
        assert!(sink.is_active());
        sink.activate().unwrap();
        assert!(sink.is_active());
        sink.deactivate().unwrap();
        assert!(!sink.is_active());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let mut sink = CommandSink::new(
            vec![SinkCommand::new("lockin-no-such-program-xyz", Vec::new())],
            Vec::new(),
        );
        let err = sink.activate().unwrap_err();
        assert!(matches!(err, SinkError::Spawn { .. }));
        // Still marked active so the stop path runs
        assert!(sink.is_active());
    }

    struct Failing;

    impl ActionSink for Failing {
        fn activate(&mut self) -> Result<(), SinkError> {
            Err(SinkError::Write(std::io::Error::other("boom")))
        }
        fn deactivate(&mut self) -> Result<(), SinkError> {
            Ok(())
        }
    }

    #[test]
    fn test_fanout_attempts_all_sinks() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Counting(Rc<RefCell<u32>>);
        impl ActionSink for Counting {
            fn activate(&mut self) -> Result<(), SinkError> {
                *self.0.borrow_mut() += 1;
                Ok(())
            }
            fn deactivate(&mut self) -> Result<(), SinkError> {
                Ok(())
            }
        }

        let count = Rc::new(RefCell::new(0));
        let mut fanout = FanoutSink::new();
        fanout.push(Box::new(Failing));
        fanout.push(Box::new(Counting(Rc::clone(&count))));
        assert_eq!(fanout.len(), 2);

        assert!(fanout.activate().is_err());
        assert_eq!(*count.borrow(), 1);
        assert!(fanout.deactivate().is_ok());
    }
}
