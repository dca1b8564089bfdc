//! Lock In CLI
//!
//! Usage:
//!   landmarker | lockin                          # Live: records without "t" use the monotonic clock
//!   lockin --input trace.jsonl                   # Replay: records carry "t" in seconds
//!   lockin --video assets/skyrim-skeleton.mp4    # Play a clip in QuickTime while distracted
//!   lockin --on-activate "mpv alarm.mp4 &" --on-deactivate "pkill mpv"
//!   lockin --input trace.jsonl --json            # JSON output

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use lockin::config::{Overrides, Settings};
use lockin::core::{
    ActionSink, BannerSink, BlendshapeScorer, Clock, CommandSink, FanoutSink, GazeDebouncer,
    GazeMonitor, ManualClock, MonotonicClock, NullSink, TraceInput, TraceParser,
};
use lockin::error::{MonitorError, TraceError};
use lockin::logging::init_tracing;
use lockin::types::{GazeState, TickOutput};
use lockin::VERSION;

type Monitor = GazeMonitor<BlendshapeScorer, Box<dyn ActionSink>>;

#[derive(Parser, Debug)]
#[command(
    name = "lockin",
    version = VERSION,
    about = "Lock In - stop doomscrolling: react when you look down for too long",
    long_about = "Lock In reads one record per video frame (newline-delimited JSON) and\n\
                  turns the looking-down score into a debounced ACTIVATE / DEACTIVATE.\n\n\
                  Records:\n  \
                  {\"t\": 1.25, \"score\": 0.5}          pre-scored (null = no face)\n  \
                  {\"t\": 1.25, \"faces\": [...]}         face landmarker blendshapes\n\n\
                  States:\n  \
                  IDLE     - Attentive, or no face\n  \
                  PENDING  - Looking down, timer running\n  \
                  ACTIVE   - Doomscrolling, deterrent running"
)]
struct Args {
    /// Trace file to read (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Score to exceed while not active (default: 0.3)
    #[arg(long)]
    enter_threshold: Option<f64>,

    /// Score to exceed to stay active (default: 0.4)
    #[arg(long)]
    exit_threshold: Option<f64>,

    /// Seconds of looking down before activating (default: 2.0)
    #[arg(short, long)]
    sustain: Option<f64>,

    /// Shell command to run on activate
    #[arg(long)]
    on_activate: Option<String>,

    /// Shell command to run on deactivate
    #[arg(long)]
    on_deactivate: Option<String>,

    /// Video to play in QuickTime Player while active (macOS)
    #[arg(long)]
    video: Option<PathBuf>,

    /// Output as JSON lines
    #[arg(long)]
    json: bool,

    /// Show per-face scores
    #[arg(long)]
    verbose: bool,

    /// Only print ticks that carry an event
    #[arg(short, long)]
    quiet: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Log filter when RUST_LOG is unset (default: warn)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            enter_threshold: self.enter_threshold,
            exit_threshold: self.exit_threshold,
            sustain_duration: self.sustain,
            on_activate: self.on_activate.clone(),
            on_deactivate: self.on_deactivate.clone(),
            video: self.video.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[derive(Debug, Error)]
enum SessionError {
    #[error("cannot open input: {0}")]
    Open(#[from] std::io::Error),
    #[error(transparent)]
    Trace(#[from] TraceError),
    #[error(transparent)]
    Monitor(#[from] MonitorError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match Settings::load_or_default(args.config.as_deref()) {
        Ok(s) => s.apply(args.overrides()),
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };
    init_tracing(settings.log_level.as_deref());

    let debouncer = match GazeDebouncer::new(settings.debounce) {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Some(video) = &settings.video {
        if !video.exists() {
            eprintln!("error: could not open {}", video.display());
            return ExitCode::from(2);
        }
    }

    let sink = build_sink(&settings, &args);
    let mut monitor = GazeMonitor::new(BlendshapeScorer::new(), debouncer, sink);

    if !args.json && !args.quiet {
        print_header(&monitor, args.no_color);
    }

    let result = run_session(&mut monitor, &args).await;

    // Always stop the deterrent, even when the session failed
    let shutdown = monitor.shutdown();

    if !args.json {
        println!(
            "\nSession ended. Frames: {} | activations: {}",
            monitor.debouncer().update_count(),
            monitor.activation_count()
        );
    }

    let mut code = ExitCode::SUCCESS;
    if let Err(e) = result {
        error!(error = %e, "session failed");
        eprintln!("error: {}", e);
        code = ExitCode::FAILURE;
    }
    if let Err(e) = shutdown {
        error!(error = %e, "shutdown failed");
        eprintln!("error: {}", e);
        code = ExitCode::FAILURE;
    }
    code
}

/// Banner (terminal only) plus any configured commands
fn build_sink(settings: &Settings, args: &Args) -> Box<dyn ActionSink> {
    let mut commands = CommandSink::from_shell(
        settings.on_activate.as_deref(),
        settings.on_deactivate.as_deref(),
    );
    if let Some(video) = &settings.video {
        commands.extend(CommandSink::quicktime(video));
    }

    let mut fanout = FanoutSink::new();
    if !args.json {
        fanout.push(Box::new(BannerSink::new(std::io::stdout(), !args.no_color)));
    }
    if !commands.is_empty() {
        fanout.push(Box::new(commands));
    }

    if fanout.is_empty() {
        info!("no actions configured, events are only reported");
        Box::new(NullSink)
    } else {
        Box::new(fanout)
    }
}

/// Where trace lines come from
enum LineSource {
    File(Lines<BufReader<File>>),
    /// Filled by a detached reader thread; a blocking stdin read never holds up shutdown
    Stdin(mpsc::Receiver<std::io::Result<String>>),
}

impl LineSource {
    async fn open(input: Option<&PathBuf>) -> std::io::Result<Self> {
        match input {
            Some(path) => Ok(LineSource::File(BufReader::new(File::open(path).await?).lines())),
            None => Ok(LineSource::Stdin(spawn_stdin_reader())),
        }
    }

    /// Cancel-safe; `Ok(None)` at end of input
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        match self {
            LineSource::File(lines) => lines.next_line().await,
            LineSource::Stdin(rx) => rx.recv().await.transpose(),
        }
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::channel(64);
    std::thread::spawn(move || {
        use std::io::BufRead;
        for line in std::io::stdin().lock().lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Feed records until end of input or Ctrl-C
async fn run_session(monitor: &mut Monitor, args: &Args) -> Result<(), SessionError> {
    let mut source = LineSource::open(args.input.as_ref()).await?;
    let mut parser = TraceParser::new();

    let live = MonotonicClock::new();
    let replay = ManualClock::new();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let line = tokio::select! {
            line = source.next_line() => line.map_err(TraceError::from)?,
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
        };
        let Some(line) = line else { break };

        let Some(record) = parser.feed(&line)? else { continue };

        let now = match record.t {
            Some(t) => {
                replay.set(t);
                replay.now()
            }
            None => live.now(),
        };

        let (output, faces) = match &record.input {
            TraceInput::Score(score) => (monitor.tick_score(*score, now)?, None),
            TraceInput::Frame(frame) => {
                let (output, scores) = monitor.tick_frame(frame, now)?;
                (output, args.verbose.then_some(scores))
            }
        };

        if args.quiet && output.event.is_none() {
            continue;
        }
        print_tick(&output, faces.as_deref(), args);
    }
    Ok(())
}

fn print_tick(output: &TickOutput, faces: Option<&[f64]>, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!(error = %e, "cannot serialize tick"),
        }
        return;
    }

    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }

    if let Some(faces) = faces {
        let dim = if args.no_color { "" } else { "\x1b[90m" };
        let reset = if args.no_color { "" } else { GazeState::color_reset() };
        let list: Vec<String> = faces.iter().map(|s| format!("{:.3}", s)).collect();
        println!("{}  └─ faces={} [{}]{}", dim, faces.len(), list.join(", "), reset);
    }
}

/// Print header
fn print_header(monitor: &Monitor, no_color: bool) {
    let config = monitor.debouncer().config();
    let (bold, reset) = if no_color { ("", "") } else { ("\x1b[1m", "\x1b[0m") };
    println!("{}========================================{}", bold, reset);
    println!("{}  Lock In v{}{}", bold, VERSION, reset);
    println!("{}========================================{}", bold, reset);
    println!(
        "enter > {:.2} | stay > {:.2} | sustain {:.1}s",
        config.enter_threshold, config.exit_threshold, config.sustain_duration
    );
    println!();
}
