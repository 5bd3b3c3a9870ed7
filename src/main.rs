mod input;
mod ui;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use gestureflap::build_info;
use gestureflap::controller::GameController;
use gestureflap::core::constants::DEFAULT_FPS;
use gestureflap::gesture::{GestureMonitor, LandmarkSet};
use gestureflap::replay::{run_headless, Recording};
use input::{map_key, AppInput, KeyboardHand};
use ui::GameView;

#[derive(Parser, Debug)]
#[command(
    name = "gestureflap",
    about = "Flappy bird steered by closing and opening your hand",
    disable_version_flag = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Frames (and simulation ticks) per second
    #[arg(long, global = true, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Seed for recycled pipe gaps (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Show version information
    #[arg(long, short = 'v')]
    version: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play with the keyboard standing in for the camera (default)
    Play {
        /// Save the emulated landmark stream as a recording
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Drive the game from a recorded landmark session (JSON lines)
    Replay {
        file: PathBuf,

        /// Run without a terminal UI and print a summary
        #[arg(long)]
        headless: bool,

        /// Print the headless summary as JSON
        #[arg(long, requires = "headless")]
        json: bool,

        /// Start the recording over when it runs out
        #[arg(long = "loop")]
        looped: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", build_info::version_string());
        return Ok(());
    }

    let command = cli.command.unwrap_or(Command::Play { record: None });
    let headless = matches!(command, Command::Replay { headless: true, .. });
    init_logging(cli.log_file.as_deref(), headless)?;
    info!(version = %build_info::version_string(), "starting");

    let controller = match cli.seed {
        Some(seed) => GameController::seeded(seed),
        None => GameController::new(),
    };
    let fps = cli.fps.max(1);

    match command {
        Command::Play { record } => {
            let recorder = record.as_ref().map(|_| Recording::new());
            let source = FrameSource::Keyboard(KeyboardHand::new(fps));
            let (controller, recorder) = run_tui(source, controller, fps, recorder)?;
            if let (Some(path), Some(recording)) = (record, recorder) {
                recording
                    .save(&path)
                    .with_context(|| format!("saving recording to {}", path.display()))?;
                println!("Saved {} frames to {}", recording.len(), path.display());
            }
            print_farewell(&controller);
        }
        Command::Replay {
            file,
            headless,
            json,
            looped,
        } => {
            let recording = Recording::load(&file)
                .with_context(|| format!("loading recording {}", file.display()))?;
            info!(frames = recording.len(), path = %file.display(), "recording loaded");

            if headless {
                let mut controller = controller;
                let summary = run_headless(&recording, &mut controller);
                if json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    println!("Frames:      {}", summary.frames);
                    println!("Ticks:       {}", summary.ticks);
                    println!("Games:       {}", summary.games_played);
                    println!("Restarts:    {}", summary.restarts);
                    println!("Final score: {}", summary.final_score);
                    println!("High score:  {}", summary.high_score);
                    println!(
                        "Gestures:    fist {} / open {} / neutral {} / none {}",
                        summary.fist_frames,
                        summary.open_frames,
                        summary.neutral_frames,
                        summary.no_hand_frames
                    );
                }
            } else {
                let source = FrameSource::Replay {
                    recording,
                    cursor: 0,
                    looped,
                };
                let (controller, _) = run_tui(source, controller, fps, None)?;
                print_farewell(&controller);
            }
        }
    }

    Ok(())
}

/// The TUI owns the terminal, so logs only go somewhere when a file is given.
/// Headless runs log to stderr.
fn init_logging(log_file: Option<&Path>, headless: bool) -> anyhow::Result<()> {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "gestureflap=info".into())
    };

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

/// Where each frame's landmarks come from.
enum FrameSource {
    Keyboard(KeyboardHand),
    Replay {
        recording: Recording,
        cursor: usize,
        looped: bool,
    },
}

impl FrameSource {
    fn label(&self) -> &'static str {
        match self {
            FrameSource::Keyboard(hand) if !hand.is_visible() => "keyboard, hidden",
            FrameSource::Keyboard(_) => "keyboard",
            FrameSource::Replay { .. } => "replay",
        }
    }

    fn controls(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            FrameSource::Keyboard(_) => &[
                ("[Space]", "Fist"),
                ("[h]", "Hide hand"),
                ("[q]", "Quit"),
            ],
            FrameSource::Replay { .. } => &[("[q]", "Quit")],
        }
    }

    fn handle(&mut self, input: AppInput) {
        if let FrameSource::Keyboard(hand) = self {
            match input {
                AppInput::Fist => hand.press_fist(),
                AppInput::ToggleHand => hand.toggle_visible(),
                AppInput::Quit | AppInput::Other => {}
            }
        }
    }

    /// Landmarks for the next frame. The outer `None` means the source ran
    /// dry.
    fn next_frame(&mut self) -> Option<Option<LandmarkSet>> {
        match self {
            FrameSource::Keyboard(hand) => Some(hand.next_frame()),
            FrameSource::Replay {
                recording,
                cursor,
                looped,
            } => {
                if *cursor >= recording.len() {
                    if !*looped || recording.is_empty() {
                        return None;
                    }
                    info!("recording exhausted, looping");
                    *cursor = 0;
                }
                let frame = recording.frames[*cursor].landmark_set();
                *cursor += 1;
                Some(frame)
            }
        }
    }
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn run_tui(
    mut source: FrameSource,
    mut controller: GameController,
    fps: u32,
    mut recorder: Option<Recording>,
) -> anyhow::Result<(GameController, Option<Recording>)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = game_loop(
        &mut terminal,
        &mut source,
        &mut controller,
        fps,
        recorder.as_mut(),
    );

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    result?;

    Ok((controller, recorder))
}

fn game_loop(
    terminal: &mut Tui,
    source: &mut FrameSource,
    controller: &mut GameController,
    fps: u32,
    mut recorder: Option<&mut Recording>,
) -> anyhow::Result<()> {
    let frame_interval = Duration::from_secs_f64(1.0 / fps as f64);
    let mut monitor = GestureMonitor::new();
    let mut landmarks: Option<LandmarkSet> = None;
    let mut show_instructions = true;
    let mut source_finished = false;
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| {
            let view = GameView {
                state: controller.snapshot(),
                stats: controller.stats(),
                reading: monitor.reading(),
                landmarks: landmarks.as_ref(),
                source: source.label(),
                controls: source.controls(),
                show_instructions,
            };
            ui::draw(frame, &view);
        })?;

        let paused = show_instructions || source_finished;
        let timeout = poll_timeout(paused, frame_interval, last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && show_instructions {
                    show_instructions = false;
                    last_frame = Instant::now();
                    continue;
                }
                match map_key(key) {
                    AppInput::Quit => break,
                    other => source.handle(other),
                }
            }
        }

        if paused || last_frame.elapsed() < frame_interval {
            continue;
        }
        last_frame = Instant::now();

        match source.next_frame() {
            Some(frame) => landmarks = frame,
            None => {
                info!("landmark source finished");
                source_finished = true;
                continue;
            }
        }
        if let Some(recording) = recorder.as_deref_mut() {
            recording.push(landmarks.as_ref());
        }

        let gesture = monitor.observe(landmarks.as_ref());
        controller.frame(gesture);
    }

    Ok(())
}

/// Input wait while nothing advances.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// How long to wait for input before the next loop pass. While frames are
/// advancing this is whatever is left of the current frame interval.
fn poll_timeout(paused: bool, frame_interval: Duration, since_last_frame: Duration) -> Duration {
    if paused {
        IDLE_POLL
    } else {
        frame_interval.saturating_sub(since_last_frame)
    }
}

fn print_farewell(controller: &GameController) {
    let stats = controller.stats();
    println!(
        "Played {} game(s). High score: {}. Goodbye!",
        stats.games_played,
        stats.high_score.get()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_loop_waits_for_input() {
        let interval = Duration::from_millis(16);
        // Instructions shown or replay finished for a long time: still blocks
        assert_eq!(poll_timeout(true, interval, Duration::from_secs(30)), IDLE_POLL);
        assert_eq!(poll_timeout(true, interval, Duration::ZERO), IDLE_POLL);
    }

    #[test]
    fn test_running_loop_waits_out_the_frame() {
        let interval = Duration::from_millis(16);
        assert_eq!(
            poll_timeout(false, interval, Duration::from_millis(10)),
            Duration::from_millis(6)
        );
        assert_eq!(poll_timeout(false, interval, Duration::from_millis(40)), Duration::ZERO);
    }
}
