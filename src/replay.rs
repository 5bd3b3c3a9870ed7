//! Recorded landmark sessions.
//!
//! A recording is JSON lines, one object per camera frame:
//!
//! ```text
//! {"landmarks":[{"x":0.51,"y":0.62}, ... 21 points ...]}
//! {"landmarks":null}
//! ```
//!
//! A missing or null `landmarks` field means no hand was detected. A point
//! list of the wrong length is kept as-is and classifies as no hand; only
//! lines that are not valid JSON are errors.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::controller::{FrameAction, GameController};
use crate::gesture::{Gesture, GestureMonitor, Landmark, LandmarkSet, LANDMARK_COUNT};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("recording I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: invalid frame: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One recorded camera frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

impl ReplayFrame {
    pub fn from_set(set: Option<&LandmarkSet>) -> Self {
        Self {
            landmarks: set.map(|s| s.points().to_vec()),
        }
    }

    /// The frame's hand, if it has exactly 21 points.
    pub fn landmark_set(&self) -> Option<LandmarkSet> {
        let points = self.landmarks.as_deref()?;
        let set = LandmarkSet::from_points(points);
        if set.is_none() {
            debug!(
                points = points.len(),
                expected = LANDMARK_COUNT,
                "ignoring malformed landmark frame"
            );
        }
        set
    }
}

/// An ordered sequence of recorded frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    pub frames: Vec<ReplayFrame>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, landmarks: Option<&LandmarkSet>) {
        self.frames.push(ReplayFrame::from_set(landmarks));
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Parse JSON lines. Blank lines are skipped.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, ReplayError> {
        let mut frames = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let frame = serde_json::from_str(&line).map_err(|source| ReplayError::Parse {
                line: index + 1,
                source,
            })?;
            frames.push(frame);
        }
        Ok(Self { frames })
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let file = File::open(path)?;
        let recording = Self::read_from(BufReader::new(file))?;
        if recording.is_empty() {
            warn!(path = %path.display(), "recording has no frames");
        }
        Ok(recording)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), ReplayError> {
        for frame in &self.frames {
            let line = serde_json::to_string(frame).map_err(io::Error::from)?;
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}

/// Outcome of running a recording without a display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub frames: usize,
    pub ticks: u64,
    pub games_played: u32,
    pub restarts: u32,
    pub final_score: u32,
    pub high_score: u32,
    pub game_over: bool,
    pub fist_frames: usize,
    pub open_frames: usize,
    pub neutral_frames: usize,
    pub no_hand_frames: usize,
    pub gesture_changes: u64,
}

/// Feed every frame through the classifier and the controller.
pub fn run_headless<R: rand::Rng>(
    recording: &Recording,
    controller: &mut GameController<R>,
) -> ReplaySummary {
    let mut monitor = GestureMonitor::new();
    let mut summary = ReplaySummary {
        frames: recording.len(),
        ..Default::default()
    };

    for frame in &recording.frames {
        let gesture = monitor.observe(frame.landmark_set().as_ref());
        match gesture {
            Gesture::Fist => summary.fist_frames += 1,
            Gesture::Open => summary.open_frames += 1,
            Gesture::Neutral => summary.neutral_frames += 1,
            Gesture::NoHand => summary.no_hand_frames += 1,
        }
        if let FrameAction::Stepped { .. } = controller.frame(gesture).action {
            summary.ticks += 1;
        }
    }

    let stats = controller.stats();
    summary.games_played = stats.games_played;
    summary.restarts = stats.restarts;
    summary.final_score = controller.snapshot().score;
    summary.high_score = stats.high_score.get();
    summary.game_over = controller.snapshot().is_game_over();
    summary.gesture_changes = monitor.transitions();
    summary
}
