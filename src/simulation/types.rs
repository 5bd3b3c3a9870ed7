//! Game state for the flap simulation.
//!
//! All coordinates are in the 400x600 logical canvas (y grows downward).

use serde::Serialize;

use crate::core::constants::*;

/// Whether the current life is still being simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Running,
    GameOver,
}

/// The player's bird. Horizontal position is fixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bird {
    pub x: f64,
    /// Center of the bird.
    pub y: f64,
    /// Vertical velocity per tick (positive = downward).
    pub velocity: f64,
    /// Display tilt in degrees, derived from velocity. No gameplay effect.
    pub rotation: f64,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            x: BIRD_X,
            y: BIRD_START_Y,
            velocity: 0.0,
            rotation: 0.0,
        }
    }

    pub fn top(&self) -> f64 {
        self.y - BIRD_HALF
    }

    pub fn bottom(&self) -> f64 {
        self.y + BIRD_HALF
    }

    pub fn left(&self) -> f64 {
        self.x - BIRD_HALF
    }

    pub fn right(&self) -> f64 {
        self.x + BIRD_HALF
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of one pipe life: the slot it occupies and how many times that
/// slot has been recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PipeId {
    pub slot: usize,
    pub life: u32,
}

/// A top/bottom pipe pair with a gap between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pipe {
    /// Left edge.
    pub x: f64,
    /// y of the top of the gap. The gap spans `gap_top..gap_top + PIPE_GAP`.
    pub gap_top: f64,
    /// Incremented each time this slot is recycled.
    pub life: u32,
    /// Whether the bird has already scored this life.
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f64, gap_top: f64) -> Self {
        Self {
            x,
            gap_top,
            life: 0,
            passed: false,
        }
    }

    /// Right (trailing) edge.
    pub fn trailing_edge(&self) -> f64 {
        self.x + PIPE_WIDTH
    }

    pub fn gap_bottom(&self) -> f64 {
        self.gap_top + PIPE_GAP
    }

    /// Fully scrolled off the left side of the canvas.
    pub fn is_off_screen(&self) -> bool {
        self.x < -PIPE_WIDTH
    }

    /// Whether the bird's horizontal extent overlaps this pipe.
    pub fn overlaps_horizontally(&self, bird: &Bird) -> bool {
        bird.right() > self.x && bird.left() < self.trailing_edge()
    }

    /// Whether the bird's vertical extent pokes out of the gap band.
    pub fn blocks(&self, bird: &Bird) -> bool {
        bird.top() < self.gap_top || bird.bottom() > self.gap_bottom()
    }
}

/// Notifications for the outside world, emitted at most once per
/// triggering event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Score changed to the carried value (also emitted with 0 on restart).
    ScoreChanged(u32),
    /// The current life ended with the carried final score.
    GameOver(u32),
}

/// Complete simulation state for one game life.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub bird: Bird,
    pub pipes: [Pipe; PIPE_COUNT],
    pub score: u32,
    pub phase: Phase,
    /// Ticks simulated in this life.
    pub tick: u64,
    /// Tick of the most recent accepted flap, `None` before the first.
    pub last_flap_tick: Option<u64>,
    /// Accepted flaps in this life.
    pub flap_count: u32,
}

impl GameState {
    /// Fresh game: bird centered, pipes at the staggered starting layout.
    pub fn new() -> Self {
        Self {
            bird: Bird::new(),
            pipes: INITIAL_PIPES.map(|(x, gap_top)| Pipe::new(x, gap_top)),
            score: 0,
            phase: Phase::Running,
            tick: 0,
            last_flap_tick: None,
            flap_count: 0,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn pipe_id(&self, slot: usize) -> PipeId {
        PipeId {
            slot,
            life: self.pipes[slot].life,
        }
    }

    /// Pipe lives already scored and not yet recycled.
    pub fn passed_pipes(&self) -> Vec<PipeId> {
        self.pipes
            .iter()
            .enumerate()
            .filter(|(_, pipe)| pipe.passed)
            .map(|(slot, _)| self.pipe_id(slot))
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
