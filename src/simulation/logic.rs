//! Tick logic for the flap simulation: flap rate limiting, gravity,
//! ground/ceiling handling, pipe scrolling and recycling, scoring and pipe
//! collisions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, trace};

use super::types::{GameEvent, GameState, Phase};
use crate::core::constants::*;

/// Whether a flap requested on the current tick would be accepted.
pub fn flap_ready(state: &GameState) -> bool {
    match state.last_flap_tick {
        None => true,
        Some(last) => state.tick.saturating_sub(last) > FLAP_COOLDOWN_TICKS,
    }
}

/// Advance one tick. Does nothing once the game is over.
///
/// Order within a tick: flap, physics, ground/ceiling, pipe advance and
/// recycle, scoring, pipe collision.
pub fn process_tick<R: Rng>(
    state: &mut GameState,
    flap_requested: bool,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_game_over() {
        return events;
    }

    run_tick(state, flap_requested, rng, &mut events);
    state.tick += 1;
    events
}

fn run_tick<R: Rng>(
    state: &mut GameState,
    flap_requested: bool,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if flap_requested && flap_ready(state) {
        state.bird.velocity = FLAP_STRENGTH;
        state.last_flap_tick = Some(state.tick);
        state.flap_count += 1;
        trace!(tick = state.tick, "flap accepted");
    }

    apply_physics(state);

    if check_bounds(state) {
        end_game(state, events);
        return;
    }

    advance_pipes(state, rng);
    score_pipes(state, events);

    if check_pipe_collisions(state) {
        end_game(state, events);
    }
}

/// Gravity, velocity clamp, integration and display rotation.
fn apply_physics(state: &mut GameState) {
    let bird = &mut state.bird;
    bird.velocity = (bird.velocity + GRAVITY).clamp(-MAX_VELOCITY, MAX_VELOCITY);
    bird.y += bird.velocity;
    bird.rotation =
        (bird.velocity * ROTATION_PER_VELOCITY).clamp(MIN_ROTATION_DEG, MAX_ROTATION_DEG);
}

/// Clamp the bird inside the play area. Returns true if it hit the ground.
///
/// The ceiling stops the bird; the ground kills it.
fn check_bounds(state: &mut GameState) -> bool {
    let bird = &mut state.bird;
    if bird.bottom() > GROUND_Y {
        bird.y = GROUND_Y - BIRD_HALF;
        return true;
    }
    if bird.top() < 0.0 {
        bird.y = BIRD_HALF;
        bird.velocity = 0.0;
    }
    false
}

/// Scroll every pipe left and recycle the ones that left the screen.
pub(crate) fn advance_pipes<R: Rng>(state: &mut GameState, rng: &mut R) {
    for pipe in &mut state.pipes {
        pipe.x -= PIPE_SPEED;
        if pipe.is_off_screen() {
            pipe.x = CANVAS_WIDTH;
            pipe.gap_top = random_gap_top(rng);
            pipe.life += 1;
            pipe.passed = false;
        }
    }
}

/// Gap top for a recycled pipe. The whole gap stays between the ceiling
/// margin and the ground.
pub fn random_gap_top<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(PIPE_GAP_MARGIN_TOP..PIPE_GAP_MARGIN_TOP + PIPE_GAP_RANGE)
}

/// Award a point for every pipe life whose trailing edge is behind the bird.
pub(crate) fn score_pipes(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let bird_x = state.bird.x;
    for pipe in &mut state.pipes {
        if !pipe.passed && pipe.trailing_edge() < bird_x {
            pipe.passed = true;
            state.score += 1;
            events.push(GameEvent::ScoreChanged(state.score));
        }
    }
}

/// Whether the bird overlaps a pipe outside of its gap.
fn check_pipe_collisions(state: &GameState) -> bool {
    state
        .pipes
        .iter()
        .any(|pipe| pipe.overlaps_horizontally(&state.bird) && pipe.blocks(&state.bird))
}

fn end_game(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.is_game_over() {
        return;
    }
    state.phase = Phase::GameOver;
    info!(score = state.score, tick = state.tick, "game over");
    events.push(GameEvent::GameOver(state.score));
}

/// Owns one game's state plus the RNG used for recycled pipe gaps.
#[derive(Debug, Clone)]
pub struct GameSimulation<R = StdRng> {
    state: GameState,
    rng: R,
}

impl GameSimulation<StdRng> {
    /// Simulation with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Simulation whose pipe gaps are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameSimulation<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameSimulation<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: GameState::new(),
            rng,
        }
    }

    /// Advance one tick. Call exactly once per frame.
    pub fn step(&mut self, flap_requested: bool) -> Vec<GameEvent> {
        process_tick(&mut self.state, flap_requested, &mut self.rng)
    }

    /// Throw away the current life and start over from the initial layout.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        info!(previous_score = self.state.score, "game reset");
        self.state = GameState::new();
        vec![GameEvent::ScoreChanged(0)]
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Direct access to the state for scripted scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
