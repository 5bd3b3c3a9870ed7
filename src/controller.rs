//! Glue between the gesture stream and the simulation.
//!
//! A held fist flaps (level-triggered, rate-limited by the simulation's
//! cooldown). While the game is over, only the moment a fist closes restarts
//! it (edge-triggered), so a fist still held from the crash does not
//! immediately start a new game.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use crate::gesture::Gesture;
use crate::simulation::{GameEvent, GameSimulation, GameState};

/// Receiver for simulation notifications.
pub trait GameListener {
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_game_over(&mut self, _final_score: u32) {}
}

/// Forward events to a listener in emission order.
pub fn dispatch_events<L: GameListener + ?Sized>(events: &[GameEvent], listener: &mut L) {
    for event in events {
        match *event {
            GameEvent::ScoreChanged(score) => listener.on_score_changed(score),
            GameEvent::GameOver(score) => listener.on_game_over(score),
        }
    }
}

/// Best final score seen during this process. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore(u32);

impl HighScore {
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Record a finished game. Returns true if it set a new high score.
    pub fn record(&mut self, final_score: u32) -> bool {
        if final_score > self.0 {
            self.0 = final_score;
            true
        } else {
            false
        }
    }
}

/// Running totals across game lives.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    pub high_score: HighScore,
    /// Score as last reported by the simulation.
    pub score: u32,
    pub games_played: u32,
    pub restarts: u32,
    pub last_final_score: Option<u32>,
}

impl GameListener for SessionStats {
    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.last_final_score = Some(final_score);
        if self.high_score.record(final_score) {
            info!(high_score = final_score, "new high score");
        }
    }
}

/// What a frame did to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// One simulation tick ran.
    Stepped { flap_requested: bool },
    /// A closing fist restarted a finished game.
    Restarted,
    /// Game over and waiting for a fist.
    Waiting,
}

/// Result of feeding one frame's gesture to the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub action: FrameAction,
    pub events: Vec<GameEvent>,
}

/// Drives a [`GameSimulation`] from one gesture label per frame.
#[derive(Debug, Clone)]
pub struct GameController<R = StdRng> {
    sim: GameSimulation<R>,
    was_fist: bool,
    gesture: Gesture,
    stats: SessionStats,
}

impl GameController<StdRng> {
    pub fn new() -> Self {
        Self::with_simulation(GameSimulation::new())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_simulation(GameSimulation::seeded(seed))
    }
}

impl Default for GameController<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameController<R> {
    pub fn with_simulation(sim: GameSimulation<R>) -> Self {
        Self {
            sim,
            was_fist: false,
            gesture: Gesture::NoHand,
            stats: SessionStats::default(),
        }
    }

    /// Process one frame. Session stats are updated before returning.
    pub fn frame(&mut self, gesture: Gesture) -> FrameOutcome {
        let is_fist = gesture.is_fist();
        let rising_edge = is_fist && !self.was_fist;
        self.was_fist = is_fist;
        self.gesture = gesture;

        let (action, events) = if self.sim.is_game_over() {
            if rising_edge {
                self.stats.restarts += 1;
                (FrameAction::Restarted, self.sim.reset())
            } else {
                (FrameAction::Waiting, Vec::new())
            }
        } else {
            let events = self.sim.step(is_fist);
            (
                FrameAction::Stepped {
                    flap_requested: is_fist,
                },
                events,
            )
        };

        dispatch_events(&events, &mut self.stats);
        FrameOutcome { action, events }
    }

    /// Like [`frame`](Self::frame), also forwarding events to `listener`.
    pub fn frame_with<L: GameListener + ?Sized>(
        &mut self,
        gesture: Gesture,
        listener: &mut L,
    ) -> FrameOutcome {
        let outcome = self.frame(gesture);
        dispatch_events(&outcome.events, listener);
        outcome
    }

    pub fn snapshot(&self) -> &GameState {
        self.sim.snapshot()
    }

    pub fn simulation_mut(&mut self) -> &mut GameSimulation<R> {
        &mut self.sim
    }

    /// Gesture seen on the most recent frame.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn high_score(&self) -> u32 {
        self.stats.high_score.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Phase;

    fn crashed_controller() -> GameController {
        let mut controller = GameController::seeded(3);
        controller.simulation_mut().state_mut().phase = Phase::GameOver;
        controller
    }

    #[derive(Default)]
    struct Recorder {
        scores: Vec<u32>,
        game_overs: Vec<u32>,
    }

    impl GameListener for Recorder {
        fn on_score_changed(&mut self, score: u32) {
            self.scores.push(score);
        }

        fn on_game_over(&mut self, final_score: u32) {
            self.game_overs.push(final_score);
        }
    }

    #[test]
    fn test_high_score_only_rises() {
        let mut high = HighScore::default();
        assert!(high.record(3));
        assert!(!high.record(2));
        assert!(!high.record(3));
        assert!(high.record(7));
        assert_eq!(high.get(), 7);
    }

    #[test]
    fn test_fist_while_running_flaps() {
        let mut controller = GameController::seeded(1);
        let outcome = controller.frame(Gesture::Fist);
        assert_eq!(
            outcome.action,
            FrameAction::Stepped {
                flap_requested: true
            }
        );
        assert_eq!(controller.snapshot().flap_count, 1);
        assert!(controller.snapshot().bird.velocity < 0.0);
    }

    #[test]
    fn test_other_gestures_do_not_flap() {
        let mut controller = GameController::seeded(1);
        for gesture in [Gesture::Open, Gesture::Neutral, Gesture::NoHand] {
            let outcome = controller.frame(gesture);
            assert_eq!(
                outcome.action,
                FrameAction::Stepped {
                    flap_requested: false
                }
            );
        }
        assert_eq!(controller.snapshot().flap_count, 0);
        assert_eq!(controller.snapshot().tick, 3);
    }

    #[test]
    fn test_held_fist_does_not_restart() {
        let mut controller = GameController::seeded(1);
        controller.frame(Gesture::Fist);
        controller.simulation_mut().state_mut().phase = Phase::GameOver;

        // Fist still closed from before the crash: no rising edge
        let outcome = controller.frame(Gesture::Fist);
        assert_eq!(outcome.action, FrameAction::Waiting);
        assert!(controller.snapshot().is_game_over());
    }

    #[test]
    fn test_fist_rising_edge_restarts() {
        let mut controller = crashed_controller();
        let mut recorder = Recorder::default();

        assert_eq!(
            controller.frame_with(Gesture::Open, &mut recorder).action,
            FrameAction::Waiting
        );
        let outcome = controller.frame_with(Gesture::Fist, &mut recorder);
        assert_eq!(outcome.action, FrameAction::Restarted);
        assert_eq!(outcome.events, vec![GameEvent::ScoreChanged(0)]);
        assert_eq!(recorder.scores, vec![0]);
        assert_eq!(controller.snapshot(), &GameState::new());
        assert_eq!(controller.stats().restarts, 1);
    }

    #[test]
    fn test_only_fist_restarts() {
        let mut controller = crashed_controller();
        for gesture in [Gesture::Open, Gesture::Neutral, Gesture::NoHand, Gesture::Open] {
            assert_eq!(controller.frame(gesture).action, FrameAction::Waiting);
        }
        assert!(controller.snapshot().is_game_over());
    }

    #[test]
    fn test_restart_frame_does_not_also_step() {
        let mut controller = crashed_controller();
        controller.frame(Gesture::Fist);
        assert_eq!(controller.snapshot().tick, 0);

        // Next frame with the fist still held flaps in the new game
        controller.frame(Gesture::Fist);
        assert_eq!(controller.snapshot().tick, 1);
        assert_eq!(controller.snapshot().flap_count, 1);
    }

    #[test]
    fn test_session_stats_track_game_over() {
        let mut stats = SessionStats::default();
        dispatch_events(
            &[
                GameEvent::ScoreChanged(1),
                GameEvent::ScoreChanged(2),
                GameEvent::GameOver(2),
            ],
            &mut stats,
        );
        assert_eq!(stats.score, 2);
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.last_final_score, Some(2));
        assert_eq!(stats.high_score.get(), 2);

        dispatch_events(&[GameEvent::ScoreChanged(0), GameEvent::GameOver(0)], &mut stats);
        assert_eq!(stats.high_score.get(), 2);
        assert_eq!(stats.games_played, 2);
    }
}
