//! End-to-end tests from hand landmarks to game state: classifier output
//! drives the controller, which flaps while a fist is held and restarts
//! only on a fresh fist after a crash.

use gestureflap::controller::{FrameAction, GameController, GameListener};
use gestureflap::core::constants::*;
use gestureflap::gesture::{classify, Gesture, Landmark, LandmarkSet};
use gestureflap::simulation::GameSimulation;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn test_controller() -> GameController<ChaCha8Rng> {
    GameController::with_simulation(GameSimulation::with_rng(ChaCha8Rng::seed_from_u64(42)))
}

fn hand(spread: f64) -> LandmarkSet {
    LandmarkSet::synthetic(Landmark::new(0.45, 0.6), spread)
}

fn fist() -> Option<LandmarkSet> {
    Some(hand(0.04))
}

fn open_hand() -> Option<LandmarkSet> {
    Some(hand(0.24))
}

fn frame(controller: &mut GameController<ChaCha8Rng>, landmarks: Option<LandmarkSet>) -> FrameAction {
    controller.frame(classify(landmarks.as_ref())).action
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

// =============================================================================
// Classification feeding the controller
// =============================================================================

#[test]
fn test_synthetic_hands_classify_as_expected() {
    assert_eq!(classify(fist().as_ref()), Gesture::Fist);
    assert_eq!(classify(open_hand().as_ref()), Gesture::Open);
    assert_eq!(classify(Some(&hand(0.13))), Gesture::Neutral);
    assert_eq!(classify(None), Gesture::NoHand);
}

#[test]
fn test_held_fist_flaps_once_per_cooldown() {
    let mut controller = test_controller();
    for _ in 0..(FLAP_COOLDOWN_TICKS + 1) {
        let action = frame(&mut controller, fist());
        assert_eq!(action, FrameAction::Stepped { flap_requested: true });
    }
    assert_eq!(controller.snapshot().flap_count, 1);
    assert_eq!(controller.snapshot().tick, FLAP_COOLDOWN_TICKS + 1);

    frame(&mut controller, fist());
    assert_eq!(controller.snapshot().flap_count, 2);
}

#[test]
fn test_open_hand_and_no_hand_never_flap() {
    let mut controller = test_controller();
    for i in 0..20 {
        let landmarks = if i % 2 == 0 { open_hand() } else { None };
        frame(&mut controller, landmarks);
    }
    let state = controller.snapshot();
    assert_eq!(state.flap_count, 0);
    assert_eq!(state.tick, 20);
    assert!(state.bird.y > BIRD_START_Y);
}

// =============================================================================
// Crash and restart
// =============================================================================

#[test]
fn test_open_hand_falls_to_the_ground() {
    let mut controller = test_controller();
    let mut recorder = Recorder::default();
    let mut ticks = 0;
    while !controller.snapshot().is_game_over() {
        controller.frame_with(classify(open_hand().as_ref()), &mut recorder);
        ticks += 1;
        assert!(ticks < 100);
    }

    // v reaches the clamp at tick 20 (y = 405), then falls 10 per tick
    // until the bottom passes the ground on tick 34.
    assert_eq!(ticks, 34);
    assert_eq!(recorder.game_overs, vec![0]);
    assert!(recorder.scores.is_empty());
    assert_eq!(controller.stats().games_played, 1);
    assert_eq!(controller.stats().last_final_score, Some(0));
}

#[test]
fn test_fist_held_through_crash_does_not_restart() {
    let mut controller = test_controller();
    let mut frames = 0;
    while !controller.snapshot().is_game_over() {
        frame(&mut controller, fist());
        frames += 1;
        assert!(frames < 1_000);
    }
    let crashed_at = controller.snapshot().tick;

    for _ in 0..30 {
        assert_eq!(frame(&mut controller, fist()), FrameAction::Waiting);
    }
    assert!(controller.snapshot().is_game_over());
    assert_eq!(controller.snapshot().tick, crashed_at);

    assert_eq!(frame(&mut controller, open_hand()), FrameAction::Waiting);
    assert_eq!(frame(&mut controller, None), FrameAction::Waiting);
    assert_eq!(frame(&mut controller, fist()), FrameAction::Restarted);
    assert_eq!(controller.stats().restarts, 1);
}

#[test]
fn test_restart_frame_resets_without_stepping() {
    let mut controller = test_controller();
    while !controller.snapshot().is_game_over() {
        frame(&mut controller, open_hand());
    }

    let mut recorder = Recorder::default();
    let outcome = controller.frame_with(Gesture::Fist, &mut recorder);
    assert_eq!(outcome.action, FrameAction::Restarted);
    assert_eq!(recorder.scores, vec![0]);

    let state = controller.snapshot();
    assert!(!state.is_game_over());
    assert_eq!(state.tick, 0);
    assert_eq!(state.bird.y, BIRD_START_Y);
    assert_eq!(state.flap_count, 0);

    // Still holding the fist: the next frame steps and flaps
    assert_eq!(
        frame(&mut controller, fist()),
        FrameAction::Stepped { flap_requested: true }
    );
    assert_eq!(controller.snapshot().flap_count, 1);
    assert_eq!(controller.snapshot().bird.velocity, FLAP_STRENGTH + GRAVITY);
}

#[test]
fn test_high_score_survives_restarts() {
    let mut controller = test_controller();
    controller.simulation_mut().state_mut().score = 3;
    while !controller.snapshot().is_game_over() {
        frame(&mut controller, open_hand());
    }
    assert_eq!(controller.high_score(), 3);

    frame(&mut controller, fist());
    frame(&mut controller, open_hand());
    while !controller.snapshot().is_game_over() {
        frame(&mut controller, open_hand());
    }

    let stats = controller.stats();
    assert_eq!(stats.games_played, 2);
    assert_eq!(stats.restarts, 1);
    assert_eq!(stats.last_final_score, Some(0));
    assert_eq!(controller.high_score(), 3);
}
