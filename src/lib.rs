//! Gestureflap - flappy bird controlled by hand gestures.
//!
//! The library holds the parts with real logic: the landmark-based gesture
//! classifier, the fixed-step game simulation and the controller that glues
//! them together. Camera capture and drawing live outside; the binary ships
//! a terminal front end that stands in for both.

pub mod build_info;
pub mod controller;
pub mod core;
pub mod gesture;
pub mod replay;
pub mod simulation;

pub use controller::{GameController, GameListener, HighScore, SessionStats};
pub use gesture::{classify, Gesture, Landmark, LandmarkSet};
pub use simulation::{GameEvent, GameSimulation, GameState};
