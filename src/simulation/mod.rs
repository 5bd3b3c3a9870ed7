//! Deterministic fixed-step simulation of the bird and its pipe obstacles.
//!
//! One call to [`GameSimulation::step`] is one tick (the front end runs one
//! tick per rendered frame, 60 per second).

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
