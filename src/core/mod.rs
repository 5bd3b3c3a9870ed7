//! Shared constants for the game core.

pub mod constants;

pub use constants::*;
