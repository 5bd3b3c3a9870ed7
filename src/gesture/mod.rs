//! Hand landmarks in, discrete control gesture out.

pub mod classifier;
pub mod landmarks;

pub use classifier::*;
pub use landmarks::*;
