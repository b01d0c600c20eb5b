//! Shared utilities: random number generation and activation functions.

pub mod activations;
pub mod rng;

pub use rng::SimpleRng;
