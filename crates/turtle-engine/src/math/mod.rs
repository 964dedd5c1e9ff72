//! Noise and random numbers for game code.

mod noise;
mod random;

pub use self::noise::{NoiseType, noise2, noise3};
pub use random::Random;
