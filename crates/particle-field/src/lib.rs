//! # Particle Field
//!
//! A fixed-size field of 2D point particles bouncing inside an axis-aligned
//! square, and the single-pass stepper that advances it one frame at a time.

pub mod constants;
pub mod field;
pub mod params;
pub mod stepper;

pub use constants::*;
pub use field::*;
pub use params::*;
pub use stepper::*;
