//! # Particle Simulation
//!
//! Host-facing context for the bouncing field: owns the field, steps it once
//! per frame and mirrors its positions into GPU buffers for the renderer.

pub mod buffers;
pub mod clock;
pub mod simulation;

pub use buffers::*;
pub use clock::*;
pub use simulation::*;
