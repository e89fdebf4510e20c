//! Compile-time configuration of the field
//!
//! Values are in scene units; one unit is roughly one pixel at the default
//! camera distance.

/// Number of particles in the field
pub const PARTICLE_COUNT: usize = 150;

/// Half-width of the square box particles bounce within
pub const FIELD_RADIUS: f32 = 100.0;

/// Initial velocity components are drawn from `[-MAX_INITIAL_SPEED, MAX_INITIAL_SPEED]`
pub const MAX_INITIAL_SPEED: f32 = 0.3;

/// Sprite size before perspective attenuation
pub const PARTICLE_SIZE: f32 = 30.0;

/// Over-driven red; the sprite texture alone shapes the falloff
pub const PARTICLE_COLOR: [f32; 3] = [255.0, 0.0, 0.0];
