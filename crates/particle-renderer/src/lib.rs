//! # Particle Renderer
//!
//! Point-sprite visualization of the particle field with a screen-space
//! color threshold applied to the final frame.

pub mod camera;
pub mod constants;
pub mod post_process;
pub mod renderer;
pub mod sprite;

pub use camera::*;
pub use constants::*;
pub use post_process::*;
pub use renderer::*;
pub use sprite::*;
