//! Field parameters

use bytemuck::{Pod, Zeroable};

use crate::constants::*;

/// Per-particle appearance, laid out for a WGSL `array<vec4<f32>>`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleStyle {
    /// Linear RGB, may exceed 1.0
    pub color: [f32; 3],
    /// Sprite size before perspective attenuation
    pub size: f32,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self {
            color: PARTICLE_COLOR,
            size: PARTICLE_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub count: usize,
    pub radius: f32,
    pub max_initial_speed: f32,
    /// Fixed seed for a reproducible field; `None` draws from the thread RNG
    pub seed: Option<u64>,
    pub style: ParticleStyle,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            radius: FIELD_RADIUS,
            max_initial_speed: MAX_INITIAL_SPEED,
            seed: None,
            style: ParticleStyle::default(),
        }
    }
}

impl FieldParams {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let params = FieldParams::default();
        assert_eq!(params.count, 150);
        assert_eq!(params.radius, 100.0);
        assert_eq!(params.max_initial_speed, 0.3);
        assert_eq!(params.seed, None);
        assert_eq!(params.style.color, [255.0, 0.0, 0.0]);
        assert_eq!(params.style.size, 30.0);
    }

    #[test]
    fn test_style_is_one_vec4() {
        assert_eq!(std::mem::size_of::<ParticleStyle>(), 16);
    }

    #[test]
    fn test_builders() {
        let params = FieldParams::default()
            .with_count(3)
            .with_radius(10.0)
            .with_seed(7);
        assert_eq!(params.count, 3);
        assert_eq!(params.radius, 10.0);
        assert_eq!(params.max_initial_speed, 0.3);
        assert_eq!(params.seed, Some(7));
    }
}
