//! Particle storage
//!
//! Positions are kept as `[x, y, 0.0]` triples so the whole position sequence
//! can be handed to the renderer as one flat `f32` slice without copying.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::FieldParams;

/// A single particle, detached from the field
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// Fixed-length, ordered collection of particles
///
/// The length is set at construction and never changes; index `i` refers to
/// the same particle for the lifetime of the field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
    positions: Vec<[f32; 3]>,
    velocities: Vec<Vec2>,
}

impl ParticleField {
    /// Sample `count` particles uniformly: positions in `[-radius, radius]`,
    /// velocity components in `[-max_speed, max_speed]`.
    pub fn random<R: Rng + ?Sized>(count: usize, radius: f32, max_speed: f32, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);

        for _ in 0..count {
            let x = (rng.random::<f32>() * 2.0 - 1.0) * radius;
            let y = (rng.random::<f32>() * 2.0 - 1.0) * radius;
            positions.push([x, y, 0.0]);

            let vx = (rng.random::<f32>() * 2.0 - 1.0) * max_speed;
            let vy = (rng.random::<f32>() * 2.0 - 1.0) * max_speed;
            velocities.push(Vec2::new(vx, vy));
        }

        Self {
            positions,
            velocities,
        }
    }

    /// Build a field from `params`, seeded when `params.seed` is set.
    pub fn from_params(params: &FieldParams) -> Self {
        match params.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Self::random(params.count, params.radius, params.max_initial_speed, &mut rng)
            }
            None => {
                let mut rng = rand::rng();
                Self::random(params.count, params.radius, params.max_initial_speed, &mut rng)
            }
        }
    }

    pub fn from_particles<I>(particles: I) -> Self
    where
        I: IntoIterator<Item = Particle>,
    {
        let (positions, velocities) = particles
            .into_iter()
            .map(|p| ([p.position.x, p.position.y, 0.0], p.velocity))
            .unzip();

        Self {
            positions,
            velocities,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Particle> {
        let [x, y, _] = *self.positions.get(index)?;
        let velocity = *self.velocities.get(index)?;
        Some(Particle::new(Vec2::new(x, y), velocity))
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        self.positions
            .iter()
            .zip(&self.velocities)
            .map(|([x, y, _], v)| Particle::new(Vec2::new(*x, *y), *v))
    }

    /// Positions as `count * 3` floats, every third value 0.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    /// Split borrow for the stepper: positions and velocities at once.
    pub(crate) fn parts_mut(&mut self) -> (&mut [[f32; 3]], &mut [Vec2]) {
        (&mut self.positions, &mut self.velocities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_field_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = ParticleField::random(1000, 100.0, 0.3, &mut rng);

        assert_eq!(field.len(), 1000);
        for p in field.iter() {
            assert!(p.position.x >= -100.0 && p.position.x <= 100.0);
            assert!(p.position.y >= -100.0 && p.position.y <= 100.0);
            assert!(p.velocity.x >= -0.3 && p.velocity.x <= 0.3);
            assert!(p.velocity.y >= -0.3 && p.velocity.y <= 0.3);
        }
    }

    #[test]
    fn test_random_field_spreads_over_box() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = ParticleField::random(1000, 100.0, 0.3, &mut rng);

        // Every quadrant should be populated
        let quadrants = field.iter().fold([0usize; 4], |mut acc, p| {
            let q = (p.position.x >= 0.0) as usize | (((p.position.y >= 0.0) as usize) << 1);
            acc[q] += 1;
            acc
        });
        assert!(quadrants.iter().all(|&n| n > 100));
    }

    #[test]
    fn test_seeded_fields_are_reproducible() {
        let params = FieldParams::default().with_seed(1234);
        assert_eq!(
            ParticleField::from_params(&params),
            ParticleField::from_params(&params)
        );
    }

    #[test]
    fn test_from_params_uses_count() {
        let field = ParticleField::from_params(&FieldParams::default());
        assert_eq!(field.len(), 150);
        assert_eq!(field.velocities().len(), 150);
    }

    #[test]
    fn test_flat_positions_have_zero_z() {
        let field = ParticleField::from_particles([
            Particle::new(Vec2::new(1.0, 2.0), Vec2::ZERO),
            Particle::new(Vec2::new(-3.0, 4.0), Vec2::ZERO),
        ]);

        assert_eq!(field.positions_flat(), &[1.0, 2.0, 0.0, -3.0, 4.0, 0.0]);
    }

    #[test]
    fn test_empty_field() {
        let field = ParticleField::random(0, 100.0, 0.3, &mut StdRng::seed_from_u64(0));
        assert!(field.is_empty());
        assert!(field.positions_flat().is_empty());
        assert_eq!(field.get(0), None);
    }
}
