//! Simulation context
//!
//! The host calls [`ParticleSimulation::step`] once per frame; the context
//! never schedules its own continuation. The field is only ever mutated
//! inside `step`, and read through shared borrows between steps.

use crate::clock::{FrameClock, FrameTick};
use particle_field::{FieldParams, ParticleField, ParticleStyle};

pub struct ParticleSimulation {
    field: ParticleField,
    params: FieldParams,
    clock: FrameClock,
    needs_upload: bool,
}

impl ParticleSimulation {
    /// Sample a fresh field from `params`.
    pub fn new(params: FieldParams) -> Self {
        let field = ParticleField::from_params(&params);
        log::info!(
            "Initialized {} particles (radius {}, max initial speed {})",
            field.len(),
            params.radius,
            params.max_initial_speed
        );
        Self::with_field(field, params)
    }

    /// Wrap an existing field. `params.count` is ignored in favour of the field's length.
    pub fn with_field(field: ParticleField, params: FieldParams) -> Self {
        Self {
            params: FieldParams {
                count: field.len(),
                ..params
            },
            field,
            clock: FrameClock::new(),
            // The initial positions have never been uploaded
            needs_upload: true,
        }
    }

    /// Advance the field by one step.
    ///
    /// `elapsed` is seconds since the host started and only feeds the frame
    /// clock; particle motion is one velocity step per call.
    pub fn step(&mut self, elapsed: f32) -> FrameTick {
        let tick = self.clock.tick(elapsed);
        particle_field::step(&mut self.field, self.params.radius);
        self.needs_upload = true;
        tick
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn style(&self) -> ParticleStyle {
        self.params.style
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn particle_count(&self) -> u32 {
        self.field.len() as u32
    }

    /// Flat `[x, y, 0.0]` position buffer.
    pub fn positions(&self) -> &[f32] {
        self.field.positions_flat()
    }

    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    /// Read and clear the upload flag.
    pub fn take_needs_upload(&mut self) -> bool {
        std::mem::take(&mut self.needs_upload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use particle_field::Particle;

    fn scenario() -> ParticleSimulation {
        let field = ParticleField::from_particles([
            Particle::new(Vec2::new(10.0, 0.0), Vec2::new(1.0, 0.0)),
            Particle::new(Vec2::new(-10.0, 5.0), Vec2::new(-1.0, 0.0)),
            Particle::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.5)),
        ]);
        ParticleSimulation::with_field(field, FieldParams::default().with_radius(10.0))
    }

    #[test]
    fn test_new_uses_default_count() {
        let simulation = ParticleSimulation::new(FieldParams::default().with_seed(1));
        assert_eq!(simulation.particle_count(), 150);
        assert_eq!(simulation.positions().len(), 150 * 3);
    }

    #[test]
    fn test_with_field_overrides_count() {
        let simulation = scenario();
        assert_eq!(simulation.params().count, 3);
        assert_eq!(simulation.params().radius, 10.0);
    }

    #[test]
    fn test_step_advances_once_and_flags_upload() {
        let mut simulation = scenario();
        assert!(simulation.take_needs_upload());
        assert!(!simulation.needs_upload());

        let tick = simulation.step(0.016);
        assert_eq!(tick.frame, 1);
        assert!(simulation.needs_upload());
        assert_eq!(
            simulation.positions(),
            &[9.0, 0.0, 0.0, -9.0, 5.0, 0.0, 0.0, 0.5, 0.0]
        );
    }

    #[test]
    fn test_motion_ignores_elapsed_time() {
        let mut slow = scenario();
        let mut fast = scenario();

        slow.step(0.001);
        fast.step(10.0);

        assert_eq!(slow.field(), fast.field());
        assert_eq!(fast.clock().delta(), 10.0);
    }

    #[test]
    fn test_count_survives_many_steps() {
        let mut simulation = ParticleSimulation::new(FieldParams::default().with_seed(8));
        for frame in 0..1000 {
            simulation.step(frame as f32 / 60.0);
        }
        assert_eq!(simulation.field().len(), 150);
        assert_eq!(simulation.clock().frame(), 1000);
    }
}
