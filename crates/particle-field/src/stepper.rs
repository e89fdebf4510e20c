//! Per-frame update with reactive boundary reflection
//!
//! The bounce check reads the position from before the step, then the
//! position advances with the possibly flipped velocity. A particle can
//! therefore overshoot `radius` by up to one step before it turns back;
//! positions are never clamped.

use crate::field::ParticleField;

/// Advance every particle in `field` by exactly one step.
pub fn step(field: &mut ParticleField, radius: f32) {
    let (positions, velocities) = field.parts_mut();

    for (position, velocity) in positions.iter_mut().zip(velocities.iter_mut()) {
        if position[0] >= radius || position[0] <= -radius {
            velocity.x = -velocity.x;
        }
        if position[1] >= radius || position[1] <= -radius {
            velocity.y = -velocity.y;
        }

        position[0] += velocity.x;
        position[1] += velocity.y;
    }
}
