//! GPU mirror of the particle field
//!
//! Positions are uploaded as the flat `count * 3` float buffer the field
//! already stores; the vertex shader indexes it as `array<f32>`. Appearance
//! never changes after start-up and is uploaded once.

use crate::simulation::ParticleSimulation;
use particle_field::ParticleStyle;
use wgpu::util::DeviceExt;

const EMPTY_POSITION: [f32; 3] = [0.0; 3];

pub struct ParticleBuffers {
    position_buffer: wgpu::Buffer,
    style_buffer: wgpu::Buffer,
    particle_count: u32,
}

impl ParticleBuffers {
    pub fn new(device: &wgpu::Device, simulation: &ParticleSimulation) -> Self {
        let particle_count = simulation.particle_count();

        // Zero-sized storage bindings are invalid, so an empty field still gets one slot
        let positions = padded(simulation.positions(), &EMPTY_POSITION);
        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Position Buffer"),
            contents: bytemuck::cast_slice(positions),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });

        let styles = vec![simulation.style(); particle_count.max(1) as usize];
        let style_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Style Buffer"),
            contents: bytemuck::cast_slice::<ParticleStyle, u8>(&styles),
            usage: wgpu::BufferUsages::STORAGE,
        });

        log::info!(
            "Particle buffers created ({} bytes of positions)",
            position_buffer.size()
        );

        Self {
            position_buffer,
            style_buffer,
            particle_count,
        }
    }

    /// Upload positions if the simulation stepped since the last sync.
    pub fn sync(&self, queue: &wgpu::Queue, simulation: &mut ParticleSimulation) {
        if !simulation.take_needs_upload() {
            return;
        }

        let positions = simulation.positions();
        if !positions.is_empty() {
            queue.write_buffer(&self.position_buffer, 0, bytemuck::cast_slice(positions));
        }
    }

    pub fn position_buffer(&self) -> &wgpu::Buffer {
        &self.position_buffer
    }

    pub fn style_buffer(&self) -> &wgpu::Buffer {
        &self.style_buffer
    }

    pub fn particle_count(&self) -> u32 {
        self.particle_count
    }
}

fn padded<'a>(data: &'a [f32], fallback: &'a [f32]) -> &'a [f32] {
    if data.is_empty() {
        fallback
    } else {
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_keeps_data() {
        let data = [1.0, 2.0, 0.0];
        assert_eq!(padded(&data, &[0.0; 3]), &data);
    }

    #[test]
    fn test_padded_empty_uses_fallback() {
        assert_eq!(padded(&[], &[0.0; 3]), &[0.0, 0.0, 0.0]);
    }
}
