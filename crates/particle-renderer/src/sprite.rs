//! Procedural spark sprite
//!
//! A white disc whose color and alpha both fall off quadratically from the
//! center, sampled per fragment of every point quad.

/// RGBA8 pixels of a `size` x `size` spark, row-major.
pub fn spark_pixels(size: u32) -> Vec<u8> {
    let size = size.max(1);
    let half = size as f32 * 0.5;
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            // Sample at texel centers
            let dx = (x as f32 + 0.5 - half) / half;
            let dy = (y as f32 + 0.5 - half) / half;
            let value = (spark_falloff((dx * dx + dy * dy).sqrt()) * 255.0).round() as u8;
            pixels.extend_from_slice(&[value, value, value, value]);
        }
    }

    pixels
}

/// Intensity at normalized distance `d` from the center (1.0 = edge).
pub fn spark_falloff(d: f32) -> f32 {
    let t = (1.0 - d).clamp(0.0, 1.0);
    t * t
}

pub struct SpriteTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl SpriteTexture {
    pub fn spark(device: &wgpu::Device, queue: &wgpu::Queue, size: u32) -> Self {
        let size = size.max(1);
        let extent = wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Spark Sprite Texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &spark_pixels(size),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size),
                rows_per_image: Some(size),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Spark Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self { view, sampler }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falloff_shape() {
        assert_eq!(spark_falloff(0.0), 1.0);
        assert_eq!(spark_falloff(0.5), 0.25);
        assert_eq!(spark_falloff(1.0), 0.0);
        assert_eq!(spark_falloff(1.5), 0.0);
    }

    #[test]
    fn test_pixel_count() {
        assert_eq!(spark_pixels(16).len(), 16 * 16 * 4);
    }

    #[test]
    fn test_center_bright_corners_dark() {
        let size = 32;
        let pixels = spark_pixels(size);
        let at = |x: u32, y: u32| pixels[((y * size + x) * 4) as usize];

        assert!(at(15, 15) > 220);
        assert!(at(15, 15) > at(8, 15));
        assert_eq!(at(0, 0), 0);
        assert_eq!(at(31, 31), 0);
        assert_eq!(at(0, 31), 0);
    }

    #[test]
    fn test_symmetric() {
        let size = 32;
        let pixels = spark_pixels(size);
        let at = |x: u32, y: u32| pixels[((y * size + x) * 4) as usize];

        for y in 0..size {
            for x in 0..size {
                assert_eq!(at(x, y), at(size - 1 - x, y));
                assert_eq!(at(x, y), at(x, size - 1 - y));
            }
        }
    }

    #[test]
    fn test_white_with_matching_alpha() {
        for texel in spark_pixels(8).chunks_exact(4) {
            assert!(texel.iter().all(|&c| c == texel[0]));
        }
    }
}
