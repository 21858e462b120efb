//! CPU texture images and their GPU counterparts.

use std::path::Path;

use anyhow::{Context, Result};

/// How the stored bytes map to sampled values.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TexelEncoding {
    /// Colour images; decoded from sRGB when sampled.
    Srgb,
    /// Data maps (heights, masks); sampled as stored.
    Linear,
}

impl TexelEncoding {
    pub fn format(self) -> wgpu::TextureFormat {
        match self {
            TexelEncoding::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            TexelEncoding::Linear => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// RGBA8 image plus how it should be sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, top row first.
    pub rgba: Vec<u8>,
    pub filter: wgpu::FilterMode,
    pub encoding: TexelEncoding,
}

const CHECKER_A: [u8; 4] = [255, 255, 0, 255];
const CHECKER_B: [u8; 4] = [0, 0, 255, 255];

impl TextureData {
    /// Yellow/blue checkerboard with one texel per square, sampled nearest.
    pub fn checker(width: u32, height: u32) -> Self {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let texel = if (x + y) % 2 == 0 { CHECKER_A } else { CHECKER_B };
                rgba.extend_from_slice(&texel);
            }
        }
        Self {
            width,
            height,
            rgba,
            filter: wgpu::FilterMode::Nearest,
            encoding: TexelEncoding::Srgb,
        }
    }

    /// Single opaque white texel; modulating by it is a no-op.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
            filter: wgpu::FilterMode::Nearest,
            encoding: TexelEncoding::Srgb,
        }
    }

    /// Linear grey-scale map from samples in `[0, 1]` (values outside are clamped).
    pub fn from_gray(width: u32, height: u32, samples: &[f32]) -> Result<Self> {
        anyhow::ensure!(
            samples.len() == (width * height) as usize,
            "expected {} samples for {width}x{height}, got {}",
            width * height,
            samples.len()
        );
        let rgba = samples
            .iter()
            .flat_map(|&s| {
                let v = (s.clamp(0.0, 1.0) * 255.0).round() as u8;
                [v, v, v, 255]
            })
            .collect();
        Ok(Self {
            width,
            height,
            rgba,
            filter: wgpu::FilterMode::Linear,
            encoding: TexelEncoding::Linear,
        })
    }

    /// Decodes a PNG file.
    pub fn load_png(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
            filter: wgpu::FilterMode::Linear,
            encoding: TexelEncoding::Srgb,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

/// Sampled texture resident on the GPU.
pub struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, label: &str, data: &TextureData) -> Self {
        let size = wgpu::Extent3d {
            width: data.width.max(1),
            height: data.height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: data.encoding.format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        write_pixels(queue, &texture, data);

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: data.filter,
            min_filter: data.filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        log::debug!(
            "uploaded texture '{label}' {}x{} ({:?})",
            data.width,
            data.height,
            data.encoding
        );

        Self { texture, view, sampler }
    }

    /// Replaces the texel data. `data` must match the uploaded size and encoding.
    pub fn write(&self, queue: &wgpu::Queue, data: &TextureData) -> Result<()> {
        anyhow::ensure!(
            self.texture.format() == data.encoding.format(),
            "texture encoding changed: {:?} -> {:?}",
            self.texture.format(),
            data.encoding
        );
        let size = self.texture.size();
        anyhow::ensure!(
            size.width == data.width && size.height == data.height,
            "texture size changed: {}x{} -> {}x{}",
            size.width,
            size.height,
            data.width,
            data.height
        );
        write_pixels(queue, &self.texture, data);
        Ok(())
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

fn write_pixels(queue: &wgpu::Queue, texture: &wgpu::Texture, data: &TextureData) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &data.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * data.width),
            rows_per_image: Some(data.height),
        },
        texture.size(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_alternates() {
        let t = TextureData::checker(4, 8);
        assert_eq!(t.rgba.len(), 4 * 8 * 4);
        assert_eq!(t.pixel(0, 0), CHECKER_A);
        assert_eq!(t.pixel(1, 0), CHECKER_B);
        assert_eq!(t.pixel(1, 1), CHECKER_A);
        assert_eq!(t.filter, wgpu::FilterMode::Nearest);
        assert_eq!(t.encoding, TexelEncoding::Srgb);
    }

    #[test]
    fn data_maps_are_linear_and_colour_maps_srgb() {
        let gray = TextureData::from_gray(2, 1, &[0.25, 0.75]).unwrap();
        assert_eq!(gray.encoding, TexelEncoding::Linear);
        assert_eq!(gray.encoding.format(), wgpu::TextureFormat::Rgba8Unorm);
        assert!(!gray.encoding.format().is_srgb());

        assert!(TextureData::white().encoding.format().is_srgb());
        assert!(TextureData::checker(2, 2).encoding.format().is_srgb());
    }

    #[test]
    fn gray_samples_are_quantized_and_clamped() {
        let t = TextureData::from_gray(3, 1, &[0.0, 0.5, 2.0]).unwrap();
        assert_eq!(t.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(t.pixel(1, 0), [128, 128, 128, 255]);
        assert_eq!(t.pixel(2, 0), [255, 255, 255, 255]);
        assert!(TextureData::from_gray(2, 2, &[0.0; 3]).is_err());
    }

    #[test]
    fn missing_png_is_an_error() {
        let err = TextureData::load_png("definitely/not/here.png").unwrap_err();
        assert!(format!("{err:#}").contains("not/here.png"));
    }
}
