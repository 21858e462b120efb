use anyhow::Result;
use tessera_geom::{StripMesh, SurfaceVertex};
use wgpu::util::DeviceExt;

/// Vertex layout of [`SurfaceVertex`] (32 bytes):
///
///  offset  0  position  vec3  loc 0
///  offset 12  normal    vec3  loc 1
///  offset 24  texcoord  vec2  loc 2
pub(crate) fn surface_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // texcoord
    ];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SurfaceVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

/// Strip mesh resident on the GPU. Shared between objects through `Rc`.
pub struct GpuMesh {
    buffer: wgpu::Buffer,
    strips: u32,
    vertices_per_strip: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, label: &str, mesh: &StripMesh) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        log::debug!(
            "uploaded mesh '{label}': {} strips x {} vertices",
            mesh.strips,
            mesh.vertices_per_strip
        );

        Self {
            buffer,
            strips: mesh.strips,
            vertices_per_strip: mesh.vertices_per_strip,
        }
    }

    /// Re-uploads the whole vertex buffer. The strip layout must be unchanged.
    pub fn write(&self, queue: &wgpu::Queue, mesh: &StripMesh) -> Result<()> {
        anyhow::ensure!(
            mesh.strips == self.strips && mesh.vertices_per_strip == self.vertices_per_strip,
            "mesh layout changed: {}x{} -> {}x{}",
            self.strips,
            self.vertices_per_strip,
            mesh.strips,
            mesh.vertices_per_strip
        );
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&mesh.vertices));
        Ok(())
    }

    #[inline]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Total vertices across all strips.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.strips * self.vertices_per_strip
    }

    /// Vertex ranges of the individual strips.
    pub fn strip_ranges(&self) -> impl Iterator<Item = std::ops::Range<u32>> + '_ {
        let n = self.vertices_per_strip;
        (0..self.strips).map(move |i| i * n..(i + 1) * n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_the_cpu_struct() {
        let layout = surface_vertex_layout();
        assert_eq!(layout.array_stride, 32);
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 12, 24]);
    }
}
