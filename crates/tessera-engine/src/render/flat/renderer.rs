use std::ops::Range;

use crate::render::common::premul_alpha_blend;
use crate::render::ctx::load_color;
use crate::render::{RenderCtx, RenderTarget};

use super::cmd::{Topology, lower};
use super::{DrawList, FlatVertex};

/// Renderer for a flat [`DrawList`].
///
/// All commands share one vertex buffer; consecutive items that lower to the
/// same topology are drawn with a single call, so paint order is preserved.
#[derive(Default)]
pub struct FlatRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    triangles: Option<wgpu::RenderPipeline>,
    lines: Option<wgpu::RenderPipeline>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    // reused between frames
    scratch: Vec<FlatVertex>,
    runs: Vec<(Topology, Range<u32>)>,
}

impl FlatRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.ensure_pipelines(ctx);

        self.scratch.clear();
        self.runs.clear();
        for item in draw_list.iter_in_paint_order() {
            let start = self.scratch.len() as u32;
            let topo = lower(&item.cmd, ctx.viewport, &mut self.scratch);
            let end = self.scratch.len() as u32;
            if start == end {
                continue;
            }
            match self.runs.last_mut() {
                Some((t, range)) if *t == topo => range.end = end,
                _ => self.runs.push((topo, start..end)),
            }
        }

        if self.runs.is_empty() {
            return;
        }

        self.ensure_vertex_capacity(ctx, self.scratch.len());
        let Some(vbo) = self.vbo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.scratch));

        let Some(triangles) = self.triangles.as_ref() else { return };
        let Some(lines) = self.lines.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessera flat pass"),
            color_attachments: &[Some(load_color(target.color_view))],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_vertex_buffer(0, vbo.slice(..));
        for (topo, range) in &self.runs {
            match topo {
                Topology::Triangles => rpass.set_pipeline(triangles),
                Topology::Lines => rpass.set_pipeline(lines),
            }
            rpass.draw(range.clone(), 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.triangles.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tessera flat shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/flat.wgsl").into()),
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessera flat pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let build = |label: &str, topology: wgpu::PrimitiveTopology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[FlatVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(premul_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.triangles = Some(build(
            "tessera flat triangle pipeline",
            wgpu::PrimitiveTopology::TriangleList,
        ));
        self.lines = Some(build("tessera flat line pipeline", wgpu::PrimitiveTopology::LineList));
        self.pipeline_format = Some(ctx.surface_format);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(256);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessera flat vbo"),
            size: (new_cap * std::mem::size_of::<FlatVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}
