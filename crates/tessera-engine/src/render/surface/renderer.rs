use std::mem::size_of;

use crate::device::DEPTH_FORMAT;
use crate::render::common::{align_to, binding_size, uniform_entry};
use crate::render::ctx::{load_color, load_depth};
use crate::render::mesh::surface_vertex_layout;
use crate::render::texture::{GpuTexture, TextureData};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{MAX_LIGHTS, Object, Scene, ShaderKind};

use super::cache::RcCache;
use super::uniforms::{FrameUniform, ObjectUniform};

const COMMON_WGSL: &str = include_str!("shaders/common.wgsl");
const NORMALS_WGSL: &str = include_str!("shaders/normals.wgsl");

fn shader_source(kind: ShaderKind) -> (&'static str, &'static str) {
    match kind {
        ShaderKind::Phong => ("phong", include_str!("shaders/phong.wgsl")),
        ShaderKind::Gouraud => ("gouraud", include_str!("shaders/gouraud.wgsl")),
        ShaderKind::Npr => ("npr", include_str!("shaders/npr.wgsl")),
    }
}

/// Pipelines and layouts for one surface format.
struct Pipelines {
    format: wgpu::TextureFormat,
    fill: Vec<wgpu::RenderPipeline>,
    /// Line-mode variants; empty without `Features::POLYGON_MODE_LINE`.
    wire: Vec<wgpu::RenderPipeline>,
    /// Vertex normals as line segments, one instance per mesh vertex.
    normals: wgpu::RenderPipeline,
    frame_bgl: wgpu::BindGroupLayout,
    object_bgl: wgpu::BindGroupLayout,
    texture_bgl: wgpu::BindGroupLayout,
}

/// Draws a [`Scene`]: one pipeline per [`ShaderKind`], one draw per strip.
///
/// Bind groups:
/// - group 0: frame block (lights, eye)
/// - group 1: object block, one aligned slot per object (dynamic offset)
/// - group 2: diffuse texture + sampler (1×1 white when the object has none),
///   built once per texture
#[derive(Default)]
pub struct SurfaceRenderer {
    pipelines: Option<Pipelines>,

    frame_ubo: Option<wgpu::Buffer>,
    frame_bg: Option<wgpu::BindGroup>,

    object_ubo: Option<wgpu::Buffer>,
    object_bg: Option<wgpu::BindGroup>,
    object_capacity: usize,
    object_stride: u64,

    white: Option<GpuTexture>,
    white_bg: Option<wgpu::BindGroup>,
    texture_bgs: RcCache<GpuTexture, wgpu::BindGroup>,

    warned_lights: bool,
    warned_wireframe: bool,
}

impl SurfaceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &Scene) {
        self.ensure_pipelines(ctx);
        self.ensure_frame_bindings(ctx);
        self.ensure_object_capacity(ctx, scene.objects.len());
        self.ensure_texture_bindings(ctx, scene);

        if scene.lights.len() > MAX_LIGHTS && !self.warned_lights {
            log::warn!(
                "scene has {} lights; only the first {MAX_LIGHTS} are used",
                scene.lights.len()
            );
            self.warned_lights = true;
        }

        if scene.objects.is_empty() {
            return;
        }

        let Some(frame_ubo) = self.frame_ubo.as_ref() else { return };
        let frame = FrameUniform::new(&scene.camera, scene.active_lights());
        ctx.queue.write_buffer(frame_ubo, 0, bytemuck::bytes_of(&frame));

        self.write_object_uniforms(ctx, scene);

        let Some(pipelines) = self.pipelines.as_ref() else { return };
        let Some(frame_bg) = self.frame_bg.as_ref() else { return };
        let Some(object_bg) = self.object_bg.as_ref() else { return };

        let wants_wire = scene.objects.iter().any(|o| o.wireframe);
        if wants_wire && pipelines.wire.is_empty() && !self.warned_wireframe {
            log::warn!("wireframe requested but POLYGON_MODE_LINE is unavailable; drawing filled");
            self.warned_wireframe = true;
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessera surface pass"),
            color_attachments: &[Some(load_color(target.color_view))],
            depth_stencil_attachment: Some(load_depth(target.depth_view)),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, frame_bg, &[]);

        for (i, obj) in scene.objects.iter().enumerate() {
            let Some(texture_bg) = self.bind_group_for(obj) else { continue };
            let k = obj.shader.index();
            let pipeline = if obj.wireframe && !pipelines.wire.is_empty() {
                &pipelines.wire[k]
            } else {
                &pipelines.fill[k]
            };

            let offset = (i as u64 * self.object_stride) as u32;

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(1, object_bg, &[offset]);
            rpass.set_bind_group(2, texture_bg, &[]);
            rpass.set_vertex_buffer(0, obj.mesh.buffer().slice(..));

            for strip in obj.mesh.strip_ranges() {
                rpass.draw(strip, 0..1);
            }

            if obj.show_normals {
                rpass.set_pipeline(&pipelines.normals);
                rpass.draw(0..2, 0..obj.mesh.vertex_count());
            }
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipelines.as_ref().is_some_and(|p| p.format == ctx.surface_format) {
            return;
        }

        let vis = wgpu::ShaderStages::VERTEX_FRAGMENT;

        let frame_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera surface frame bgl"),
            entries: &[uniform_entry(0, vis, false, binding_size::<FrameUniform>())],
        });

        let object_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera surface object bgl"),
            entries: &[uniform_entry(0, vis, true, binding_size::<ObjectUniform>())],
        });

        let texture_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera surface texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessera surface pipeline layout"),
            bind_group_layouts: &[&frame_bgl, &object_bgl, &texture_bgl],
            immediate_size: 0,
        });

        let line_mode = ctx.features().contains(wgpu::Features::POLYGON_MODE_LINE);

        let mut fill = Vec::with_capacity(ShaderKind::ALL.len());
        let mut wire = Vec::new();
        for kind in ShaderKind::ALL {
            let (name, body) = shader_source(kind);
            let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(name),
                source: wgpu::ShaderSource::Wgsl(format!("{COMMON_WGSL}\n{body}").into()),
            });

            let primitive = surface_primitive(wgpu::PolygonMode::Fill);
            fill.push(create_pipeline(ctx, &layout, &module, name, primitive));
            if line_mode {
                let primitive = surface_primitive(wgpu::PolygonMode::Line);
                wire.push(create_pipeline(ctx, &layout, &module, name, primitive));
            }
        }

        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("normals"),
            source: wgpu::ShaderSource::Wgsl(format!("{COMMON_WGSL}\n{NORMALS_WGSL}").into()),
        });
        let normals = create_pipeline(
            ctx,
            &layout,
            &module,
            "normals",
            wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
        );

        log::debug!(
            "surface pipelines built for {:?} (wireframe: {line_mode})",
            ctx.surface_format
        );

        self.pipelines = Some(Pipelines {
            format: ctx.surface_format,
            fill,
            wire,
            normals,
            frame_bgl,
            object_bgl,
            texture_bgl,
        });

        // Bind groups reference the old layouts.
        self.frame_bg = None;
        self.object_bg = None;
        self.object_capacity = 0;
        self.white_bg = None;
        self.texture_bgs.clear();
    }

    fn ensure_frame_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.white.is_none() {
            self.white = Some(GpuTexture::upload(
                ctx.device,
                ctx.queue,
                "tessera white texture",
                &TextureData::white(),
            ));
        }

        if self.frame_bg.is_some() && self.frame_ubo.is_some() {
            return;
        }
        let Some(pipelines) = self.pipelines.as_ref() else { return };

        let frame_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessera surface frame ubo"),
            size: size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bg = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessera surface frame bind group"),
            layout: &pipelines.frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_ubo.as_entire_binding(),
            }],
        });

        self.frame_ubo = Some(frame_ubo);
        self.frame_bg = Some(frame_bg);
    }

    fn ensure_object_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.object_capacity && self.object_bg.is_some() {
            return;
        }
        let Some(pipelines) = self.pipelines.as_ref() else { return };

        let align = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        self.object_stride = align_to(size_of::<ObjectUniform>() as u64, align);

        let new_cap = required.next_power_of_two().max(16);
        let object_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessera surface object ubo"),
            size: new_cap as u64 * self.object_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let object_bg = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessera surface object bind group"),
            layout: &pipelines.object_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_ubo,
                    offset: 0,
                    size: binding_size::<ObjectUniform>(),
                }),
            }],
        });

        self.object_ubo = Some(object_ubo);
        self.object_bg = Some(object_bg);
        self.object_capacity = new_cap;
    }

    fn ensure_texture_bindings(&mut self, ctx: &RenderCtx<'_>, scene: &Scene) {
        let Some(pipelines) = self.pipelines.as_ref() else { return };

        self.texture_bgs.prune();

        if self.white_bg.is_none() {
            if let Some(white) = self.white.as_ref() {
                self.white_bg = Some(texture_bind_group(ctx.device, &pipelines.texture_bgl, white));
            }
        }

        for texture in scene.objects.iter().filter_map(|o| o.texture.as_ref()) {
            self.texture_bgs.ensure_with(texture, || {
                texture_bind_group(ctx.device, &pipelines.texture_bgl, texture)
            });
        }
    }

    fn bind_group_for(&self, obj: &Object) -> Option<&wgpu::BindGroup> {
        match obj.texture.as_ref() {
            Some(texture) => self.texture_bgs.get(texture),
            None => self.white_bg.as_ref(),
        }
    }

    fn write_object_uniforms(&self, ctx: &RenderCtx<'_>, scene: &Scene) {
        let Some(ubo) = self.object_ubo.as_ref() else { return };

        let view_projection = scene.camera.view_projection();
        let stride = self.object_stride as usize;
        let mut bytes = vec![0u8; scene.objects.len() * stride];

        for (i, obj) in scene.objects.iter().enumerate() {
            let block = ObjectUniform::new(view_projection, &obj.transform, &obj.material);
            let raw = bytemuck::bytes_of(&block);
            bytes[i * stride..i * stride + raw.len()].copy_from_slice(raw);
        }

        ctx.queue.write_buffer(ubo, 0, &bytes);
    }
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &GpuTexture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("tessera surface texture bind group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(texture.view()),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(texture.sampler()),
            },
        ],
    })
}

fn surface_primitive(polygon_mode: wgpu::PolygonMode) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleStrip,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        // surfaces may be one-sided; the shaders flip back-facing normals
        cull_mode: None,
        polygon_mode,
        unclipped_depth: false,
        conservative: false,
    }
}

/// Line lists read the mesh once per instance; strips once per vertex.
fn create_pipeline(
    ctx: &RenderCtx<'_>,
    layout: &wgpu::PipelineLayout,
    module: &wgpu::ShaderModule,
    name: &str,
    primitive: wgpu::PrimitiveState,
) -> wgpu::RenderPipeline {
    let label = format!("tessera {name} pipeline ({:?})", primitive.polygon_mode);
    let step_mode = match primitive.topology {
        wgpu::PrimitiveTopology::LineList => wgpu::VertexStepMode::Instance,
        _ => wgpu::VertexStepMode::Vertex,
    };
    let buffers = [wgpu::VertexBufferLayout { step_mode, ..surface_vertex_layout() }];
    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive,
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
