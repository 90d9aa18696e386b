use crate::constants::{
    AXIS_COLORS, FEATURE_EDGE_DEG, LIGHT_AMBIENT, LIGHT_DIR, LIGHT_DIRECTIONAL,
};
use crate::geometry::{self, LineVertex, LitVertex};
use crate::scene::WebScene;
use buildvolume_core::{AxisGuide, Camera, GridSpec, Rgb, Theme, Viewer};
use glam::Vec3;
use web_sys as web;
use wgpu::util::DeviceExt;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    ambient: [f32; 4],
}

struct VertexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl VertexBuffer {
    fn from_slice<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
    ) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Some(Self {
            buffer,
            count: data.len() as u32,
        })
    }
}

/// Inputs the guide lines depend on; they are rebuilt only when this changes.
#[derive(Clone, Copy, PartialEq)]
struct GuideKey {
    grid: GridSpec,
    axis: AxisGuide,
    theme: Theme,
    show_axes: bool,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    mesh_pipeline: wgpu::RenderPipeline,
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,

    mesh: Option<VertexBuffer>,
    fills: Option<VertexBuffer>,
    lines: Option<VertexBuffer>,

    guide_key: Option<GuideKey>,
    guide_lines: Vec<LineVertex>,
    box_lines: Vec<LineVertex>,
    mesh_lines: Vec<LineVertex>,
    mesh_edges: Vec<(Vec3, Vec3)>,
    mesh_generation: u64,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let lit_attrs = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];
        let lit_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LitVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &lit_attrs,
        };
        let line_attrs = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];
        let line_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &line_attrs,
        };

        let mesh_pipeline = make_pipeline(
            &device,
            &layout,
            &shader,
            PipelineSpec {
                label: "mesh_pipeline",
                vs: "vs_lit",
                fs: "fs_lit",
                vertex: lit_layout.clone(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: true,
                format,
            },
        );
        let fill_pipeline = make_pipeline(
            &device,
            &layout,
            &shader,
            PipelineSpec {
                label: "fill_pipeline",
                vs: "vs_lit",
                fs: "fs_lit",
                vertex: lit_layout,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: false,
                format,
            },
        );
        let line_pipeline = make_pipeline(
            &device,
            &layout,
            &shader,
            PipelineSpec {
                label: "line_pipeline",
                vs: "vs_line",
                fs: "fs_line",
                vertex: line_layout,
                topology: wgpu::PrimitiveTopology::LineList,
                depth_write: false,
                format,
            },
        );
        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            globals_buffer,
            globals_bind_group,
            mesh_pipeline,
            fill_pipeline,
            line_pipeline,
            mesh: None,
            fills: None,
            lines: None,
            guide_key: None,
            guide_lines: Vec::new(),
            box_lines: Vec::new(),
            mesh_lines: Vec::new(),
            mesh_edges: Vec::new(),
            mesh_generation: 0,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Rebuild vertex buffers for whatever changed since the last frame.
    pub fn sync(&mut self, viewer: &mut Viewer<WebScene>) {
        let key = GuideKey {
            grid: viewer.grid(),
            axis: viewer.axis_guide(),
            theme: viewer.theme(),
            show_axes: viewer.show_axes(),
        };
        let guides_changed = self.guide_key != Some(key);
        if guides_changed {
            let palette = key.theme.palette();
            self.guide_lines =
                geometry::grid_lines(key.grid, palette.grid_major, palette.grid_minor);
            if key.show_axes {
                let colors = AXIS_COLORS.map(Rgb::from_u32);
                self.guide_lines
                    .extend(geometry::axis_lines(key.axis, colors));
            }
            self.guide_key = Some(key);
        }

        let scene = viewer.scene_mut();
        let boxes_changed = scene.take_boxes_dirty();
        let mesh_changed = scene.take_mesh_dirty();

        if boxes_changed {
            let mut fills: Vec<LitVertex> = Vec::new();
            self.box_lines.clear();
            for (_, node) in scene.boxes().into_iter().filter(|(_, n)| n.visible) {
                geometry::push_box_fill(&mut fills, node);
                geometry::push_box_edges(&mut self.box_lines, node);
            }
            self.fills = VertexBuffer::from_slice(&self.device, "box_fills", &fills);
        }

        if mesh_changed {
            match scene.reference().filter(|n| n.visible) {
                Some(node) => {
                    if scene.mesh_generation() != self.mesh_generation {
                        self.mesh_edges = geometry::feature_edges(&node.mesh, FEATURE_EDGE_DEG);
                        self.mesh_generation = scene.mesh_generation();
                        log::debug!("[gpu] reference outline: {} edges", self.mesh_edges.len());
                    }
                    let verts = geometry::mesh_vertices(node);
                    self.mesh = VertexBuffer::from_slice(&self.device, "reference_mesh", &verts);
                    self.mesh_lines = geometry::mesh_edge_lines(node, &self.mesh_edges);
                }
                None => {
                    self.mesh = None;
                    self.mesh_lines.clear();
                }
            }
        }

        if guides_changed || boxes_changed || mesh_changed {
            let mut lines = Vec::with_capacity(
                self.guide_lines.len() + self.box_lines.len() + self.mesh_lines.len(),
            );
            lines.extend_from_slice(&self.guide_lines);
            lines.extend_from_slice(&self.mesh_lines);
            lines.extend_from_slice(&self.box_lines);
            self.lines = VertexBuffer::from_slice(&self.device, "lines", &lines);
        }
    }

    pub fn render(&mut self, camera: &Camera, background: Rgb) -> Result<(), wgpu::SurfaceError> {
        let globals = Globals {
            view_proj: camera.view_proj().to_cols_array_2d(),
            light_dir: Vec3::from(LIGHT_DIR).normalize().extend(0.0).to_array(),
            ambient: [LIGHT_AMBIENT, LIGHT_DIRECTIONAL, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let clear = geometry::clear_color(background);
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x as f64,
                            g: clear.y as f64,
                            b: clear.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            // Opaque-ish reference first so translucent boxes blend over it
            for (pipeline, buffer) in [
                (&self.mesh_pipeline, &self.mesh),
                (&self.fill_pipeline, &self.fills),
                (&self.line_pipeline, &self.lines),
            ] {
                if let Some(vb) = buffer {
                    rpass.set_pipeline(pipeline);
                    rpass.set_vertex_buffer(0, vb.buffer.slice(..));
                    rpass.draw(0..vb.count, 0..1);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

struct PipelineSpec<'s> {
    label: &'s str,
    vs: &'s str,
    fs: &'s str,
    vertex: wgpu::VertexBufferLayout<'s>,
    topology: wgpu::PrimitiveTopology,
    depth_write: bool,
    format: wgpu::TextureFormat,
}

fn make_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    spec: PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(spec.vs),
            buffers: &[spec.vertex],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: spec.depth_write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(spec.fs),
            targets: &[Some(wgpu::ColorTargetState {
                format: spec.format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}
