//! Scene renderer: surface, pipelines and per-frame drawing

use crate::device::GpuContext;
use crate::vertex::{expand_drawable, CameraUniform, SceneVertex};
use cloudview_core::{Drawable, Error, Result};
use nalgebra::{Matrix4, Vector3};
use std::sync::Arc;
use winit::window::Window;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub point_size: f32,
    pub background_color: [f64; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            point_size: 2.0,
            background_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Primitive topology of a render batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchTopology {
    Points,
    Lines,
    Triangles,
}

/// A vertex buffer ready to draw with one of the three pipelines
pub struct RenderBatch {
    pub topology: BatchTopology,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

/// Renderer for an immutable scene: three pipelines over one unlit
/// shader, a camera uniform, and a depth buffer.
pub struct SceneRenderer {
    pub gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    point_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    triangle_pipeline: wgpu::RenderPipeline,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    pub config: RenderConfig,
}

impl SceneRenderer {
    /// Create a renderer presenting to `window`
    pub async fn new(window: Arc<Window>, config: RenderConfig) -> Result<Self> {
        let gpu = GpuContext::new().await?;

        let surface = gpu
            .instance
            .create_surface(window.clone())
            .map_err(|e| Error::Gpu(format!("Failed to create surface: {:?}", e)))?;

        let surface_caps = surface.get_capabilities(&gpu.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &surface_config);

        let camera_uniform = CameraUniform {
            view_proj: Matrix4::identity().into(),
            view_pos: [0.0, 0.0, 0.0],
            _padding: 0.0,
        };

        let camera_buffer = gpu.create_buffer_init(
            "Camera Buffer",
            std::slice::from_ref(&camera_uniform),
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let camera_bind_group_layout =
            gpu.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                    label: Some("camera_bind_group_layout"),
                });

        let camera_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let shader = gpu
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Scene Shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
            });

        let pipeline_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[&camera_bind_group_layout],
                push_constant_ranges: &[],
            });

        let make_pipeline = |label: &str, topology: wgpu::PrimitiveTopology| {
            gpu.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(label),
                    layout: Some(&pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: "vs_main",
                        buffers: &[SceneVertex::desc()],
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &shader,
                        entry_point: "fs_main",
                        targets: &[Some(wgpu::ColorTargetState {
                            format: surface_config.format,
                            blend: Some(wgpu::BlendState::REPLACE),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                        compilation_options: wgpu::PipelineCompilationOptions::default(),
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: None,
                        unclipped_depth: false,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        conservative: false,
                    },
                    depth_stencil: Some(wgpu::DepthStencilState {
                        format: wgpu::TextureFormat::Depth32Float,
                        depth_write_enabled: true,
                        depth_compare: wgpu::CompareFunction::Less,
                        stencil: wgpu::StencilState::default(),
                        bias: wgpu::DepthBiasState::default(),
                    }),
                    multisample: wgpu::MultisampleState {
                        count: 1,
                        mask: !0,
                        alpha_to_coverage_enabled: false,
                    },
                    multiview: None,
                })
        };

        let point_pipeline = make_pipeline("Point Pipeline", wgpu::PrimitiveTopology::PointList);
        let line_pipeline = make_pipeline("Line Pipeline", wgpu::PrimitiveTopology::LineList);
        let triangle_pipeline =
            make_pipeline("Triangle Pipeline", wgpu::PrimitiveTopology::TriangleList);

        let depth_view = Self::create_depth_view(&gpu, &surface_config);

        Ok(Self {
            gpu,
            surface,
            surface_config,
            point_pipeline,
            line_pipeline,
            triangle_pipeline,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            depth_view,
            config,
        })
    }

    fn create_depth_view(
        gpu: &GpuContext,
        surface_config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: surface_config.width,
                height: surface_config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Update camera view and projection matrices
    pub fn update_camera(
        &mut self,
        view_matrix: Matrix4<f32>,
        proj_matrix: Matrix4<f32>,
        camera_pos: Vector3<f32>,
    ) {
        let view_proj = proj_matrix * view_matrix;
        self.camera_uniform.view_proj = view_proj.into();
        self.camera_uniform.view_pos = [camera_pos.x, camera_pos.y, camera_pos.z];

        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
    }

    /// Resize the surface and depth buffer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.gpu.device, &self.surface_config);
            self.depth_view = Self::create_depth_view(&self.gpu, &self.surface_config);
        }
    }

    /// Expand a drawable and upload its vertex buffers. Called once per
    /// drawable at session start; the scene is immutable afterwards.
    pub fn upload(&self, drawable: &Drawable) -> Vec<RenderBatch> {
        let expanded = expand_drawable(drawable);
        let mut batches = Vec::new();

        let mut push = |topology: BatchTopology, label: &str, vertices: &[SceneVertex]| {
            if vertices.is_empty() {
                return;
            }
            batches.push(RenderBatch {
                topology,
                vertex_buffer: self.gpu.create_buffer_init(
                    label,
                    vertices,
                    wgpu::BufferUsages::VERTEX,
                ),
                vertex_count: vertices.len() as u32,
            });
        };

        push(BatchTopology::Points, "Point Batch", &expanded.points);
        push(BatchTopology::Lines, "Line Batch", &expanded.lines);
        push(BatchTopology::Triangles, "Triangle Batch", &expanded.triangles);

        batches
    }

    /// Draw all batches into the next surface frame
    pub fn render(&self, batches: &[RenderBatch]) -> Result<()> {
        let output = self
            .surface
            .get_current_texture()
            .map_err(|e| Error::Gpu(format!("Failed to get surface texture: {:?}", e)))?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.config.background_color[0],
                            g: self.config.background_color[1],
                            b: self.config.background_color[2],
                            a: self.config.background_color[3],
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

            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            for batch in batches {
                let pipeline = match batch.topology {
                    BatchTopology::Points => &self.point_pipeline,
                    BatchTopology::Lines => &self.line_pipeline,
                    BatchTopology::Triangles => &self.triangle_pipeline,
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
                render_pass.draw(0..batch.vertex_count, 0..1);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
