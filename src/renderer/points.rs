//! Particle band renderer.
//!
//! Draws one band as camera-facing quad sprites, one instance per particle.
//! Particle positions live in a storage buffer sized once at creation and
//! rewritten every frame from the CPU simulation; the whole-band roll is a
//! single uniform angle rather than per-particle state.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::BandOptions;
use crate::renderer::{ADDITIVE_BLEND, HDR_FORMAT};

/// Per-band uniform parameters.
/// Must match the WGSL BandParams struct layout exactly.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct BandParams {
    color: [f32; 3],
    point_size: f32,
    roll: f32,
    opacity: f32,
    _pad: [f32; 2],
}

/// Renders a [`crate::sim::ParticleBand`] as additive point sprites.
pub struct PointsRenderer {
    pipeline: wgpu::RenderPipeline,
    position_buffer: wgpu::Buffer,
    params: BandParams,
    params_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_count: u32,
    /// Reused CPU staging for the vec4 position packing.
    staging: Vec<[f32; 4]>,
}

impl PointsRenderer {
    /// Create a renderer for a band of `opts.count` particles.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        opts: &BandOptions,
        label: &str,
    ) -> Self {
        let instance_count = opts.count as u32;

        // Position storage sized once; rewritten in place every frame
        let position_buffer =
            context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("{label} Position Buffer")),
                size: (opts.count.max(1) * std::mem::size_of::<[f32; 4]>())
                    as u64,
                usage: wgpu::BufferUsages::STORAGE
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

        let params = BandParams {
            color: opts.color,
            point_size: opts.point_size,
            roll: 0.0,
            opacity: opts.opacity,
            _pad: [0.0; 2],
        };
        let params_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Params Buffer")),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} Layout")),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage {
                                read_only: true,
                            },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::VERTEX
                            | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            },
        );

        let bind_group = context.device.create_bind_group(
            &wgpu::BindGroupDescriptor {
                label: Some(&format!("{label} Bind Group")),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: position_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: params_buffer.as_entire_binding(),
                    },
                ],
            },
        );

        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/points.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} Pipeline Layout")),
                bind_group_layouts: &[&bind_group_layout, camera_layout],
                immediate_size: 0,
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some(&format!("{label} Pipeline")),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: HDR_FORMAT,
                        blend: Some(ADDITIVE_BLEND),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            },
        );

        Self {
            pipeline,
            position_buffer,
            params,
            params_buffer,
            bind_group,
            instance_count,
            staging: vec![[0.0; 4]; opts.count],
        }
    }

    /// Upload this frame's particle positions and band roll angle.
    pub fn update(
        &mut self,
        queue: &wgpu::Queue,
        positions: &[Vec3],
        roll: f32,
    ) {
        debug_assert_eq!(positions.len(), self.staging.len());
        for (dst, src) in self.staging.iter_mut().zip(positions) {
            *dst = [src.x, src.y, src.z, 1.0];
        }
        queue.write_buffer(
            &self.position_buffer,
            0,
            bytemuck::cast_slice(&self.staging),
        );

        self.params.roll = roll;
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[self.params]),
        );
    }

    /// Record the band's draw: 6 vertices per quad, one quad per particle.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_bind_group(1, camera_bind_group, &[]);
        render_pass.draw(0..6, 0..self.instance_count);
    }
}
