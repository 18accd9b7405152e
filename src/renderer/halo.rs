//! Plasma halo renderer: a single world-space quad whose fragment shader
//! paints the turbulent ring. All constants come from [`HaloOptions`]; the
//! only per-frame change is the time scalar.

use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::HaloOptions;
use crate::renderer::{ADDITIVE_BLEND, HDR_FORMAT};

/// Uniform block for the halo shader.
/// Must match the WGSL HaloParams struct layout exactly (112 bytes).
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct HaloParams {
    base_color: [f32; 3],
    time: f32,
    tint_color: [f32; 3],
    center_offset: f32,
    inner_start: f32,
    inner_end: f32,
    outer_base: f32,
    outer_start: f32,
    outer_end: f32,
    turb_gain: f32,
    clamp_min: f32,
    clamp_max: f32,
    turb1: [f32; 3],
    falloff_start: f32,
    turb2: [f32; 3],
    falloff_end: f32,
    color_rate: f32,
    brightness: f32,
    quad_half: [f32; 2],
}

impl HaloParams {
    fn from_options(opts: &HaloOptions) -> Self {
        Self {
            base_color: opts.base_color,
            time: 0.0,
            tint_color: opts.tint_color,
            center_offset: opts.center_offset,
            inner_start: opts.inner_start,
            inner_end: opts.inner_end,
            outer_base: opts.outer_base,
            outer_start: opts.outer_start,
            outer_end: opts.outer_end,
            turb_gain: opts.turb_gain,
            clamp_min: opts.intensity_clamp[0],
            clamp_max: opts.intensity_clamp[1],
            turb1: opts.turb1,
            falloff_start: opts.falloff_start,
            turb2: opts.turb2,
            falloff_end: opts.falloff_end,
            color_rate: opts.color_rate,
            brightness: opts.brightness,
            quad_half: [opts.quad_size[0] * 0.5, opts.quad_size[1] * 0.5],
        }
    }
}

/// Renders the plasma halo quad.
pub struct HaloRenderer {
    pipeline: wgpu::RenderPipeline,
    params: HaloParams,
    params_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl HaloRenderer {
    /// Build the halo pipeline and its uniform from options.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        opts: &HaloOptions,
    ) -> Self {
        let params = HaloParams::from_options(opts);
        let params_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Halo Params Buffer"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Halo Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group = context.device.create_bind_group(
            &wgpu::BindGroupDescriptor {
                label: Some("Halo Bind Group"),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                }],
            },
        );

        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/halo.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Halo Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout, camera_layout],
                immediate_size: 0,
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Halo Pipeline"),
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
            params,
            params_buffer,
            bind_group,
        }
    }

    /// Push the current simulation time to the shader.
    pub fn update(&mut self, queue: &wgpu::Queue, time: f32) {
        self.params.time = time;
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[self.params]),
        );
    }

    /// Record the halo quad draw.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_bind_group(1, camera_bind_group, &[]);
        render_pass.draw(0..6, 0..1);
    }
}
