//! Composite pass — adds the bloom result onto the HDR scene and writes
//! the presented frame.

use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler,
    texture_2d, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;

/// Parameters for the composite pass.
/// Must match the WGSL CompositeParams struct layout exactly.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct CompositeParams {
    bloom_strength: f32,
    gamma: f32,
    _pad: [f32; 2],
}

/// Final scene + bloom combine, targeting the swapchain format.
pub struct CompositePass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    params: CompositeParams,
    params_buffer: wgpu::Buffer,
}

impl CompositePass {
    /// Build the composite pipeline reading the scene and bloom views.
    pub fn new(
        context: &RenderContext,
        scene_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
        bloom_strength: f32,
    ) -> Self {
        let sampler = linear_sampler(&context.device, "Composite Sampler");

        // If the swapchain is sRGB the hardware applies gamma; otherwise
        // encode in the shader
        let gamma = if context.format().is_srgb() {
            1.0
        } else {
            1.0 / 2.2
        };
        let params = CompositeParams {
            bloom_strength,
            gamma,
            _pad: [0.0; 2],
        };
        let params_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Composite Params Buffer"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Composite Layout"),
                entries: &[
                    texture_2d(0),
                    texture_2d(1),
                    filtering_sampler(2),
                    uniform_buffer(3),
                ],
            },
        );

        let bind_group = Self::create_bind_group(
            context,
            &bind_group_layout,
            scene_view,
            bloom_view,
            &sampler,
            &params_buffer,
        );

        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../../assets/shaders/screen/composite.wgsl"
        ));
        let pipeline = create_screen_space_pipeline(
            &context.device,
            "Composite",
            &shader,
            context.format(),
            None,
            &[&bind_group_layout],
        );

        Self {
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            params,
            params_buffer,
        }
    }

    fn create_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        scene_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        params_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Composite Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(scene_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(bloom_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        })
    }

    /// Set the bloom weight applied during the combine.
    pub fn set_bloom_strength(&mut self, queue: &wgpu::Queue, strength: f32) {
        self.params.bloom_strength = strength;
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[self.params]),
        );
    }

    /// Rebind the input views (after a resize recreated them).
    pub fn rebind(
        &mut self,
        context: &RenderContext,
        scene_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
    ) {
        self.bind_group = Self::create_bind_group(
            context,
            &self.bind_group_layout,
            scene_view,
            bloom_view,
            &self.sampler,
            &self.params_buffer,
        );
    }

    /// Record the fullscreen combine into the given output view.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Composite"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
