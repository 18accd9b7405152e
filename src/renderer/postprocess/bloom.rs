//! Bloom post-processing pass — extracts bright pixels and creates a soft
//! glow.
//!
//! Pipeline: threshold extraction → downsample chain (4 levels) with
//! separable Gaussian blur at each level → upsample + accumulate back into
//! the first level. The composite pass adds the result to the scene.

use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler,
    texture_2d, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;
use crate::renderer::HDR_FORMAT;

/// Blur direction params — must match the WGSL BlurParams struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct BlurParams {
    texel_size: [f32; 2],
    horizontal: u32,
    radius: f32,
}

/// Number of downsample levels in the bloom chain.
const MIP_LEVELS: usize = 4;

/// Multi-scale bloom over a mip chain of half, quarter, eighth, and
/// sixteenth resolution targets.
pub struct BloomPass {
    // Threshold extraction
    threshold_pipeline: wgpu::RenderPipeline,
    threshold_bind_group_layout: wgpu::BindGroupLayout,
    threshold_bind_group: wgpu::BindGroup,
    threshold_buffer: wgpu::Buffer,

    // Blur (separable Gaussian, reused for H and V at each mip)
    blur_pipeline: wgpu::RenderPipeline,
    blur_bind_group_layout: wgpu::BindGroupLayout,

    // Downsample blit (passthrough, replace) and upsample (additive)
    blit_pipeline: wgpu::RenderPipeline,
    upsample_pipeline: wgpu::RenderPipeline,
    sample_bind_group_layout: wgpu::BindGroupLayout,

    // Mip chain textures (half-res, quarter-res, etc.)
    mip_textures: Vec<wgpu::Texture>,
    mip_views: Vec<wgpu::TextureView>,
    // Ping-pong textures for H/V blur at each mip level
    ping_textures: Vec<wgpu::Texture>,
    ping_views: Vec<wgpu::TextureView>,

    // Blur bind groups: [level][0=horizontal, 1=vertical]
    blur_bind_groups: Vec<[wgpu::BindGroup; 2]>,
    blur_params_buffers: Vec<[wgpu::Buffer; 2]>,
    // Downsample bind groups: level i reads mip[i-1]
    downsample_bind_groups: Vec<wgpu::BindGroup>,
    // Upsample bind groups: level i reads mip[i]
    upsample_bind_groups: Vec<wgpu::BindGroup>,

    sampler: wgpu::Sampler,

    /// Luminance threshold for the bright pass.
    pub threshold: f32,
    /// Blur kernel scale in texels.
    pub radius: f32,
    width: u32,
    height: u32,
}

impl BloomPass {
    /// Build the bloom chain reading from the given HDR scene view.
    pub fn new(
        context: &RenderContext,
        color_view: &wgpu::TextureView,
        threshold: f32,
        radius: f32,
    ) -> Self {
        let width = context.render_width();
        let height = context.render_height();

        let sampler = linear_sampler(&context.device, "Bloom Sampler");

        let threshold_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Bloom Threshold Buffer"),
                contents: bytemuck::cast_slice(&[threshold]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let (mip_textures, mip_views) =
            Self::create_mip_chain(context, width, height);
        let (ping_textures, ping_views) =
            Self::create_mip_chain(context, width, height);

        // --- Threshold pipeline ---
        let threshold_bind_group_layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Threshold Layout"),
                entries: &[
                    texture_2d(0),
                    filtering_sampler(1),
                    uniform_buffer(2),
                ],
            });

        let threshold_bind_group = Self::create_threshold_bind_group(
            context,
            &threshold_bind_group_layout,
            color_view,
            &sampler,
            &threshold_buffer,
        );

        let threshold_shader = context.device.create_shader_module(
            wgpu::include_wgsl!(
                "../../../assets/shaders/screen/bloom_threshold.wgsl"
            ),
        );
        let threshold_pipeline = create_screen_space_pipeline(
            &context.device,
            "Bloom Threshold",
            &threshold_shader,
            HDR_FORMAT,
            None,
            &[&threshold_bind_group_layout],
        );

        // --- Blur pipeline ---
        let blur_bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Blur Layout"),
                entries: &[
                    texture_2d(0),
                    filtering_sampler(1),
                    uniform_buffer(2),
                ],
            },
        );

        let blur_shader =
            context.device.create_shader_module(wgpu::include_wgsl!(
                "../../../assets/shaders/screen/bloom_blur.wgsl"
            ));
        let blur_pipeline = create_screen_space_pipeline(
            &context.device,
            "Bloom Blur",
            &blur_shader,
            HDR_FORMAT,
            None,
            &[&blur_bind_group_layout],
        );

        // --- Downsample blit and upsample pipelines (same passthrough
        // shader; the upsample adds, the blit replaces) ---
        let sample_bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Sample Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            },
        );

        let sample_shader =
            context.device.create_shader_module(wgpu::include_wgsl!(
                "../../../assets/shaders/screen/bloom_upsample.wgsl"
            ));
        let blit_pipeline = create_screen_space_pipeline(
            &context.device,
            "Bloom Downsample",
            &sample_shader,
            HDR_FORMAT,
            None,
            &[&sample_bind_group_layout],
        );
        let upsample_pipeline = create_screen_space_pipeline(
            &context.device,
            "Bloom Upsample",
            &sample_shader,
            HDR_FORMAT,
            Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent::OVER,
            }),
            &[&sample_bind_group_layout],
        );

        let (blur_bind_groups, blur_params_buffers) =
            Self::create_blur_resources(
                context,
                &blur_bind_group_layout,
                &mip_views,
                &ping_views,
                &sampler,
                width,
                height,
                radius,
            );

        let downsample_bind_groups = Self::create_sample_bind_groups(
            context,
            &sample_bind_group_layout,
            &mip_views,
            &sampler,
            "Downsample",
            // Level i downsamples from mip[i-1]
            |i| i - 1,
        );
        let upsample_bind_groups = Self::create_sample_bind_groups(
            context,
            &sample_bind_group_layout,
            &mip_views,
            &sampler,
            "Upsample",
            // Level i accumulates from mip[i] into mip[i-1]
            |i| i,
        );

        Self {
            threshold_pipeline,
            threshold_bind_group_layout,
            threshold_bind_group,
            threshold_buffer,
            blur_pipeline,
            blur_bind_group_layout,
            blit_pipeline,
            upsample_pipeline,
            sample_bind_group_layout,
            mip_textures,
            mip_views,
            ping_textures,
            ping_views,
            blur_bind_groups,
            blur_params_buffers,
            downsample_bind_groups,
            upsample_bind_groups,
            sampler,
            threshold,
            radius,
            width,
            height,
        }
    }

    fn create_texture(
        context: &RenderContext,
        width: u32,
        height: u32,
        label: &str,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: HDR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&Default::default());
        (texture, view)
    }

    fn create_mip_chain(
        context: &RenderContext,
        width: u32,
        height: u32,
    ) -> (Vec<wgpu::Texture>, Vec<wgpu::TextureView>) {
        let mut textures = Vec::with_capacity(MIP_LEVELS);
        let mut views = Vec::with_capacity(MIP_LEVELS);

        let mut w = width;
        let mut h = height;
        for i in 0..MIP_LEVELS {
            w = (w / 2).max(1);
            h = (h / 2).max(1);
            let (tex, view) =
                Self::create_texture(context, w, h, &format!("Bloom Mip {i}"));
            textures.push(tex);
            views.push(view);
        }

        (textures, views)
    }

    fn create_threshold_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        color_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        threshold_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Bloom Threshold Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: threshold_buffer.as_entire_binding(),
                },
            ],
        })
    }

    fn create_blur_resources(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        mip_views: &[wgpu::TextureView],
        ping_views: &[wgpu::TextureView],
        sampler: &wgpu::Sampler,
        width: u32,
        height: u32,
        radius: f32,
    ) -> (Vec<[wgpu::BindGroup; 2]>, Vec<[wgpu::Buffer; 2]>) {
        let mut bind_groups = Vec::with_capacity(MIP_LEVELS);
        let mut buffers = Vec::with_capacity(MIP_LEVELS);

        let mut w = width;
        let mut h = height;
        for i in 0..MIP_LEVELS {
            w = (w / 2).max(1);
            h = (h / 2).max(1);

            let texel_size = [1.0 / w as f32, 1.0 / h as f32];

            // Horizontal: read from mip[i], write to ping[i]
            let h_params = BlurParams {
                texel_size,
                horizontal: 1,
                radius,
            };
            let h_buffer = context.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("Bloom Blur H Params {i}")),
                    contents: bytemuck::cast_slice(&[h_params]),
                    usage: wgpu::BufferUsages::UNIFORM,
                },
            );
            let h_bg = Self::create_blur_bind_group(
                context,
                layout,
                &mip_views[i],
                sampler,
                &h_buffer,
                &format!("Bloom Blur H BG {i}"),
            );

            // Vertical: read from ping[i], write back to mip[i]
            let v_params = BlurParams {
                texel_size,
                horizontal: 0,
                radius,
            };
            let v_buffer = context.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("Bloom Blur V Params {i}")),
                    contents: bytemuck::cast_slice(&[v_params]),
                    usage: wgpu::BufferUsages::UNIFORM,
                },
            );
            let v_bg = Self::create_blur_bind_group(
                context,
                layout,
                &ping_views[i],
                sampler,
                &v_buffer,
                &format!("Bloom Blur V BG {i}"),
            );

            bind_groups.push([h_bg, v_bg]);
            buffers.push([h_buffer, v_buffer]);
        }

        (bind_groups, buffers)
    }

    fn create_blur_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        input: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        params: &wgpu::Buffer,
        label: &str,
    ) -> wgpu::BindGroup {
        context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(input),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params.as_entire_binding(),
                },
            ],
        })
    }

    /// Bind groups for the blit/upsample passes over levels 1..MIP_LEVELS;
    /// `source` maps the pass level to the mip it samples.
    fn create_sample_bind_groups(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        mip_views: &[wgpu::TextureView],
        sampler: &wgpu::Sampler,
        label: &str,
        source: impl Fn(usize) -> usize,
    ) -> Vec<wgpu::BindGroup> {
        let mut bind_groups = Vec::with_capacity(MIP_LEVELS - 1);
        for i in 1..MIP_LEVELS {
            let bg = context.device.create_bind_group(
                &wgpu::BindGroupDescriptor {
                    label: Some(&format!("Bloom {label} BG {i}")),
                    layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(
                                &mip_views[source(i)],
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(sampler),
                        },
                    ],
                },
            );
            bind_groups.push(bg);
        }
        bind_groups
    }

    fn fullscreen_pass<'a>(
        encoder: &'a mut wgpu::CommandEncoder,
        label: &str,
        target: &wgpu::TextureView,
        load: wgpu::LoadOp<wgpu::Color>,
    ) -> wgpu::RenderPass<'a> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        })
    }

    /// Render the bloom pass: threshold → downsample+blur → upsample +
    /// accumulate.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder) {
        // Step 1: Threshold extraction → mip[0] (half-res)
        {
            let mut pass = Self::fullscreen_pass(
                encoder,
                "Bloom Threshold",
                &self.mip_views[0],
                wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            );
            pass.set_pipeline(&self.threshold_pipeline);
            pass.set_bind_group(0, &self.threshold_bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        // Step 2: Blur mip[0], then walk down the chain — blit mip[i-1]
        // into mip[i] (bilinear downsample) and blur in place
        self.blur_level(encoder, 0);
        for i in 1..MIP_LEVELS {
            {
                let mut pass = Self::fullscreen_pass(
                    encoder,
                    "Bloom Downsample",
                    &self.mip_views[i],
                    wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                );
                pass.set_pipeline(&self.blit_pipeline);
                pass.set_bind_group(
                    0,
                    &self.downsample_bind_groups[i - 1],
                    &[],
                );
                pass.draw(0..3, 0..1);
            }
            self.blur_level(encoder, i);
        }

        // Step 3: Accumulate the coarse levels back up into mip[0]
        for i in (1..MIP_LEVELS).rev() {
            let mut pass = Self::fullscreen_pass(
                encoder,
                "Bloom Upsample",
                &self.mip_views[i - 1],
                wgpu::LoadOp::Load,
            );
            pass.set_pipeline(&self.upsample_pipeline);
            pass.set_bind_group(0, &self.upsample_bind_groups[i - 1], &[]);
            pass.draw(0..3, 0..1);
        }
    }

    /// Separable Gaussian blur at a given mip level (in-place via
    /// ping-pong).
    fn blur_level(&self, encoder: &mut wgpu::CommandEncoder, level: usize) {
        // Horizontal: mip[level] → ping[level]
        {
            let mut pass = Self::fullscreen_pass(
                encoder,
                "Bloom Blur H",
                &self.ping_views[level],
                wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            );
            pass.set_pipeline(&self.blur_pipeline);
            pass.set_bind_group(0, &self.blur_bind_groups[level][0], &[]);
            pass.draw(0..3, 0..1);
        }

        // Vertical: ping[level] → mip[level]
        {
            let mut pass = Self::fullscreen_pass(
                encoder,
                "Bloom Blur V",
                &self.mip_views[level],
                wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            );
            pass.set_pipeline(&self.blur_pipeline);
            pass.set_bind_group(0, &self.blur_bind_groups[level][1], &[]);
            pass.draw(0..3, 0..1);
        }
    }

    /// The accumulated bloom output for the composite pass to sample.
    pub fn output_view(&self) -> &wgpu::TextureView {
        &self.mip_views[0]
    }

    /// Update the threshold value on the GPU.
    pub fn update_params(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.threshold_buffer,
            0,
            bytemuck::cast_slice(&[self.threshold]),
        );
    }

    /// Recreate all resolution-dependent resources after a window resize.
    /// A resize to the current dimensions is a no-op, so the handler can be
    /// invoked any number of times.
    pub fn resize(
        &mut self,
        context: &RenderContext,
        color_view: &wgpu::TextureView,
    ) {
        let width = context.render_width();
        let height = context.render_height();
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;

        let (mip_textures, mip_views) =
            Self::create_mip_chain(context, width, height);
        let (ping_textures, ping_views) =
            Self::create_mip_chain(context, width, height);

        self.threshold_bind_group = Self::create_threshold_bind_group(
            context,
            &self.threshold_bind_group_layout,
            color_view,
            &self.sampler,
            &self.threshold_buffer,
        );

        let (blur_bind_groups, blur_params_buffers) =
            Self::create_blur_resources(
                context,
                &self.blur_bind_group_layout,
                &mip_views,
                &ping_views,
                &self.sampler,
                width,
                height,
                self.radius,
            );

        self.downsample_bind_groups = Self::create_sample_bind_groups(
            context,
            &self.sample_bind_group_layout,
            &mip_views,
            &self.sampler,
            "Downsample",
            |i| i - 1,
        );
        self.upsample_bind_groups = Self::create_sample_bind_groups(
            context,
            &self.sample_bind_group_layout,
            &mip_views,
            &self.sampler,
            "Upsample",
            |i| i,
        );

        self.mip_textures = mip_textures;
        self.mip_views = mip_views;
        self.ping_textures = ping_textures;
        self.ping_views = ping_views;
        self.blur_bind_groups = blur_bind_groups;
        self.blur_params_buffers = blur_params_buffers;
    }
}
