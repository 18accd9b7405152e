//! The rendering engine: owns the GPU context, the simulation state, every
//! renderer and post-process pass, and the per-frame orchestration.

use crate::camera::CameraBinding;
use crate::error::TachyonError;
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::renderer::halo::HaloRenderer;
use crate::renderer::points::PointsRenderer;
use crate::renderer::postprocess::bloom::BloomPass;
use crate::renderer::postprocess::composite::CompositePass;
use crate::renderer::HDR_FORMAT;
use crate::sim::RingSim;
use crate::util::frame_timing::FrameTiming;

/// FPS cap for the render loop (present mode already syncs to the display;
/// this just bounds busy redraw requests).
const TARGET_FPS: u32 = 300;

/// Top-level engine for the ring visualization.
pub struct RingEngine {
    /// GPU device, queue, surface.
    pub context: RenderContext,
    /// Fixed perspective camera and its GPU binding.
    pub camera: CameraBinding,
    /// The particle simulation advanced every frame.
    pub sim: RingSim,
    /// Frame pacing and FPS statistics.
    pub frame_timing: FrameTiming,
    /// Active options (counts, colors, post-processing, toggles).
    pub options: Options,

    gold_renderer: PointsRenderer,
    shock_renderer: PointsRenderer,
    halo_renderer: HaloRenderer,
    bloom_pass: BloomPass,
    composite_pass: CompositePass,

    // Intermediate HDR color target the scene layers accumulate into
    scene_color_texture: wgpu::Texture,
    scene_color_view: wgpu::TextureView,
}

impl RingEngine {
    /// Create the engine for the given window surface and options.
    ///
    /// # Errors
    ///
    /// Returns [`TachyonError::Gpu`] if GPU context initialization fails —
    /// a missing adapter or unsupported surface is fatal at this scope.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, TachyonError> {
        let mut context = RenderContext::new(window, size).await?;

        // 2x supersampling on standard-DPI displays to compensate for low
        // pixel density
        if scale_factor < 2.0 {
            context.render_scale = 2;
        }

        let camera = CameraBinding::new(&context, &options.camera);

        let mut rng = rand::rng();
        let sim = RingSim::new(&options, &mut rng);
        log::info!(
            "generated bands: gold {} particles, shock {} particles",
            sim.gold.len(),
            sim.shock.len()
        );

        let gold_renderer = PointsRenderer::new(
            &context,
            &camera.layout,
            &options.gold,
            "Gold Band",
        );
        let shock_renderer = PointsRenderer::new(
            &context,
            &camera.layout,
            &options.shock,
            "Shock Band",
        );
        let halo_renderer =
            HaloRenderer::new(&context, &camera.layout, &options.halo);

        let (scene_color_texture, scene_color_view) =
            Self::create_scene_color(&context);

        let bloom_pass = BloomPass::new(
            &context,
            &scene_color_view,
            options.post_processing.bloom_threshold,
            // The radius option scales the blur kernel on top of its
            // native one-texel step
            1.0 + options.post_processing.bloom_radius,
        );
        let composite_pass = CompositePass::new(
            &context,
            &scene_color_view,
            bloom_pass.output_view(),
            options.post_processing.bloom_strength,
        );

        let frame_timing = FrameTiming::new(TARGET_FPS);

        Ok(Self {
            context,
            camera,
            sim,
            frame_timing,
            options,
            gold_renderer,
            shock_renderer,
            halo_renderer,
            bloom_pass,
            composite_pass,
            scene_color_texture,
            scene_color_view,
        })
    }

    fn create_scene_color(
        context: &RenderContext,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Color Texture"),
            size: wgpu::Extent3d {
                width: context.render_width().max(1),
                height: context.render_height().max(1),
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

    /// Advance the simulation by `dt` seconds and upload this frame's
    /// particle positions and uniforms.
    pub fn update(&mut self, dt: f32) {
        self.sim.step(dt);

        self.camera.update_gpu(&self.context.queue);

        if self.options.display.show_gold_band {
            self.gold_renderer.update(
                &self.context.queue,
                self.sim.gold.positions(),
                self.sim.gold_roll,
            );
        }
        // The shock band is simulated regardless, but only uploaded when
        // it will actually be drawn
        if self.options.display.show_shock_band {
            self.shock_renderer.update(
                &self.context.queue,
                self.sim.shock.positions(),
                self.sim.shock_roll,
            );
        }
        if self.options.display.show_halo {
            self.halo_renderer.update(&self.context.queue, self.sim.time);
        }
    }

    /// Render one frame: scene layers into the HDR target, bloom, then the
    /// composite to the swapchain.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain texture cannot be
    /// acquired; `Lost`/`Outdated` are recoverable via [`Self::resize`].
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        // Scene pass — all layers accumulate additively, no depth
        {
            let mut rp =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("scene pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &self.scene_color_view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

            if self.options.display.show_gold_band {
                self.gold_renderer.draw(&mut rp, &self.camera.bind_group);
            }
            if self.options.display.show_halo {
                self.halo_renderer.draw(&mut rp, &self.camera.bind_group);
            }
            if self.options.display.show_shock_band {
                self.shock_renderer.draw(&mut rp, &self.camera.bind_group);
            }
        }

        // Bloom pass — extract bright pixels and blur for the glow
        self.bloom_pass.render(&mut encoder);

        // Composite pass — scene + bloom to the swapchain
        self.composite_pass.render(&mut encoder, &view);

        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();

        Ok(())
    }

    /// Handle a window resize: reconfigure the surface, update the camera
    /// aspect ratio, and recreate all resolution-dependent textures.
    /// Invoking this repeatedly with the same dimensions is harmless.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.camera.resize(width, height);

            let (scene_color_texture, scene_color_view) =
                Self::create_scene_color(&self.context);
            self.scene_color_texture = scene_color_texture;
            self.scene_color_view = scene_color_view;

            self.bloom_pass.resize(&self.context, &self.scene_color_view);
            self.composite_pass.rebind(
                &self.context,
                &self.scene_color_view,
                self.bloom_pass.output_view(),
            );
        }
    }

    /// Adjust supersampling when the window moves between displays with
    /// different pixel densities.
    pub fn set_scale_factor(&mut self, scale: f64) {
        self.context.render_scale = if scale < 2.0 { 2 } else { 1 };
    }
}
