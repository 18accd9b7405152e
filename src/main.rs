use std::{sync::Arc, time::Instant};

use tachyon::engine::RingEngine;
use tachyon::options::Options;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

struct RenderApp {
    window: Option<Arc<Window>>,
    engine: Option<RingEngine>,
    last_frame_time: Instant,
    options: Options,
}

impl RenderApp {
    fn new(options: Options) -> Self {
        Self {
            window: None,
            engine: None,
            last_frame_time: Instant::now(),
            options,
        }
    }
}

impl ApplicationHandler for RenderApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let monitor = event_loop
                .primary_monitor()
                .or_else(|| event_loop.available_monitors().next());
            let attrs = if let Some(mon) = &monitor {
                let mon_size = mon.size();
                let scale = mon.scale_factor();
                let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
                let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
                Window::default_attributes()
                    .with_title("Tachyon")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        logical_w, logical_h,
                    ))
            } else {
                Window::default_attributes().with_title("Tachyon")
            };
            let window = match event_loop.create_window(attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    log::error!("window creation failed: {e}");
                    event_loop.exit();
                    return;
                }
            };

            let size = window.inner_size();
            let scale = window.scale_factor();

            let engine = match pollster::block_on(RingEngine::new(
                window.clone(),
                (size.width, size.height),
                scale,
                self.options.clone(),
            )) {
                Ok(engine) => engine,
                Err(e) => {
                    log::error!("engine initialization failed: {e}");
                    event_loop.exit();
                    return;
                }
            };

            window.request_redraw();
            self.last_frame_time = Instant::now();
            self.window = Some(window);
            self.engine = Some(engine);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(event_size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(event_size.width, event_size.height);
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    engine.set_scale_factor(scale_factor);
                    let inner = window.inner_size();
                    engine.resize(inner.width, inner.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    let now = Instant::now();
                    let dt =
                        now.duration_since(self.last_frame_time).as_secs_f32();
                    self.last_frame_time = now;
                    engine.update(dt);

                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            let inner = window.inner_size();
                            engine.resize(inner.width, inner.height);
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                    window.request_redraw();
                }
            }

            _ => (),
        }
    }
}

fn main() {
    env_logger::init();

    // Optional preset path; everything has defaults baked in
    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(std::path::Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load preset {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let mut app = RenderApp::new(options);
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("event loop creation failed: {e}");
            std::process::exit(1);
        }
    };

    event_loop.set_control_flow(ControlFlow::Poll);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {e}");
        std::process::exit(1);
    }
}
