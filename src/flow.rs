//! Application event loop.
//!
//! # Lifecycle
//!
//! 1. `resumed` creates the window and GPU context, then runs
//!    [`crate::viewer::setup`]. A setup error is stored, the loop exits and
//!    [`run`] returns it.
//! 2. Window events update the camera controller, the pointer, the viewport
//!    and the selection.
//! 3. Every `RedrawRequested` acquires the surface texture, then advances the
//!    active scene, draws it and presents the frame.

use std::{iter, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::Window,
};

use crate::{
    camera::CameraMatrices,
    config::Config,
    context::Context,
    input::key_char,
    pipelines::lighting::LightingPipeline,
    resources::GpuAssets,
    viewer::{Viewer, setup},
};

/// Everything that lives as long as the window.
#[derive(Debug)]
pub struct Session {
    pub(crate) ctx: Context,
    assets: GpuAssets,
    pipeline: LightingPipeline,
    viewer: Viewer<wgpu::ShaderModule>,
    is_surface_configured: bool,
    last_report: Instant,
    frames: u32,
}

impl Session {
    async fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config).await?;
        let mut assets = GpuAssets::new(
            ctx.device.clone(),
            ctx.queue.clone(),
            config.asset_dir.clone(),
        );
        let viewer = setup(
            &mut assets,
            &config.shader_name,
            &config.scenes,
            &config.key_bindings,
        )?
        .with_policy(config.key_policy)
        .with_lighting(config.lighting);
        let mut pipeline =
            LightingPipeline::new(&ctx.device, &ctx.queue, ctx.config.format, &viewer.shader)?;
        pipeline.prepare_scenes(&ctx.device, &assets, &viewer.registry);
        Ok(Self {
            ctx,
            assets,
            pipeline,
            viewer,
            is_surface_configured: false,
            last_report: Instant::now(),
            frames: 0,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.viewer.resized(width, height);
            self.is_surface_configured = true;
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let surface = &self.ctx.surface;
        let output = self
            .viewer
            .advance_frame(|| surface.get_current_texture())?;

        self.ctx.controller.update(&mut self.ctx.camera);
        let camera = CameraMatrices::new(&self.ctx.camera, &self.ctx.projection);

        let mut program = self.pipeline.program(&self.ctx.queue, &self.assets);
        if let Err(e) = self.viewer.draw(&camera, &mut program) {
            log::error!("Frame uniforms rejected: {}", e);
        }

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            program.encode(&mut render_pass);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        self.count_frame();
        Ok(())
    }

    fn count_frame(&mut self) {
        self.frames += 1;
        let elapsed = self.last_report.elapsed();
        if elapsed >= Duration::from_secs(5) {
            log::debug!(
                "{:.1} frames per second",
                self.frames as f64 / elapsed.as_secs_f64()
            );
            self.frames = 0;
            self.last_report = Instant::now();
        }
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: Config,
    session: Option<Session>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> anyhow::Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            config,
            session: None,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        let (width, height) = self.config.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(PhysicalSize::new(width, height));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match self
            .async_runtime
            .block_on(Session::new(window, &self.config))
        {
            Ok(mut session) => {
                let size = session.ctx.window.inner_size();
                session.resize(size.width, size.height);
                session.ctx.window.request_redraw();
                self.session = Some(session);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let session = match &mut self.session {
            Some(session) => session,
            None => return,
        };

        session.ctx.controller.handle_window_events(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => session.resize(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => {
                session.viewer.pointer_moved(position.x, position.y)
            }
            WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() => {
                match &event.logical_key {
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    key => {
                        if let Some(c) = key_char(key) {
                            session.viewer.key_pressed(c);
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                match session.render() {
                    Ok(()) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = session.ctx.window.inner_size();
                        session.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Opens the window and runs the viewer until it is closed.
///
/// Returns the setup error when the shader or every scene failed to load.
pub fn run(config: Config) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e.context("viewer could not start")),
        None => Ok(()),
    }
}
