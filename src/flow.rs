//! Application event loop.
//!
//! This module drives the scene: it creates the window, runs the async GPU
//! initialization, feeds keyboard input to the camera and renders a frame on
//! every redraw request.
//!
//! # Lifecycle
//!
//! 1. `resumed` creates the window and starts initialization
//!    (blocking on a tokio runtime natively, `spawn_local` on the web)
//! 2. on success the surface is configured and the first redraw requested;
//!    on failure the error is logged, the loop exits and [`run`] returns it
//! 3. keyboard events mutate the camera
//! 4. each `RedrawRequested` renders one frame and requests the next one

use std::sync::Arc;

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    camera::{Camera, CameraController},
    config::SceneConfig,
    context::{Context, ContextError},
    data_structures::forest::Forest,
    render::{FrameTarget, Renderer},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Outcome of one redraw request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// The surface isn't configured yet, e.g. a window minimized at startup.
    Unconfigured,
    /// Acquiring the next surface texture timed out.
    TimedOut,
    /// The window is hidden.
    Occluded,
    /// The surface is outdated or lost and has to be configured again.
    Reconfigure,
    /// Acquiring the surface texture raised a validation error.
    Failed,
}

impl FrameStatus {
    /// Whether the next redraw should be requested right away.
    ///
    /// Everything else waits for a window event (resize, un-occlude) to
    /// restart the loop.
    pub fn requests_next_frame(self) -> bool {
        matches!(self, FrameStatus::Presented | FrameStatus::TimedOut)
    }
}

/// Running scene: GPU context, renderer and the camera it is viewed through.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    renderer: Renderer,
    camera: Camera,
    controller: CameraController,
    clear_colour: wgpu::Color,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: SceneConfig) -> Result<Self, ContextError> {
        let ctx = Context::new(window).await?;
        let forest = Forest::populate(&config.forest, &mut config.rng());
        let renderer = Renderer::new(&ctx.device, ctx.config.format, forest).await?;
        Ok(Self {
            ctx,
            renderer,
            camera: config.camera(),
            controller: CameraController::new(),
            clear_colour: config.clear_colour,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.is_surface_configured = self.ctx.resize(width, height);
        if self.is_surface_configured {
            self.ctx.window.request_redraw();
        }
    }

    fn render(&mut self) -> FrameStatus {
        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return FrameStatus::Unconfigured;
        }

        let (output, suboptimal) = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output) => (output, false),
            wgpu::CurrentSurfaceTexture::Suboptimal(output) => (output, true),
            wgpu::CurrentSurfaceTexture::Timeout => return FrameStatus::TimedOut,
            wgpu::CurrentSurfaceTexture::Occluded => return FrameStatus::Occluded,
            wgpu::CurrentSurfaceTexture::Outdated | wgpu::CurrentSurfaceTexture::Lost => {
                return FrameStatus::Reconfigure;
            }
            wgpu::CurrentSurfaceTexture::Validation => return FrameStatus::Failed,
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(
            &self.ctx.device,
            &self.ctx.queue,
            &self.camera,
            &self.ctx.projection,
            FrameTarget {
                color: &view,
                depth: &self.ctx.depth_texture.view,
                clear_colour: self.clear_colour,
            },
        );

        output.present();
        if suboptimal {
            FrameStatus::Reconfigure
        } else {
            FrameStatus::Presented
        }
    }
}

/// Frame statistics, logged once per second at debug level.
struct FrameStats {
    frames: u32,
    since: Instant,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frames: 0,
            since: Instant::now(),
        }
    }

    fn frame(&mut self) {
        self.frames += 1;
        let elapsed = self.since.elapsed();
        if elapsed >= Duration::from_secs(1) {
            log::debug!(
                "{} frames in {:?} ({:.1} fps)",
                self.frames,
                elapsed,
                self.frames as f64 / elapsed.as_secs_f64()
            );
            self.frames = 0;
            self.since = Instant::now();
        }
    }
}

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(Result<AppState, ContextError>),
}

pub(crate) struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    // Taken when initialization starts.
    config: Option<SceneConfig>,
    state: Option<AppState>,
    error: Option<ContextError>,
    stats: FrameStats,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config: Some(config),
            state: None,
            error: None,
            stats: FrameStats::new(),
        })
    }

    fn on_initialized(
        &mut self,
        event_loop: &ActiveEventLoop,
        result: Result<AppState, ContextError>,
    ) {
        match result {
            Ok(mut state) => {
                log::info!(
                    "Scene ready: {} instances, {} indices per draw",
                    state.renderer.instances().len(),
                    state.renderer.mesh().num_elements
                );
                // the first redraw is requested once the surface is configured
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                self.state = Some(state);
            }
            Err(e) => {
                // natively the error is returned from `run` and reported there
                #[cfg(target_arch = "wasm32")]
                log::error!("Could not initialize the scene: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let config = match self.config.take() {
            Some(config) => config,
            // already initialized (or initializing)
            None => return,
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(config.title.clone());

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let init_future = AppState::new(window, config);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = self.async_runtime.block_on(init_future);
            self.on_initialized(event_loop, result);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = init_future.await;
                assert!(proxy.send_event(FlowEvent::Initialized(result)).is_ok());
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            // This is the message from our wasm `spawn_local`
            FlowEvent::Initialized(result) => self.on_initialized(event_loop, result),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        if state
            .controller
            .handle_window_events(&mut state.camera, &event)
        {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::Occluded(false) => state.ctx.window.request_redraw(),
            WindowEvent::RedrawRequested => {
                let status = state.render();
                match status {
                    FrameStatus::Presented => self.stats.frame(),
                    // Reconfigure the surface if it's lost, outdated or suboptimal
                    FrameStatus::Reconfigure => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    FrameStatus::Failed => log::error!("Unable to acquire the next frame"),
                    FrameStatus::Unconfigured | FrameStatus::TimedOut | FrameStatus::Occluded => {
                        log::debug!("Frame skipped: {:?}", status)
                    }
                }
                if status.requests_next_frame() {
                    state.ctx.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Open a window and render the scene described by `config` until it is closed.
///
/// Initialization errors end the loop and are returned.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;

    let mut app = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
