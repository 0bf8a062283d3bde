//! Window setup and the render loop.

use std::time::Instant;

use marcher_gpu::{
    GlContext, GpuConfig, GpuError, Program, ProgramBuilder, Result, ScreenQuad,
};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowBuilder};

use crate::config::AppConfig;
use crate::scene::{self, CameraState, FrameParams};

// Field order matters: the GL surface must drop before the window.
struct App {
    ctx: GlContext,
    window: Window,
    program: Program,
    quad: ScreenQuad,
    camera: CameraState,
    started: Instant,
    config: AppConfig,
}

impl App {
    fn render(&mut self) -> Result<()> {
        let size = self.window.inner_size();
        let params = FrameParams::compute(
            size.width,
            size.height,
            self.config.view_plane_xlen,
            self.config.fov_degrees,
            self.started.elapsed().as_secs_f32(),
        );

        self.ctx.begin_frame(size.width, size.height);
        let values = scene::frame_arguments(&self.camera, &params);
        self.program.set_uniforms(self.ctx.gl(), &values)?;
        self.quad.draw(self.ctx.gl());
        self.ctx.swap_buffers()
    }

    fn shutdown(&mut self) {
        self.quad.destroy(self.ctx.gl());
        self.program.destroy(self.ctx.gl());
    }
}

/// Create the window, build the shader program against the scene schema,
/// and run the event loop until close or Escape.
pub fn run(config: AppConfig) -> Result<()> {
    let (vertex_src, fragment_src) = config.load_shader_sources()?;

    let event_loop =
        EventLoop::new().map_err(|e| GpuError::ContextCreation(e.to_string()))?;
    let window_builder = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(LogicalSize::new(config.window_size.0, config.window_size.1));

    let (window, ctx) = GlContext::new(&event_loop, window_builder, GpuConfig::default())?;

    let program = ProgramBuilder::new(&vertex_src, &fragment_src)
        .with_uniforms(scene::SCENE_UNIFORMS)
        .build(ctx.gl())?;
    let quad = ScreenQuad::new(ctx.gl())?;

    let mut app = App {
        ctx,
        window,
        program,
        quad,
        camera: CameraState::default(),
        started: Instant::now(),
        config,
    };

    // A render failure is a programming error in the frame contract;
    // surface it instead of rendering corrupt frames.
    let mut frame_error: Option<GpuError> = None;

    event_loop
        .run(|event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(new_size) => {
                        app.ctx.resize(new_size.width, new_size.height);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state == ElementState::Pressed
                            && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                        {
                            elwt.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(e) = app.render() {
                            frame_error = Some(e);
                            elwt.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => app.window.request_redraw(),
                Event::LoopExiting => app.shutdown(),
                _ => {}
            }
        })
        .map_err(|e| GpuError::ContextCreation(e.to_string()))?;

    match frame_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
