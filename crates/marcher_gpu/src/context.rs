//! Window and OpenGL context creation (glutin + glow).

use std::ffi::CString;
use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use winit::event_loop::EventLoopWindowTarget;
use winit::window::{Window, WindowBuilder};

use crate::config::GpuConfig;
use crate::error::{GpuError, Result};

/// An OpenGL context made current on a window surface, with the loaded
/// GL function pointers.
pub struct GlContext {
    gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    config: GpuConfig,
}

impl GlContext {
    /// Create the window and a current GL context for it.
    pub fn new<T>(
        window_target: &EventLoopWindowTarget<T>,
        window_builder: WindowBuilder,
        config: GpuConfig,
    ) -> Result<(Window, Self)> {
        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(window_target, template, |configs| {
                configs
                    .reduce(|a, b| if a.num_samples() > b.num_samples() { a } else { b })
                    .expect("no GL framebuffer configs available")
            })
            .map_err(|e| GpuError::ContextCreation(e.to_string()))?;

        let window = window
            .ok_or_else(|| GpuError::ContextCreation("display builder created no window".into()))?;

        let raw_window_handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));

        let not_current = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .map_err(|e| GpuError::ContextCreation(e.to_string()))?
        };

        let size = window.inner_size();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(size.width.max(1)).unwrap(),
            NonZeroU32::new(size.height.max(1)).unwrap(),
        );

        let surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .map_err(|e| GpuError::ContextCreation(e.to_string()))?
        };

        let context = not_current
            .make_current(&surface)
            .map_err(|e| GpuError::ContextCreation(e.to_string()))?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::new(1).unwrap())
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval: {e}");
        }

        let mut gl = unsafe {
            glow::Context::from_loader_function(|name| {
                let name = CString::new(name).unwrap();
                gl_display.get_proc_address(&name) as *const _
            })
        };

        unsafe {
            if config.depth_test {
                gl.enable(glow::DEPTH_TEST);
            }
            if config.debug_output && gl.supported_extensions().contains("GL_KHR_debug") {
                gl.enable(glow::DEBUG_OUTPUT);
                gl.debug_message_callback(|source, kind, id, severity, message| {
                    log::debug!(
                        "gl debug [source {source:#x}, type {kind:#x}, id {id}, \
                         severity {severity:#x}]: {message}"
                    );
                });
            }
        }

        log::info!(
            "created OpenGL {}.{} context ({}x{})",
            major,
            minor,
            size.width,
            size.height
        );

        Ok((
            window,
            Self {
                gl,
                surface,
                context,
                config,
            },
        ))
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Resize the window surface after a window resize event.
    pub fn resize(&self, width: u32, height: u32) {
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        self.surface.resize(&self.context, width, height);
    }

    /// Set the viewport and clear color/depth for a new frame.
    pub fn begin_frame(&self, width: u32, height: u32) {
        let [r, g, b, a] = self.config.clear_color;
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    /// Present the frame.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| GpuError::Surface(e.to_string()))
    }
}
