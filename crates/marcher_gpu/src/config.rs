//! Configuration for GL context creation and per-frame clearing.

/// Configuration for GL context initialization.
#[derive(Debug, Clone)]
pub struct GpuConfig {
    /// OpenGL version to request (major, minor).
    pub gl_version: (u8, u8),
    /// VSync behavior (swap interval 1 when enabled).
    pub vsync: bool,
    /// Depth testing for the render pass.
    pub depth_test: bool,
    /// Route driver debug messages (KHR_debug) into the log facade.
    pub debug_output: bool,
    /// Clear color for the background.
    pub clear_color: [f32; 4],
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            gl_version: (3, 3),
            vsync: true,
            depth_test: true,
            debug_output: cfg!(debug_assertions),
            clear_color: [0.1, 0.1, 0.1, 1.0],
        }
    }
}

impl GpuConfig {
    /// Set the OpenGL version to request.
    pub fn with_gl_version(mut self, major: u8, minor: u8) -> Self {
        self.gl_version = (major, minor);
        self
    }

    /// Enable or disable vsync.
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Enable or disable depth testing.
    pub fn with_depth_test(mut self, depth_test: bool) -> Self {
        self.depth_test = depth_test;
        self
    }

    /// Enable or disable debug-output logging.
    pub fn with_debug_output(mut self, debug_output: bool) -> Self {
        self.debug_output = debug_output;
        self
    }

    /// Set the clear color.
    pub fn with_clear_color(mut self, r: f32, g: f32, b: f32, a: f32) -> Self {
        self.clear_color = [r, g, b, a];
        self
    }
}
