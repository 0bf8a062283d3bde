//! Application configuration.
//!
//! Shader locations are plain fields rather than process-wide constants,
//! so alternate frontends and tests can point the app at other sources.

use std::fs;
use std::path::{Path, PathBuf};

use marcher_gpu::{GpuError, Result};

/// Viewer settings: window shape, shader locations, and the fixed scene
/// framing parameters.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Window title.
    pub window_title: String,
    /// Initial window size (width, height).
    pub window_size: (u32, u32),
    /// Path to the vertex shader source.
    pub vertex_shader: PathBuf,
    /// Path to the fragment shader source.
    pub fragment_shader: PathBuf,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Horizontal extent of the view plane in scene units.
    pub view_plane_xlen: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "SDF Rendering".to_string(),
            window_size: (640, 480),
            vertex_shader: PathBuf::from("assets/shaders/sdf.vert"),
            fragment_shader: PathBuf::from("assets/shaders/sdf.frag"),
            fov_degrees: 90.0,
            view_plane_xlen: -1.0,
        }
    }
}

impl AppConfig {
    /// Read both shader sources from disk.
    pub fn load_shader_sources(&self) -> Result<(String, String)> {
        Ok((
            read_shader(&self.vertex_shader)?,
            read_shader(&self.fragment_shader)?,
        ))
    }
}

fn read_shader(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| GpuError::ShaderSource {
        path: path.to_path_buf(),
        source,
    })
}
