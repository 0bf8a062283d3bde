//! Fullscreen quad geometry for single-pass rendering.

use bytemuck::{Pod, Zeroable};
use glow::HasContext;

use crate::error::{GpuError, Result};

/// One quad vertex: xy is the clip-space position, zw is an auxiliary
/// pair forwarded to the vertex stage.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 4],
}

/// Two clip-space triangles covering the viewport.
const QUAD_VERTICES: [QuadVertex; 6] = [
    QuadVertex { position: [1.0, 1.0, 0.0, 0.0] },
    QuadVertex { position: [1.0, -1.0, 0.0, 0.0] },
    QuadVertex { position: [-1.0, 1.0, 0.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0, 0.0, 1.0] },
    QuadVertex { position: [1.0, -1.0, 0.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0, 0.0, 1.0] },
];

/// Screen quad VAO/VBO pair.
pub struct ScreenQuad {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
}

impl ScreenQuad {
    pub fn new(gl: &glow::Context) -> Result<Self> {
        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(GpuError::CreateObject)?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(GpuError::CreateObject(e));
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_VERTICES),
                glow::STATIC_DRAW,
            );

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                4,
                glow::FLOAT,
                false,
                std::mem::size_of::<QuadVertex>() as i32,
                0,
            );

            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);

            Ok(Self { vao, vbo })
        }
    }

    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLES, 0, 6);
            gl.bind_vertex_array(None);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 16);
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(bytes.len(), 6 * 16);
    }

    #[test]
    fn test_quad_covers_clip_space() {
        for corner in [[-1.0, -1.0], [-1.0, 1.0], [1.0, -1.0], [1.0, 1.0]] {
            assert!(
                QUAD_VERTICES
                    .iter()
                    .any(|v| v.position[0] == corner[0] && v.position[1] == corner[1]),
                "corner {:?} not covered",
                corner
            );
        }
    }
}
