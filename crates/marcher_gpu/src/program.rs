//! Shader program build and per-frame uniform dispatch.

use std::fmt;

use glow::HasContext;

use crate::error::{GpuError, Result};
use crate::schema::UniformSchema;
use crate::uniform::{TypeTag, UniformArgument, UniformValue};

/// Shader stage, reported in compile errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Builder for a [`Program`] and its uniform schema.
///
/// Takes shader source text rather than paths; file loading belongs to
/// the caller, which keeps the builder usable with in-memory sources.
///
/// # Example
/// ```ignore
/// let program = ProgramBuilder::new(&vertex_src, &fragment_src)
///     .with_uniform("time", TypeTag::Float)
///     .with_uniform("origin", TypeTag::Vec3)
///     .build(ctx.gl())?;
/// ```
pub struct ProgramBuilder<'a> {
    vertex_source: &'a str,
    fragment_source: &'a str,
    declared: Vec<(&'a str, TypeTag)>,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vertex_source: &'a str, fragment_source: &'a str) -> Self {
        Self {
            vertex_source,
            fragment_source,
            declared: Vec::new(),
        }
    }

    /// Declare a uniform slot. Declaration order is upload order.
    pub fn with_uniform(mut self, name: &'a str, ty: TypeTag) -> Self {
        self.declared.push((name, ty));
        self
    }

    /// Declare several uniform slots at once, in order.
    pub fn with_uniforms(mut self, slots: impl IntoIterator<Item = (&'a str, TypeTag)>) -> Self {
        self.declared.extend(slots);
        self
    }

    /// Compile, link, and resolve every declared slot's location.
    ///
    /// Any GL objects created before a failure are released before the
    /// error propagates.
    pub fn build(self, gl: &glow::Context) -> Result<Program> {
        // Schema construction is pure; reject duplicate declarations
        // before touching the GPU.
        let mut schema = UniformSchema::from_declared(&self.declared)?;

        let program = unsafe {
            let program = gl.create_program().map_err(GpuError::CreateObject)?;

            let mut shaders = Vec::with_capacity(2);
            for (stage, source) in [
                (ShaderStage::Vertex, self.vertex_source),
                (ShaderStage::Fragment, self.fragment_source),
            ] {
                match compile_stage(gl, stage, source) {
                    Ok(shader) => {
                        gl.attach_shader(program, shader);
                        shaders.push(shader);
                    }
                    Err(err) => {
                        for &shader in &shaders {
                            gl.delete_shader(shader);
                        }
                        gl.delete_program(program);
                        return Err(err);
                    }
                }
            }

            gl.link_program(program);
            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                for &shader in &shaders {
                    gl.delete_shader(shader);
                }
                gl.delete_program(program);
                return Err(GpuError::Link { log });
            }

            // The stage objects are no longer needed once linked.
            for &shader in &shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            program
        };

        schema.resolve_locations(gl, program);
        log::debug!(
            "linked shader program with {} uniform slots ({} resolved)",
            schema.len(),
            schema.slots().filter(|slot| slot.is_resolved()).count()
        );

        Ok(Program { program, schema })
    }
}

fn compile_stage(gl: &glow::Context, stage: ShaderStage, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_enum())
            .map_err(GpuError::CreateObject)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(GpuError::ShaderCompile { stage, log });
        }
        Ok(shader)
    }
}

/// A linked shader program together with its uniform schema.
///
/// Owns the GL program handle exclusively; release it with
/// [`Program::destroy`] on shutdown.
pub struct Program {
    program: glow::Program,
    schema: UniformSchema,
}

impl Program {
    pub fn schema(&self) -> &UniformSchema {
        &self.schema
    }

    /// Upload a frame's uniform values.
    ///
    /// The argument set must match the schema exactly (see
    /// [`UniformSchema::match_arguments`]); validation completes before
    /// the first upload, so a failing call leaves uniform state untouched.
    /// Uploads happen in schema-declaration order.
    pub fn set_uniforms(&self, gl: &glow::Context, values: &[UniformArgument]) -> Result<()> {
        let plan = self.schema.upload_plan(values)?;
        unsafe {
            gl.use_program(Some(self.program));
            for (location, value) in plan {
                match value {
                    UniformValue::Float(v) => gl.uniform_1_f32(Some(&location), *v),
                    UniformValue::Vec3(v) => gl.uniform_3_f32(Some(&location), v.x, v.y, v.z),
                    UniformValue::Mat3(m) => {
                        gl.uniform_matrix_3_f32_slice(Some(&location), false, &m.to_cols_array())
                    }
                    UniformValue::Mat4(m) => {
                        gl.uniform_matrix_4_f32_slice(Some(&location), false, &m.to_cols_array())
                    }
                }
            }
        }
        Ok(())
    }

    /// Bind the program for the next draw call.
    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Release the GL program handle.
    pub fn destroy(&self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.program) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn test_builder_rejects_duplicate_declarations() {
        // Schema validation runs before any GL call, so a duplicate name
        // must surface from the declaration list alone.
        let declared = [("time", TypeTag::Float), ("time", TypeTag::Float)];
        let schema = UniformSchema::from_declared(&declared);
        assert!(matches!(
            schema,
            Err(GpuError::DuplicateUniformName { .. })
        ));
    }
}
