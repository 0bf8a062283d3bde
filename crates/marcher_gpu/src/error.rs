use std::path::PathBuf;

use thiserror::Error;

use crate::program::ShaderStage;
use crate::uniform::TypeTag;

#[derive(Debug, Error)]
pub enum GpuError {
    #[error("failed to read shader source {}: {source}", .path.display())]
    ShaderSource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {log}")]
    Link { log: String },

    #[error("duplicate uniform name in schema: {name}")]
    DuplicateUniformName { name: String },

    #[error(
        "uniform arguments do not match schema (missing: {missing:?}, \
         unexpected: {unexpected:?}, duplicates: {duplicates:?})"
    )]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
        duplicates: Vec<String>,
    },

    #[error("uniform {name} is declared as {expected} but was supplied as {actual}")]
    TypeMismatch {
        name: String,
        expected: TypeTag,
        actual: TypeTag,
    },

    #[error("failed to allocate GL object: {0}")]
    CreateObject(String),

    #[error("failed to initialize window or GL context: {0}")]
    ContextCreation(String),

    #[error("surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, GpuError>;
