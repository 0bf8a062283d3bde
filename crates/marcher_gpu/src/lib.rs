pub mod config;
pub mod context;
pub mod error;
pub mod program;
pub mod quad;
pub mod schema;
pub mod uniform;

pub use config::GpuConfig;
pub use context::GlContext;
pub use error::{GpuError, Result};
pub use program::{Program, ProgramBuilder, ShaderStage};
pub use quad::ScreenQuad;
pub use schema::{UniformSchema, UniformSlot};
pub use uniform::{TypeTag, UniformArgument, UniformValue};
