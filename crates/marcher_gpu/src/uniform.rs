//! Uniform value model: the closed set of uniform types and the tagged
//! values supplied for them each frame.

use std::fmt;

use glam::{Mat3, Mat4, Vec3};

/// Type tag for a uniform slot.
///
/// This is a closed set: supporting a new uniform type means adding a
/// variant here and an upload arm in [`crate::program::Program::set_uniforms`],
/// and the exhaustive match there makes the compiler point at every site
/// that needs updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Float,
    Vec3,
    Mat3,
    Mat4,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Float => "float",
            TypeTag::Vec3 => "vec3",
            TypeTag::Mat3 => "mat3",
            TypeTag::Mat4 => "mat4",
        };
        f.write_str(name)
    }
}

/// A uniform value with its runtime type tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl UniformValue {
    /// The tag describing which payload this value carries.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            UniformValue::Float(_) => TypeTag::Float,
            UniformValue::Vec3(_) => TypeTag::Vec3,
            UniformValue::Mat3(_) => TypeTag::Mat3,
            UniformValue::Mat4(_) => TypeTag::Mat4,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Mat3> for UniformValue {
    fn from(m: Mat3) -> Self {
        UniformValue::Mat3(m)
    }
}

impl From<Mat4> for UniformValue {
    fn from(m: Mat4) -> Self {
        UniformValue::Mat4(m)
    }
}

/// One named argument of a frame's uniform value set.
///
/// Arguments are transient: built fresh each frame and discarded once the
/// upload call returns.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformArgument {
    pub name: String,
    pub value: UniformValue,
}

impl UniformArgument {
    pub fn new(name: impl Into<String>, value: impl Into<UniformValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
