//! Per-frame scene parameter math.
//!
//! Pure functions mapping window size, camera state, and elapsed time to
//! the uniform values the shaders consume each frame. Kept free of GL so
//! the frame contract is testable.

use glam::{Mat3, Mat4, Vec3};
use marcher_gpu::{TypeTag, UniformArgument};

/// The uniform schema shared by the shader pair, in upload order.
///
/// Kept next to [`frame_arguments`] so schema and packaging stay in sync;
/// the names must match the declarations in the shader sources.
pub const SCENE_UNIFORMS: [(&str, TypeTag); 11] = [
    ("orientationMatrix", TypeTag::Mat3),
    ("transformationMatrix", TypeTag::Mat4),
    ("origin", TypeTag::Vec3),
    ("nx", TypeTag::Float),
    ("ny", TypeTag::Float),
    ("xlen", TypeTag::Float),
    ("ylen", TypeTag::Float),
    ("horizontalPlaneGap", TypeTag::Float),
    ("verticalPlaneGap", TypeTag::Float),
    ("projPlaneDist", TypeTag::Float),
    ("time", TypeTag::Float),
];

/// Spacing between horizontal sampling planes, in scene units.
const HORIZONTAL_PLANE_GAP: f32 = 2.0;

/// Camera placement for the raymarcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub orientation: Mat3,
    pub origin: Vec3,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            orientation: Mat3::IDENTITY,
            origin: Vec3::ZERO,
        }
    }
}

/// View-plane and timing parameters recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub nx: f32,
    pub ny: f32,
    pub xlen: f32,
    pub ylen: f32,
    pub horizontal_plane_gap: f32,
    pub vertical_plane_gap: f32,
    pub proj_plane_dist: f32,
    pub time: f32,
}

impl FrameParams {
    /// Derive the frame parameters from the framebuffer size and elapsed
    /// time. `ylen` follows the aspect ratio so the view plane is not
    /// stretched; the projection-plane distance comes from the field of
    /// view as `1 / tan(fov / 2)`.
    pub fn compute(width: u32, height: u32, xlen: f32, fov_degrees: f32, time: f32) -> Self {
        let nx = width.max(1) as f32;
        let ny = height.max(1) as f32;
        let ylen = xlen * (ny / nx);
        Self {
            nx,
            ny,
            xlen,
            ylen,
            horizontal_plane_gap: HORIZONTAL_PLANE_GAP,
            vertical_plane_gap: -2.0 * ylen,
            proj_plane_dist: 1.0 / (fov_degrees.to_radians() / 2.0).tan(),
            time,
        }
    }
}

/// Scene spin: one radian of rotation about the Y axis per second.
pub fn spin_transform(time: f32) -> Mat4 {
    Mat4::from_rotation_y(time)
}

/// Package camera and frame state into the scene's uniform value set, in
/// schema order.
pub fn frame_arguments(camera: &CameraState, params: &FrameParams) -> Vec<UniformArgument> {
    vec![
        UniformArgument::new("orientationMatrix", camera.orientation),
        UniformArgument::new("transformationMatrix", spin_transform(params.time)),
        UniformArgument::new("origin", camera.origin),
        UniformArgument::new("nx", params.nx),
        UniformArgument::new("ny", params.ny),
        UniformArgument::new("xlen", params.xlen),
        UniformArgument::new("ylen", params.ylen),
        UniformArgument::new("horizontalPlaneGap", params.horizontal_plane_gap),
        UniformArgument::new("verticalPlaneGap", params.vertical_plane_gap),
        UniformArgument::new("projPlaneDist", params.proj_plane_dist),
        UniformArgument::new("time", params.time),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_projection_distance_for_90_degree_fov() {
        let params = FrameParams::compute(640, 480, -1.0, 90.0, 0.0);
        assert!(approx_eq(params.proj_plane_dist, 1.0));
    }

    #[test]
    fn test_narrower_fov_pushes_plane_out() {
        let wide = FrameParams::compute(640, 480, -1.0, 90.0, 0.0);
        let narrow = FrameParams::compute(640, 480, -1.0, 60.0, 0.0);
        assert!(narrow.proj_plane_dist > wide.proj_plane_dist);
    }

    #[test]
    fn test_ylen_follows_aspect_ratio() {
        let params = FrameParams::compute(640, 480, -1.0, 90.0, 0.0);
        assert!(approx_eq(params.ylen, -0.75));
        assert!(approx_eq(params.vertical_plane_gap, 1.5));

        let square = FrameParams::compute(512, 512, -1.0, 90.0, 0.0);
        assert!(approx_eq(square.ylen, square.xlen));
    }

    #[test]
    fn test_zero_size_framebuffer_is_clamped() {
        let params = FrameParams::compute(0, 0, -1.0, 90.0, 0.0);
        assert_eq!(params.nx, 1.0);
        assert_eq!(params.ny, 1.0);
        assert!(params.ylen.is_finite());
    }

    #[test]
    fn test_spin_starts_at_identity() {
        assert_eq!(spin_transform(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn test_spin_preserves_y_axis() {
        let spun = spin_transform(1.2) * glam::Vec4::new(0.0, 1.0, 0.0, 0.0);
        assert!(approx_eq(spun.y, 1.0));
        assert!(approx_eq(spun.x, 0.0));
        assert!(approx_eq(spun.z, 0.0));
    }

    #[test]
    fn test_frame_arguments_match_declared_schema() {
        let params = FrameParams::compute(640, 480, -1.0, 90.0, 1.5);
        let args = frame_arguments(&CameraState::default(), &params);

        assert_eq!(args.len(), SCENE_UNIFORMS.len());
        for (arg, (name, ty)) in args.iter().zip(SCENE_UNIFORMS) {
            assert_eq!(arg.name, name);
            assert_eq!(arg.value.type_tag(), ty);
        }
    }
}
