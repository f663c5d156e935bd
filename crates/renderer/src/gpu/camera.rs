use glam::{Mat4, Vec3};

/// Perspective camera fixed at a constant distance from the surface plane.
///
/// The camera never moves. Resizes adjust the vertical field of view so that
/// one world unit stays one screen pixel along the vertical axis, which keeps
/// the surface at a constant apparent size in any window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCamera {
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    distance: f32,
}

impl SurfaceCamera {
    /// Distance from the camera to the surface plane, in world units.
    pub const DISTANCE: f32 = 10.0;

    /// Creates the camera and applies the initial viewport.
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            fov_y_degrees: 70.0,
            aspect: 1.0,
            near: 0.01,
            far: 1000.0,
            distance: Self::DISTANCE,
        };
        camera.set_viewport(width, height);
        camera
    }

    /// Recomputes fov and aspect for a viewport. Zero-sized viewports (as
    /// minimized windows report) leave the camera untouched.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let h = height as f32;
        self.fov_y_degrees =
            2.0 * (180.0 / std::f32::consts::PI) * (h / (2.0 * self.distance)).atan();
        self.aspect = width as f32 / h;
    }

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Column-major perspective projection for the uniform block.
    pub fn projection_matrix(&self) -> [[f32; 4]; 4] {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
        .to_cols_array_2d()
    }

    /// Column-major model-view; the surface sits at the origin so this is the
    /// plain view transform.
    pub fn model_view_matrix(&self) -> [[f32; 4]; 4] {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, self.distance), Vec3::ZERO, Vec3::Y)
            .to_cols_array_2d()
    }
}
