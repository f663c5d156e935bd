use bytemuck::{Pod, Zeroable};

use crate::input::GestureSample;
use crate::runtime::TimeSample;

use super::camera::SurfaceCamera;

/// CPU mirror of the `SurfaceParams` uniform block declared by both shader
/// stages in `compile.rs`. Field order and the `align(16)` attribute
/// reproduce the std140 layout: two column-major mat4s followed by four
/// tightly packed floats.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct SurfaceUniforms {
    pub projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub time: f32,
    pub progress: f32,
    pub direction: f32,
    pub debug_uv: f32,
}

unsafe impl Zeroable for SurfaceUniforms {}
unsafe impl Pod for SurfaceUniforms {}

impl SurfaceUniforms {
    pub fn new(camera: &SurfaceCamera, debug_uv: bool) -> Self {
        Self {
            projection: camera.projection_matrix(),
            model_view: camera.model_view_matrix(),
            time: 0.0,
            progress: 0.0,
            direction: 0.0,
            debug_uv: if debug_uv { 1.0 } else { 0.0 },
        }
    }

    /// Refreshes both matrices after a viewport change.
    pub fn set_camera(&mut self, camera: &SurfaceCamera) {
        self.projection = camera.projection_matrix();
        self.model_view = camera.model_view_matrix();
    }

    pub fn set_time(&mut self, sample: TimeSample) {
        self.time = sample.seconds;
    }

    pub fn set_gesture(&mut self, gesture: GestureSample) {
        self.progress = gesture.progress;
        self.direction = gesture.direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_std140_offsets() {
        assert_eq!(std::mem::size_of::<SurfaceUniforms>(), 144);
        assert_eq!(std::mem::align_of::<SurfaceUniforms>(), 16);

        let uniforms = SurfaceUniforms::zeroed();
        let base = &uniforms as *const _ as usize;
        assert_eq!(&uniforms.projection as *const _ as usize - base, 0);
        assert_eq!(&uniforms.model_view as *const _ as usize - base, 64);
        assert_eq!(&uniforms.time as *const _ as usize - base, 128);
        assert_eq!(&uniforms.progress as *const _ as usize - base, 132);
        assert_eq!(&uniforms.direction as *const _ as usize - base, 136);
        assert_eq!(&uniforms.debug_uv as *const _ as usize - base, 140);
    }

    #[test]
    fn fresh_uniforms_describe_a_resting_surface() {
        let camera = SurfaceCamera::new(800, 600);
        let uniforms = SurfaceUniforms::new(&camera, false);
        assert_eq!(uniforms.time, 0.0);
        assert_eq!(uniforms.progress, 0.0);
        assert_eq!(uniforms.direction, 0.0);
        assert_eq!(uniforms.debug_uv, 0.0);
        assert_eq!(uniforms.projection, camera.projection_matrix());
    }

    #[test]
    fn setters_copy_values_straight_through() {
        let camera = SurfaceCamera::new(800, 600);
        let mut uniforms = SurfaceUniforms::new(&camera, true);
        assert_eq!(uniforms.debug_uv, 1.0);

        uniforms.set_time(TimeSample::new(3.25, 7));
        uniforms.set_gesture(GestureSample {
            progress: 0.5,
            direction: 1.0,
        });
        assert_eq!(uniforms.time, 3.25);
        assert_eq!(uniforms.progress, 0.5);
        assert_eq!(uniforms.direction, 1.0);
    }

    #[test]
    fn camera_refresh_tracks_viewport_changes() {
        let mut camera = SurfaceCamera::new(800, 600);
        let mut uniforms = SurfaceUniforms::new(&camera, false);
        let before = uniforms.projection;

        camera.set_viewport(1024, 768);
        uniforms.set_camera(&camera);
        assert_ne!(uniforms.projection, before);
        assert_eq!(uniforms.projection, camera.projection_matrix());
    }
}
