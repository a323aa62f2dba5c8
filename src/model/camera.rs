use glam::{Mat4, Vec3};

/// Perspective camera aimed at a fixed look-at target.
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees, kept within [`Self::MIN_FOV_DEG`, `Self::MAX_FOV_DEG`].
    pub fov_deg: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub const MIN_FOV_DEG: f32 = 10.0;
    pub const MAX_FOV_DEG: f32 = 90.0;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 3.0),
            target: Vec3::new(0.0, 0.5, 0.0),
            up: Vec3::Y,
            fov_deg: 45.0,
            aspect: width as f32 / height as f32,
            z_near: 0.1,
            z_far: 100.0,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Distance from the eye to the look-at target.
    pub fn radius(&self) -> f32 {
        (self.eye - self.target).length()
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(
            self.fov_deg.to_radians(),
            self.aspect,
            self.z_near,
            self.z_far,
        );
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_pose_looks_at_target_from_offset() {
        let camera = Camera::new(1280, 720);
        assert_eq!(camera.eye, Vec3::new(0.0, 2.0, 3.0));
        assert_eq!(camera.target, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(camera.fov_deg, 45.0);
        assert!((camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn set_aspect_is_width_over_height() {
        let mut camera = Camera::new(800, 600);
        camera.set_aspect(1920, 1080);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);

        // Independent of where the camera currently sits.
        camera.eye = Vec3::new(3.0, 0.5, -1.0);
        camera.set_aspect(1920, 1080);
        assert!((camera.aspect - 1.7778).abs() < 1e-3);
    }

    #[test]
    fn view_proj_is_finite() {
        let camera = Camera::new(1280, 720);
        for value in camera.view_proj().to_cols_array() {
            assert!(value.is_finite());
        }
    }
}
