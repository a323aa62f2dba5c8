use glam::{IVec2, Quat, Vec3};

use crate::model::Camera;

/// Radians of yaw per pixel of horizontal drag.
pub const YAW_PER_PIXEL: f32 = 0.01;
/// Radians of pitch per pixel of vertical drag.
pub const PITCH_PER_PIXEL: f32 = 0.003;

/// Last observed pointer position and the delta since the previous observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub last: IVec2,
    pub delta: IVec2,
}

/// Orbits the camera around its look-at target.
///
/// Dragging rotates the eye on a sphere of constant radius around the target;
/// the scroll wheel zooms by narrowing the field of view. Plain pointer moves
/// only refresh the delta baseline so a following drag starts from the right
/// reference point.
pub struct OrbitController {
    pub camera: Camera,
    pointer: PointerState,
}

impl OrbitController {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: Camera::new(width, height),
            pointer: PointerState::default(),
        }
    }

    fn track(&mut self, pos: IVec2) -> IVec2 {
        self.pointer.delta = pos - self.pointer.last;
        self.pointer.last = pos;
        self.pointer.delta
    }

    pub fn on_pointer_move(&mut self, pos: IVec2) {
        let _ = self.track(pos);
    }

    pub fn on_pointer_drag(&mut self, pos: IVec2) {
        let delta = self.track(pos);

        // Yaw about world up, then pitch about the derived right axis, both
        // applied to the eye offset so the distance to the target is preserved.
        let mut offset = self.camera.eye - self.camera.target;

        let yaw = Quat::from_axis_angle(Vec3::Y, -(delta.x as f32) * YAW_PER_PIXEL);
        offset = yaw * offset;

        let right = Vec3::Y.cross(offset);
        let right = if right.length_squared() > 1e-12 {
            right.normalize()
        } else {
            // Eye directly above the target; any horizontal axis works.
            Vec3::X
        };
        let pitch = Quat::from_axis_angle(right, -(delta.y as f32) * PITCH_PER_PIXEL);
        offset = pitch * offset;

        self.camera.eye = self.camera.target + offset;
    }

    /// Zoom by narrowing the field of view; saturates at the FOV bounds.
    pub fn on_wheel(&mut self, increment: f32) {
        self.camera.fov_deg = (self.camera.fov_deg - increment)
            .clamp(Camera::MIN_FOV_DEG, Camera::MAX_FOV_DEG);
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn controller() -> OrbitController {
        OrbitController::new(1280, 720)
    }

    #[test]
    fn wheel_zoom_saturates_at_bounds() {
        let mut orbit = controller();
        assert_eq!(orbit.camera.fov_deg, 45.0);

        orbit.on_wheel(5.0);
        assert_eq!(orbit.camera.fov_deg, 40.0);
        orbit.on_wheel(5.0);
        assert_eq!(orbit.camera.fov_deg, 35.0);
        orbit.on_wheel(50.0);
        assert_eq!(orbit.camera.fov_deg, 10.0);

        // Scrolling further past the bound has no effect.
        orbit.on_wheel(10.0);
        assert_eq!(orbit.camera.fov_deg, 10.0);

        // Scrolling the other way widens again, up to the other bound.
        for _ in 0..100 {
            orbit.on_wheel(-3.0);
        }
        assert_eq!(orbit.camera.fov_deg, 90.0);
    }

    #[test]
    fn drag_preserves_distance_to_target() {
        let mut orbit = controller();
        let radius = orbit.camera.radius();

        orbit.on_pointer_move(IVec2::new(100, 100));
        for pos in [
            IVec2::new(140, 90),
            IVec2::new(60, 220),
            IVec2::new(-50, 10),
            IVec2::new(300, 300),
        ] {
            orbit.on_pointer_drag(pos);
            assert!(
                (orbit.camera.radius() - radius).abs() < EPS,
                "radius drifted to {}",
                orbit.camera.radius()
            );
        }
    }

    #[test]
    fn move_then_drag_at_same_position_is_a_no_op() {
        let mut orbit = controller();
        let eye = orbit.camera.eye;

        orbit.on_pointer_move(IVec2::new(42, 17));
        orbit.on_pointer_drag(IVec2::new(42, 17));

        assert!((orbit.camera.eye - eye).length() < EPS);
    }

    #[test]
    fn horizontal_drag_yaws_by_expected_angle() {
        let mut orbit = controller();
        orbit.on_pointer_move(IVec2::ZERO);
        orbit.on_pointer_drag(IVec2::new(100, 0));

        // delta.x = 100 -> rotation of -1.0 rad about world up around the target.
        let expected = orbit.camera.target
            + Quat::from_axis_angle(Vec3::Y, -1.0) * (Vec3::new(0.0, 2.0, 3.0) - orbit.camera.target);
        assert!((orbit.camera.eye - expected).length() < EPS);
    }

    #[test]
    fn vertical_drag_pitches_by_expected_angle() {
        let mut orbit = controller();
        orbit.on_pointer_move(IVec2::ZERO);
        orbit.on_pointer_drag(IVec2::new(0, 100));

        // delta.y = 100 -> rotation of -0.3 rad about the right axis.
        let offset = Vec3::new(0.0, 2.0, 3.0) - orbit.camera.target;
        let right = Vec3::Y.cross(offset).normalize();
        let expected = orbit.camera.target + Quat::from_axis_angle(right, -0.3) * offset;
        assert!((orbit.camera.eye - expected).length() < EPS);
    }

    #[test]
    fn yaw_applies_before_pitch_from_one_delta_sample() {
        let mut orbit = controller();
        orbit.on_pointer_move(IVec2::ZERO);
        orbit.on_pointer_drag(IVec2::new(100, 100));

        let offset = Vec3::new(0.0, 2.0, 3.0) - orbit.camera.target;
        let yawed = Quat::from_axis_angle(Vec3::Y, -1.0) * offset;
        let right = Vec3::Y.cross(yawed).normalize();
        let expected = orbit.camera.target + Quat::from_axis_angle(right, -0.3) * yawed;
        assert!((orbit.camera.eye - expected).length() < EPS);
    }

    #[test]
    fn resize_only_touches_aspect() {
        let mut orbit = controller();
        let eye = orbit.camera.eye;
        let fov = orbit.camera.fov_deg;

        orbit.on_resize(1920, 1080);

        assert!((orbit.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(orbit.camera.eye, eye);
        assert_eq!(orbit.camera.fov_deg, fov);
    }
}
