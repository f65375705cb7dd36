//! Viewing camera with trackball-style controls

use nalgebra::{Matrix4, Perspective3, Point3, Rotation3, Unit, Vector3};

const ZOOM_STEP: f32 = 1.2;
// Keep the view direction away from the up axis so orbiting never flips
const POLE_LIMIT: f32 = 0.99;

/// A look-at camera for viewing the scene
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    home: (Point3<f32>, Point3<f32>, Vector3<f32>),
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fovy: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fovy,
            aspect_ratio,
            near,
            far,
            home: (position, target, up),
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(self.aspect_ratio, self.fovy, self.near, self.far).into_inner()
    }

    /// Rotate the camera around the target, yaw about the up axis and
    /// pitch about the view-right axis.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let mut offset = self.position - self.target;
        if offset.norm() < 1e-6 {
            return;
        }

        let up = Unit::new_normalize(self.up);
        offset = Rotation3::from_axis_angle(&up, -yaw) * offset;

        let right = offset.cross(&self.up);
        if right.norm() > 1e-6 {
            let right = Unit::new_normalize(right);
            let pitched = Rotation3::from_axis_angle(&right, -pitch) * offset;
            if pitched.normalize().dot(&up).abs() < POLE_LIMIT {
                offset = pitched;
            }
        }

        self.position = self.target + offset;
    }

    /// Translate position and target together in the view plane,
    /// scaled by the distance to the target.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = self.target - self.position;
        let distance = forward.norm();
        if distance < 1e-6 {
            return;
        }
        let forward = forward / distance;
        let right = forward.cross(&self.up).normalize();
        let up = right.cross(&forward);

        let delta = (right * -dx + up * dy) * distance;
        self.position += delta;
        self.target += delta;
    }

    /// Move toward (positive delta) or away from the target, clamped so
    /// the camera never reaches it.
    pub fn zoom(&mut self, delta: f32) {
        let mut offset = self.position - self.target;
        if offset.norm() < 1e-6 {
            return;
        }

        offset *= ZOOM_STEP.powf(-delta);
        let min_distance = (self.near * 2.0).max(1e-3);
        if offset.norm() < min_distance {
            offset = offset.normalize() * min_distance;
        }
        self.position = self.target + offset;
    }

    /// Restore the pose the camera was created with
    pub fn reset(&mut self) {
        let (position, target, up) = self.home;
        self.position = position;
        self.target = target;
        self.up = up;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            0.1,
            100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_camera() -> Camera {
        Camera::new(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_4,
            4.0 / 3.0,
            0.1,
            100.0,
        )
    }

    #[test]
    fn test_orbit_preserves_distance() {
        let mut camera = test_camera();
        let before = (camera.position - camera.target).norm();
        camera.orbit(0.3, 0.2);
        let after = (camera.position - camera.target).norm();
        assert_relative_eq!(before, after, epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_in_shrinks_distance() {
        let mut camera = test_camera();
        camera.zoom(1.0);
        let distance = (camera.position - camera.target).norm();
        assert!(distance < 5.0);
        assert_relative_eq!(distance, 5.0 / 1.2, epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_clamps_to_minimum_distance() {
        let mut camera = test_camera();
        for _ in 0..200 {
            camera.zoom(1.0);
        }
        let distance = (camera.position - camera.target).norm();
        assert!(distance >= camera.near * 2.0 - 1e-6);
    }

    #[test]
    fn test_pan_moves_position_and_target_together() {
        let mut camera = test_camera();
        let offset_before = camera.position - camera.target;
        camera.pan(0.1, -0.2);
        let offset_after = camera.position - camera.target;
        assert_relative_eq!(offset_before.x, offset_after.x, epsilon = 1e-5);
        assert_relative_eq!(offset_before.y, offset_after.y, epsilon = 1e-5);
        assert_relative_eq!(offset_before.z, offset_after.z, epsilon = 1e-5);
        assert!(camera.target != Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_reset_restores_initial_pose() {
        let mut camera = test_camera();
        camera.orbit(0.5, 0.1);
        camera.zoom(2.0);
        camera.pan(0.3, 0.3);
        camera.reset();
        assert_eq!(camera.position, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.target, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(camera.up, Vector3::new(0.0, 1.0, 0.0));
    }
}
