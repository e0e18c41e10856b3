//! Camera pose: yaw/pitch orientation, view and projection matrices, and
//! the uniform the node shader reads.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::CameraUniform;

/// Vertical field of view in radians (75°)
pub const FOV_Y: f32 = 75.0 * std::f32::consts::PI / 180.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

/// Position the session starts from
pub const DEFAULT_START: Vec3 = Vec3::new(0.0, 0.0, 50.0);

/// Camera pose and velocities. Orientation is derived from yaw and pitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub yaw_velocity: f32,
    pub pitch_velocity: f32,
    pub linear_velocity: f32,
}

impl CameraState {
    /// At rest at `position`, looking down -Z
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            linear_velocity: 0.0,
        }
    }

    /// Yaw about world up first, then pitch about the yawed right axis
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    pub fn forward(&self) -> Vec3 {
        (self.orientation() * Vec3::NEG_Z).normalize()
    }

    pub fn right(&self) -> Vec3 {
        (self.orientation() * Vec3::X).normalize()
    }

    pub fn up(&self) -> Vec3 {
        (self.orientation() * Vec3::Y).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    pub fn projection_matrix(aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y, aspect.max(f32::EPSILON), Z_NEAR, Z_FAR)
    }

    pub fn to_uniform(&self, aspect: f32, light_position: Vec3, ambient: f32) -> CameraUniform {
        let view_proj = Self::projection_matrix(aspect) * self.view_matrix();

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            position: self.position.to_array(),
            _pad1: 0.0,
            right: self.right().to_array(),
            _pad2: 0.0,
            up: self.up().to_array(),
            _pad3: 0.0,
            light_position: light_position.to_array(),
            ambient,
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::at(DEFAULT_START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_rest_looks_down_negative_z() {
        let camera = CameraState::default();
        assert!(close(camera.forward(), Vec3::NEG_Z));
        assert!(close(camera.right(), Vec3::X));
        assert!(close(camera.up(), Vec3::Y));
    }

    #[test]
    fn test_positive_yaw_turns_left() {
        let camera = CameraState {
            yaw: FRAC_PI_2,
            ..CameraState::default()
        };
        assert!(close(camera.forward(), Vec3::NEG_X));
    }

    #[test]
    fn test_positive_pitch_looks_up() {
        let camera = CameraState {
            pitch: FRAC_PI_2,
            ..CameraState::default()
        };
        assert!(close(camera.forward(), Vec3::Y));
    }

    #[test]
    fn test_pitch_stays_in_yawed_frame() {
        // Yaw first: pitching after a quarter turn tilts toward -X, not -Z
        let camera = CameraState {
            yaw: FRAC_PI_2,
            pitch: 0.5,
            ..CameraState::default()
        };
        let forward = camera.forward();
        assert!(forward.z.abs() < 1e-5);
        assert!((forward.y - 0.5_f32.sin()).abs() < 1e-5);
        assert!(forward.x < 0.0);

        let pitch_first = Quat::from_rotation_x(0.5) * Quat::from_rotation_y(FRAC_PI_2);
        assert!(!close(pitch_first * Vec3::NEG_Z, forward));
    }

    #[test]
    fn test_view_matrix_maps_position_to_origin() {
        let camera = CameraState {
            position: Vec3::new(3.0, -2.0, 7.0),
            yaw: 1.2,
            pitch: -0.4,
            ..CameraState::default()
        };
        let origin = camera.view_matrix().transform_point3(camera.position);
        assert!(close(origin, Vec3::ZERO));

        let ahead = camera.view_matrix().transform_point3(camera.position + camera.forward());
        assert!(close(ahead, Vec3::NEG_Z));
    }

    #[test]
    fn test_right_cross_up_points_back() {
        // Shader fallback when the camera sits on a node center
        for (yaw, pitch) in [(0.0, 0.0), (1.2, -0.4), (-2.5, 1.3), (3.0, -FRAC_PI_2)] {
            let camera = CameraState {
                yaw,
                pitch,
                ..CameraState::default()
            };
            let back = camera.right().cross(camera.up());
            assert!(close(back, -camera.forward()), "yaw {} pitch {}", yaw, pitch);
        }
    }
}
