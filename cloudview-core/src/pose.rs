//! Camera pose extraction from 4x4 matrices

use nalgebra::{Matrix3, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// A rigid transform describing a camera's placement, decomposed into a
/// 3x3 rotation and a translation vector.
///
/// The rotation is trusted to be orthonormal; callers own that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub rotation: Matrix3<f32>,
    pub translation: Vector3<f32>,
}

impl Pose {
    /// Create a pose from rotation and translation parts
    pub fn new(rotation: Matrix3<f32>, translation: Vector3<f32>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Create an identity pose
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Extract rotation (top-left 3x3) and translation (top of the last
    /// column) from a 4x4 homogeneous matrix.
    pub fn from_matrix(matrix: &Matrix4<f32>) -> Self {
        Self {
            rotation: matrix.fixed_view::<3, 3>(0, 0).into_owned(),
            translation: matrix.fixed_view::<3, 1>(0, 3).into_owned(),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_identity_matrix() {
        let pose = Pose::from_matrix(&Matrix4::identity());
        assert_eq!(pose, Pose::identity());
    }

    #[test]
    fn test_from_matrix_extracts_parts() {
        #[rustfmt::skip]
        let m = Matrix4::new(
            0.0, -1.0, 0.0, 1.0,
            1.0,  0.0, 0.0, 2.0,
            0.0,  0.0, 1.0, 3.0,
            0.0,  0.0, 0.0, 1.0,
        );
        let pose = Pose::from_matrix(&m);
        assert_eq!(pose.translation, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.rotation[(0, 1)], -1.0);
        assert_eq!(pose.rotation[(1, 0)], 1.0);
        assert_eq!(pose.rotation[(2, 2)], 1.0);
    }
}
