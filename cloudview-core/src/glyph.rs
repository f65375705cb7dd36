//! Camera frustum glyph geometry
//!
//! A camera pose is drawn as a small pyramid-shaped frustum with two
//! indicator marks: a triangle above the top edge showing the up vector
//! and an arrowhead on the right edge showing the x axis. The geometry is
//! a fixed set of 11 local-frame vertices with two alternative
//! connectivity tables (wireframe or filled faces).

use crate::mesh::SceneMesh;
use crate::pose::Pose;
use crate::Point3f;
use nalgebra::Vector3;

/// Uniform scale applied to the local glyph vertices before placement
pub const GLYPH_SCALE: f32 = 0.05;

// Named indices into GLYPH_VERTICES.
pub const APEX: u32 = 0;
pub const BOTTOM_LEFT: u32 = 1;
pub const BOTTOM_RIGHT: u32 = 2;
pub const TOP_RIGHT: u32 = 3;
pub const TOP_LEFT: u32 = 4;
pub const UP_BASE_LEFT: u32 = 5;
pub const UP_BASE_RIGHT: u32 = 6;
pub const UP_TIP: u32 = 7;
pub const AXIS_BASE_LOWER: u32 = 8;
pub const AXIS_BASE_UPPER: u32 = 9;
pub const AXIS_TIP: u32 = 10;

/// Local-frame glyph vertices: apex at the optical center, the image
/// plane rectangle at z = 1.5, and the two indicator marks in that plane.
pub const GLYPH_VERTICES: [[f32; 3]; 11] = [
    [0.0, 0.0, 0.0],    // APEX
    [-1.0, -1.0, 1.5],  // BOTTOM_LEFT
    [1.0, -1.0, 1.5],   // BOTTOM_RIGHT
    [1.0, 1.0, 1.5],    // TOP_RIGHT
    [-1.0, 1.0, 1.5],   // TOP_LEFT
    [-0.5, 1.0, 1.5],   // UP_BASE_LEFT
    [0.5, 1.0, 1.5],    // UP_BASE_RIGHT
    [0.0, 1.2, 1.5],    // UP_TIP
    [1.0, -0.5, 1.5],   // AXIS_BASE_LOWER
    [1.0, 0.5, 1.5],    // AXIS_BASE_UPPER
    [1.2, 0.0, 1.5],    // AXIS_TIP
];

/// Wireframe connectivity: the image-plane rim, the four side edges
/// through the apex, and the x-axis arrowhead.
pub const WIRE_SEGMENTS: [[u32; 2]; 10] = [
    [BOTTOM_LEFT, BOTTOM_RIGHT],
    [BOTTOM_RIGHT, TOP_RIGHT],
    [TOP_RIGHT, TOP_LEFT],
    [TOP_LEFT, BOTTOM_LEFT],
    [BOTTOM_LEFT, APEX],
    [APEX, BOTTOM_RIGHT],
    [TOP_RIGHT, APEX],
    [APEX, TOP_LEFT],
    [AXIS_BASE_LOWER, AXIS_TIP],
    [AXIS_TIP, AXIS_BASE_UPPER],
];

/// Filled connectivity: the four side faces plus the x-axis arrowhead.
pub const FILL_TRIANGLES: [[u32; 3]; 5] = [
    [APEX, BOTTOM_LEFT, TOP_LEFT],     // left
    [APEX, TOP_RIGHT, BOTTOM_RIGHT],   // right
    [APEX, TOP_LEFT, TOP_RIGHT],       // top
    [APEX, BOTTOM_RIGHT, BOTTOM_LEFT], // bottom
    [AXIS_BASE_LOWER, AXIS_TIP, AXIS_BASE_UPPER],
];

/// Up-vector indicator, present in both modes.
pub const UP_TRIANGLE: [u32; 3] = [UP_BASE_LEFT, UP_BASE_RIGHT, UP_TIP];

/// Build a camera frustum glyph placed by `pose`.
///
/// Each local vertex is scaled by [`GLYPH_SCALE`] and mapped to world
/// space as `(scale * local - t) . R` with `local - t` treated as a row
/// vector, i.e. `R^T * (scale * local - t)` on column vectors. The
/// right-multiplication by `R` (rather than `R^-1 . p + t`) is
/// intentional and pinned by a regression test; do not change it
/// without revisiting the camera convention.
///
/// `filled` selects solid faces instead of wireframe edges; the up
/// indicator triangle is emitted either way.
pub fn build_camera_glyph_mesh(pose: &Pose, filled: bool) -> SceneMesh {
    let positions: Vec<Point3f> = GLYPH_VERTICES
        .iter()
        .map(|v| {
            let local = Vector3::new(v[0], v[1], v[2]);
            let shifted = local * GLYPH_SCALE - pose.translation;
            Point3f::from(pose.rotation.transpose() * shifted)
        })
        .collect();

    let mut mesh = SceneMesh::from_positions(positions);
    if filled {
        mesh.triangles.extend_from_slice(&FILL_TRIANGLES);
    } else {
        mesh.lines.extend_from_slice(&WIRE_SEGMENTS);
    }
    mesh.triangles.push(UP_TRIANGLE);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Matrix4};

    #[test]
    fn test_identity_pose_scales_local_vertices() {
        let mesh = build_camera_glyph_mesh(&Pose::identity(), false);
        assert_eq!(mesh.vertex_count(), 11);
        for (world, local) in mesh.positions.iter().zip(GLYPH_VERTICES.iter()) {
            assert_relative_eq!(world.x, GLYPH_SCALE * local[0]);
            assert_relative_eq!(world.y, GLYPH_SCALE * local[1]);
            assert_relative_eq!(world.z, GLYPH_SCALE * local[2]);
        }
    }

    #[test]
    fn test_identity_pose_maps_apex_to_origin() {
        let pose = Pose::from_matrix(&Matrix4::identity());
        let mesh = build_camera_glyph_mesh(&pose, false);
        let apex = mesh.positions[APEX as usize];
        assert_eq!(apex, Point3f::new(0.0, 0.0, 0.0));
    }

    /// Pins the exact placement formula `(scale * local - t) . R`,
    /// evaluated here with explicit row-vector-times-matrix sums so the
    /// test cannot share an implementation bug with the builder.
    #[test]
    fn test_placement_formula_row_vector_times_rotation() {
        // Rotation about z by 90 degrees plus an arbitrary translation.
        #[rustfmt::skip]
        let rotation = Matrix3::new(
            0.0, -1.0, 0.0,
            1.0,  0.0, 0.0,
            0.0,  0.0, 1.0,
        );
        let translation = Vector3::new(0.1, -0.2, 0.3);
        let pose = Pose::new(rotation, translation);

        let mesh = build_camera_glyph_mesh(&pose, true);
        for (world, local) in mesh.positions.iter().zip(GLYPH_VERTICES.iter()) {
            let row = [
                GLYPH_SCALE * local[0] - translation.x,
                GLYPH_SCALE * local[1] - translation.y,
                GLYPH_SCALE * local[2] - translation.z,
            ];
            for j in 0..3 {
                let expected: f32 =
                    (0..3).map(|i| row[i] * rotation[(i, j)]).sum();
                assert_relative_eq!(world[j], expected, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_up_indicator_present_in_both_modes() {
        let wire = build_camera_glyph_mesh(&Pose::identity(), false);
        let filled = build_camera_glyph_mesh(&Pose::identity(), true);
        assert!(wire.triangles.contains(&UP_TRIANGLE));
        assert!(filled.triangles.contains(&UP_TRIANGLE));
    }

    #[test]
    fn test_wireframe_connectivity() {
        let mesh = build_camera_glyph_mesh(&Pose::identity(), false);
        assert_eq!(mesh.lines.len(), 10);
        assert_eq!(mesh.triangles.len(), 1);
        assert!(mesh.verts.is_empty());
    }

    #[test]
    fn test_filled_connectivity() {
        let mesh = build_camera_glyph_mesh(&Pose::identity(), true);
        assert!(mesh.lines.is_empty());
        // four side faces + axis arrowhead + up indicator
        assert_eq!(mesh.triangles.len(), 6);
    }
}
