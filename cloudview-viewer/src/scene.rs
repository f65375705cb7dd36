//! Scene assembly and the default viewpoint

use crate::camera::Camera;
use cloudview_core::{Drawable, Material, SceneMesh};
use nalgebra::{Point3, Vector3};

/// Point size for the point cloud drawable
pub const CLOUD_POINT_SIZE: f32 = 2.0;
/// Line width for camera glyph drawables
pub const GLYPH_LINE_WIDTH: f32 = 2.0;
/// Highlight color for camera glyphs
pub const GLYPH_COLOR: [f32; 3] = [1.0, 1.0, 0.0];

/// All render state for one session: drawables, background and camera.
/// Built once; never mutated after assembly.
#[derive(Debug, Clone)]
pub struct Scene {
    pub drawables: Vec<Drawable>,
    pub background: [f64; 4],
    pub camera: Camera,
}

/// Wrap the point cloud and camera glyph meshes in drawables and place
/// them in a scene over a black background.
///
/// The point cloud keeps its vertex colors, point size 2, lighting on.
/// Each glyph is unlit solid yellow with line width 2.
pub fn assemble_scene(pointcloud_mesh: SceneMesh, camera_meshes: Vec<SceneMesh>) -> Scene {
    let mut drawables = Vec::with_capacity(1 + camera_meshes.len());

    drawables.push(Drawable::new(
        pointcloud_mesh,
        Material {
            color: None,
            point_size: CLOUD_POINT_SIZE,
            lighting: true,
            ..Material::default()
        },
    ));

    for mesh in camera_meshes {
        drawables.push(Drawable::new(
            mesh,
            Material {
                color: Some(GLYPH_COLOR),
                line_width: GLYPH_LINE_WIDTH,
                lighting: false,
                ..Material::default()
            },
        ));
    }

    Scene {
        drawables,
        background: [0.0, 0.0, 0.0, 1.0],
        camera: Camera::default(),
    }
}

/// Set the fixed default viewpoint: position (1, -1, -2), up (0, -1, 0),
/// focal point (0, 0, 2).
///
/// This is deliberately not derived from the data's bounding volume;
/// very large or off-center clouds may start out of frame and need the
/// trackball controls to bring them into view.
pub fn configure_viewpoint(scene: &mut Scene) {
    let aspect_ratio = scene.camera.aspect_ratio;
    scene.camera = Camera::new(
        Point3::new(1.0, -1.0, -2.0),
        Point3::new(0.0, 0.0, 2.0),
        Vector3::new(0.0, -1.0, 0.0),
        std::f32::consts::FRAC_PI_4,
        aspect_ratio,
        0.1,
        100.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudview_core::{
        build_camera_glyph_mesh, build_pointcloud_mesh, Point3f, Pose, UP_TRIANGLE,
    };

    #[test]
    fn test_scene_with_points_and_no_poses() {
        let points = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ];
        let colors = vec![[255, 0, 0], [0, 255, 0], [0, 0, 255]];
        let mesh = build_pointcloud_mesh(&points, Some(&colors)).unwrap();

        let scene = assemble_scene(mesh, Vec::new());
        assert_eq!(scene.drawables.len(), 1);
        assert_eq!(scene.drawables[0].mesh.verts.len(), 3);
        assert_eq!(scene.drawables[0].material.point_size, CLOUD_POINT_SIZE);
        assert!(scene.drawables[0].material.color.is_none());
        assert_eq!(scene.background, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_glyph_drawables_are_unlit_yellow() {
        let cloud = build_pointcloud_mesh(&[Point3f::new(0.0, 0.0, 0.0)], None).unwrap();
        let glyphs = vec![
            build_camera_glyph_mesh(&Pose::identity(), false),
            build_camera_glyph_mesh(&Pose::identity(), false),
        ];

        let scene = assemble_scene(cloud, glyphs);
        assert_eq!(scene.drawables.len(), 3);
        for drawable in &scene.drawables[1..] {
            assert_eq!(drawable.material.color, Some(GLYPH_COLOR));
            assert_eq!(drawable.material.line_width, GLYPH_LINE_WIDTH);
            assert!(!drawable.material.lighting);
            assert!(drawable.mesh.triangles.contains(&UP_TRIANGLE));
        }
    }

    #[test]
    fn test_identity_pose_glyph_apex_at_origin() {
        let cloud = build_pointcloud_mesh(&[Point3f::new(0.0, 0.0, 0.0)], None).unwrap();
        let glyphs = vec![build_camera_glyph_mesh(&Pose::identity(), false)];
        let scene = assemble_scene(cloud, glyphs);
        let apex = scene.drawables[1].mesh.positions[0];
        assert_eq!(apex, Point3f::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_configure_viewpoint_is_fixed() {
        let cloud = build_pointcloud_mesh(&[Point3f::new(100.0, 100.0, 100.0)], None).unwrap();
        let mut scene = assemble_scene(cloud, Vec::new());
        configure_viewpoint(&mut scene);

        // not data dependent: the same viewpoint regardless of the cloud
        assert_eq!(scene.camera.position, Point3::new(1.0, -1.0, -2.0));
        assert_eq!(scene.camera.target, Point3::new(0.0, 0.0, 2.0));
        assert_eq!(scene.camera.up, Vector3::new(0.0, -1.0, 0.0));
    }
}
