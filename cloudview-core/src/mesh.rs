//! Scene mesh data structures and the point cloud builder

use crate::error::{Error, Result};
use crate::Point3f;
use serde::{Deserialize, Serialize};

/// A mesh holding vertex positions, optional per-vertex colors, and
/// point/line/triangle connectivity.
///
/// Cell lists index into `positions`. A point cloud uses `verts`, a
/// wireframe uses `lines`, a filled surface uses `triangles`; a single
/// mesh may carry any combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMesh {
    pub positions: Vec<Point3f>,
    pub colors: Option<Vec<[u8; 3]>>,
    pub verts: Vec<u32>,
    pub lines: Vec<[u32; 2]>,
    pub triangles: Vec<[u32; 3]>,
}

impl SceneMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            colors: None,
            verts: Vec::new(),
            lines: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create a mesh from positions only, with no connectivity
    pub fn from_positions(positions: Vec<Point3f>) -> Self {
        Self {
            positions,
            colors: None,
            verts: Vec::new(),
            lines: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Get the number of vertex positions
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Check if the mesh has no renderable cells
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty() && self.lines.is_empty() && self.triangles.is_empty()
    }
}

impl Default for SceneMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a point cloud mesh with one vertex cell per input point.
///
/// If `colors` is given it must have exactly one RGB triple per point;
/// a length mismatch is rejected instead of truncating.
pub fn build_pointcloud_mesh(
    points: &[Point3f],
    colors: Option<&[[u8; 3]]>,
) -> Result<SceneMesh> {
    if let Some(colors) = colors {
        if colors.len() != points.len() {
            return Err(Error::InvalidArgument(format!(
                "point/color length mismatch: {} points, {} colors",
                points.len(),
                colors.len()
            )));
        }
    }

    Ok(SceneMesh {
        positions: points.to_vec(),
        colors: colors.map(|c| c.to_vec()),
        verts: (0..points.len() as u32).collect(),
        lines: Vec::new(),
        triangles: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointcloud_mesh_vertex_count_and_colors() {
        let points = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ];
        let colors = vec![[255, 0, 0], [0, 255, 0], [0, 0, 255]];

        let mesh = build_pointcloud_mesh(&points, Some(&colors)).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.verts, vec![0, 1, 2]);
        assert_eq!(mesh.colors.as_deref(), Some(colors.as_slice()));
        assert!(mesh.lines.is_empty());
        assert!(mesh.triangles.is_empty());
    }

    #[test]
    fn test_pointcloud_mesh_without_colors() {
        let points = vec![Point3f::new(1.0, 2.0, 3.0), Point3f::new(4.0, 5.0, 6.0)];
        let mesh = build_pointcloud_mesh(&points, None).unwrap();
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.verts.len(), 2);
        assert!(mesh.colors.is_none());
    }

    #[test]
    fn test_pointcloud_mesh_length_mismatch() {
        let points = vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0)];
        let colors = vec![[255, 255, 255]];
        let result = build_pointcloud_mesh(&points, Some(&colors));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_pointcloud() {
        let mesh = build_pointcloud_mesh(&[], None).unwrap();
        assert_eq!(mesh.vertex_count(), 0);
        assert!(mesh.is_empty());
    }
}
