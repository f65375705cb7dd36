//! Drawables pair a mesh with its render material

use crate::mesh::SceneMesh;
use serde::{Deserialize, Serialize};

/// Render attributes for a drawable.
///
/// `color` overrides any per-vertex colors on the mesh. `point_size` and
/// `line_width` describe the intended screen-space sizes; backends that
/// cannot vary them (core wgpu draws 1px points and lines) treat them as
/// advisory. `lighting` enables flat shading on triangle cells.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Material {
    pub color: Option<[f32; 3]>,
    pub point_size: f32,
    pub line_width: f32,
    pub lighting: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: None,
            point_size: 1.0,
            line_width: 1.0,
            lighting: true,
        }
    }
}

/// A renderable unit: geometry plus material. Lives only for the
/// duration of the render session.
#[derive(Debug, Clone)]
pub struct Drawable {
    pub mesh: SceneMesh,
    pub material: Material,
}

impl Drawable {
    /// Create a drawable from a mesh and material
    pub fn new(mesh: SceneMesh, material: Material) -> Self {
        Self { mesh, material }
    }
}
