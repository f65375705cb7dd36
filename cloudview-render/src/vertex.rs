//! Vertex and uniform layouts, and drawable-to-vertex expansion

use bytemuck::{Pod, Zeroable};
use cloudview_core::{Drawable, Material, Point3f, SceneMesh};
use nalgebra::Vector3;

/// Fixed light direction for flat-shaded triangles
const LIGHT_DIR: [f32; 3] = [0.577_35, 0.577_35, 0.577_35];

/// Vertex data shared by the point, line and triangle pipelines
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl SceneVertex {
    pub fn new(position: &Point3f, color: [f32; 3]) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            color,
        }
    }

    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Camera uniform data
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub _padding: f32,
}

/// Non-indexed vertex lists for one drawable, one per primitive topology
#[derive(Debug, Default)]
pub struct DrawableVertices {
    pub points: Vec<SceneVertex>,
    pub lines: Vec<SceneVertex>,
    pub triangles: Vec<SceneVertex>,
}

/// Resolve the color of vertex `index`: the material's solid color wins,
/// then the mesh's per-vertex color, then white.
fn vertex_color(mesh: &SceneMesh, material: &Material, index: usize) -> [f32; 3] {
    if let Some(color) = material.color {
        return color;
    }
    match &mesh.colors {
        Some(colors) => {
            let c = colors[index];
            [
                c[0] as f32 / 255.0,
                c[1] as f32 / 255.0,
                c[2] as f32 / 255.0,
            ]
        }
        None => [1.0, 1.0, 1.0],
    }
}

/// Expand a drawable's indexed cells into flat vertex lists.
///
/// Triangles of lit materials get flat Lambert shading baked into the
/// vertex colors from the face normal; points and lines are unlit.
pub fn expand_drawable(drawable: &Drawable) -> DrawableVertices {
    let mesh = &drawable.mesh;
    let material = &drawable.material;
    let mut out = DrawableVertices::default();

    for &i in &mesh.verts {
        let i = i as usize;
        out.points
            .push(SceneVertex::new(&mesh.positions[i], vertex_color(mesh, material, i)));
    }

    for segment in &mesh.lines {
        for &i in segment {
            let i = i as usize;
            out.lines
                .push(SceneVertex::new(&mesh.positions[i], vertex_color(mesh, material, i)));
        }
    }

    let light = Vector3::new(LIGHT_DIR[0], LIGHT_DIR[1], LIGHT_DIR[2]);
    for face in &mesh.triangles {
        let [a, b, c] = [face[0] as usize, face[1] as usize, face[2] as usize];
        let shade = if material.lighting {
            let edge1 = mesh.positions[b] - mesh.positions[a];
            let edge2 = mesh.positions[c] - mesh.positions[a];
            let normal = edge1.cross(&edge2);
            if normal.norm() > 0.0 {
                normal.normalize().dot(&light).abs().max(0.1)
            } else {
                1.0
            }
        } else {
            1.0
        };

        for &i in &[a, b, c] {
            let base = vertex_color(mesh, material, i);
            out.triangles.push(SceneVertex::new(
                &mesh.positions[i],
                [base[0] * shade, base[1] * shade, base[2] * shade],
            ));
        }
    }

    out
}
