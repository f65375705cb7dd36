//! Core data structures and scene asset builders for cloudview
//!
//! This crate provides the shared types of the viewer: meshes with
//! point/line/triangle cells, camera poses, drawables with materials,
//! and the builders that turn raw arrays into renderable geometry.

pub mod drawable;
pub mod error;
pub mod glyph;
pub mod mesh;
pub mod pose;

pub use drawable::*;
pub use error::*;
pub use glyph::*;
pub use mesh::*;
pub use pose::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;
