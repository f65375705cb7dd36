//! wgpu rendering backend for cloudview
//!
//! Thin scene renderer over wgpu: a shared unlit shader drives three
//! pipelines (point, line and triangle lists). Drawables are expanded to
//! flat vertex buffers once, since the scene never changes after
//! assembly.

pub mod device;
pub mod renderer;
pub mod vertex;

pub use device::*;
pub use renderer::*;
pub use vertex::*;
