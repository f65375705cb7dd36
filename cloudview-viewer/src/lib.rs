//! Scene assembly and interactive viewing
//!
//! Wires built meshes into drawables with materials, places them in a
//! scene with a fixed default viewpoint, and runs a blocking trackball
//! render loop (left-drag orbits, middle-drag pans, right-drag or
//! scroll zooms).

pub mod camera;
pub mod scene;
pub mod session;

pub use camera::*;
pub use scene::*;
pub use session::*;
