//! # Galaxy Renderer
//!
//! Boundary to the graphics backend: the data layout a backend consumes each
//! frame and CPU reference versions of the point-sprite math.

pub mod bridge;
pub mod camera;
pub mod sprite;

pub use bridge::*;
pub use camera::*;
pub use sprite::*;
