//! Glowing point sprites
//!
//! NOTE: These mirror what the vertex and fragment stages of a backend do. They
//! exist for CPU-side statistics and testing.

use bytemuck::{Pod, Zeroable};

/// Point size in pixels at unit depth, before pixel-ratio scaling
pub const BASE_POINT_SIZE: f32 = 70.0;

/// Pixel ratios above this are not worth the fill rate
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Sharpening exponent of the radial falloff
pub const GLOW_EXPONENT: i32 = 10;

/// One star as uploaded to the GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointSprite {
    /// Base size already multiplied by the effective pixel ratio
    pub size: f32,
}

impl PointSprite {
    pub fn new(pixel_ratio: f32) -> Self {
        Self {
            size: BASE_POINT_SIZE * effective_pixel_ratio(pixel_ratio),
        }
    }

    /// Screen-space size for a view-space depth (negative in front of the
    /// camera). Points at or behind the camera get size 0.
    pub fn size_at(&self, view_z: f32) -> f32 {
        if view_z >= 0.0 {
            return 0.0;
        }
        self.size / -view_z
    }
}

pub fn effective_pixel_ratio(pixel_ratio: f32) -> f32 {
    pixel_ratio.clamp(0.0, MAX_PIXEL_RATIO)
}

/// Brightness at `distance` from the sprite center in point coordinates
/// (0 at the center, 0.5 at the edge)
pub fn glow(distance: f32) -> f32 {
    (1.0 - smoothstep(0.0, 0.5, distance)).powi(GLOW_EXPONENT)
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Interleave flat position and color buffers into vertices.
/// Stops at the shorter of the two.
pub fn interleave(positions: &[f32], colors: &[f32]) -> Vec<StarVertex> {
    positions
        .chunks_exact(3)
        .zip(colors.chunks_exact(3))
        .map(|(p, c)| StarVertex {
            position: [p[0], p[1], p[2]],
            color: [c[0], c[1], c[2]],
        })
        .collect()
}
