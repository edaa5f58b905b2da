//! Startup configuration for the galaxy
//!
//! Display density and tuning constants are resolved once here and passed
//! down explicitly.

use galaxy_physics::PhysicsParams;

/// Displays denser than this get the larger particle budget
pub const HIGH_DENSITY_PIXEL_RATIO: f32 = 1.5;
pub const HIGH_DENSITY_PARTICLES: usize = 300_000;
pub const STANDARD_PARTICLES: usize = 100_000;
pub const BACKGROUND_STARS: usize = 3_000;

/// How the per-axis scatter around the spiral arms is shaped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterShape {
    /// `u³ · (v - 0.5) · s · r`: a cubed uniform weight on a scaled centered
    /// draw. Bounded by `0.5 · s · r`.
    #[default]
    CubedWeight,
    /// `((v - 0.5) · s · r)³`: the cube of the scaled centered draw
    CubedScaled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralParams {
    pub max_radius: f32,
    pub branches: u32,
    /// Extra angle per unit radius
    pub spin: f32,
    /// Horizontal scatter scale σ
    pub randomness: f32,
    /// Vertical scatter is `randomness * vertical_factor`
    pub vertical_factor: f32,
    pub jitter: JitterShape,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            max_radius: 100.0,
            branches: 3,
            spin: 5.0,
            randomness: 0.5,
            vertical_factor: 0.3,
            jitter: JitterShape::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyConfig {
    pub pixel_ratio: f32,
    pub particle_count: usize,
    pub background_stars: usize,
    pub seed: u64,
    pub spiral: SpiralParams,
    pub physics: PhysicsParams,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self::for_pixel_ratio(1.0)
    }
}

impl GalaxyConfig {
    pub fn for_pixel_ratio(pixel_ratio: f32) -> Self {
        Self {
            pixel_ratio,
            particle_count: particle_count_for_pixel_ratio(pixel_ratio),
            background_stars: BACKGROUND_STARS,
            seed: 0x6a1a_c7e5,
            spiral: SpiralParams::default(),
            physics: PhysicsParams::default(),
        }
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

pub fn particle_count_for_pixel_ratio(pixel_ratio: f32) -> usize {
    if pixel_ratio > HIGH_DENSITY_PIXEL_RATIO {
        HIGH_DENSITY_PARTICLES
    } else {
        STANDARD_PARTICLES
    }
}
