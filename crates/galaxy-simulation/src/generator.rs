//! Spiral galaxy initial conditions
//!
//! Stars are spread along logarithmic-looking spiral arms and start on
//! circular orbits around the central mass. Colors and the background shell
//! are cosmetic and never enter the simulation.

use galaxy_physics::{circular_velocity, ParticleSet, PhysicsParams, STRIDE};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::params::{GalaxyConfig, JitterShape, SpiralParams};

/// Background shell radius range
const BACKGROUND_MIN_RADIUS: f32 = 300.0;
const BACKGROUND_RADIUS_SPAN: f32 = 400.0;

/// Everything the host and the render bridge need at startup
pub struct GalaxyField {
    pub particles: ParticleSet,
    /// RGB per star, parallel to the position buffer
    pub colors: Vec<f32>,
    /// Decorative, never simulated
    pub background: Vec<f32>,
}

impl GalaxyField {
    pub fn generate(config: &GalaxyConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);

        let particles = generate_spiral(
            config.particle_count,
            &config.spiral,
            &config.physics,
            &mut rng,
        );
        let colors = generate_colors(config.particle_count, &mut rng);
        let background = generate_background(config.background_stars, &mut rng);

        log::info!(
            "Generated galaxy: {} stars, {} background stars",
            particles.len(),
            background.len() / STRIDE
        );

        Self {
            particles,
            colors,
            background,
        }
    }
}

/// Positions on the spiral arms with circular-orbit velocities
pub fn generate_spiral(
    count: usize,
    spiral: &SpiralParams,
    physics: &PhysicsParams,
    rng: &mut impl Rng,
) -> ParticleSet {
    let mut particles = ParticleSet::zeroed(count);

    for i in 0..count {
        let position = spiral_position(i, spiral, rng);
        let velocity = circular_velocity(position, physics);
        particles.set(i, position, velocity);
    }

    particles
}

/// Position of star `index` on its branch, including the random scatter
pub fn spiral_position(index: usize, spiral: &SpiralParams, rng: &mut impl Rng) -> Vec3 {
    let radius = rng.random::<f32>() * spiral.max_radius;
    let branches = spiral.branches.max(1);
    let branch_angle = (index as u32 % branches) as f32 / branches as f32 * TAU;
    let spin_angle = radius * spiral.spin;
    let theta = branch_angle + spin_angle;

    let horizontal = spiral.randomness;
    let vertical = spiral.randomness * spiral.vertical_factor;
    let jitter_x = jitter(spiral.jitter, horizontal, radius, rng);
    let jitter_y = jitter(spiral.jitter, vertical, radius, rng);
    let jitter_z = jitter(spiral.jitter, horizontal, radius, rng);

    Vec3::new(
        theta.cos() * radius + jitter_x,
        jitter_y,
        theta.sin() * radius + jitter_z,
    )
}

/// Heavy-tailed scatter concentrated around zero
pub fn jitter(shape: JitterShape, scale: f32, radius: f32, rng: &mut impl Rng) -> f32 {
    let centered = (rng.random::<f32>() - 0.5) * scale * radius;
    match shape {
        JitterShape::CubedWeight => rng.random::<f32>().powi(3) * centered,
        JitterShape::CubedScaled => centered.powi(3),
    }
}

/// Warm magenta palette, every channel within [0, 1]
pub fn generate_colors(count: usize, rng: &mut impl Rng) -> Vec<f32> {
    let mut colors = Vec::with_capacity(count * STRIDE);
    for _ in 0..count {
        colors.push(0.8 + 0.2 * rng.random::<f32>());
        colors.push(0.2 + 0.3 * rng.random::<f32>());
        colors.push(0.6 + 0.3 * rng.random::<f32>());
    }
    colors
}

/// Stars uniformly distributed over directions on a thick distant shell
pub fn generate_background(count: usize, rng: &mut impl Rng) -> Vec<f32> {
    let mut positions = Vec::with_capacity(count * STRIDE);
    for _ in 0..count {
        let r = BACKGROUND_MIN_RADIUS + rng.random::<f32>() * BACKGROUND_RADIUS_SPAN;
        let theta = rng.random::<f32>() * TAU;
        let phi = (2.0 * rng.random::<f32>() - 1.0).acos();

        positions.push(r * phi.sin() * theta.cos());
        positions.push(r * phi.sin() * theta.sin());
        positions.push(r * phi.cos());
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_physics::VELOCITY_EPSILON;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_buffer_lengths() {
        for count in [1, 2, 17, 500] {
            let set = generate_spiral(
                count,
                &SpiralParams::default(),
                &PhysicsParams::default(),
                &mut rng(),
            );
            assert_eq!(set.len(), count);
            assert_eq!(set.positions().len(), 3 * count);
            assert_eq!(set.velocities().len(), 3 * count);
        }
    }

    #[test]
    fn test_initial_velocities_are_circular() {
        let set = generate_spiral(
            2_000,
            &SpiralParams::default(),
            &PhysicsParams::default(),
            &mut rng(),
        );

        for i in 0..set.len() {
            let p = set.position(i);
            let v = set.velocity(i);
            let horizontal = Vec3::new(p.x, 0.0, p.z);

            assert_eq!(v.y, 0.0);
            assert!(v.dot(horizontal).abs() <= 1e-4 * horizontal.length().max(1.0));

            let expected_speed = (1.0 / (p.length() + VELOCITY_EPSILON)).sqrt();
            if horizontal.length() > 1e-3 {
                assert!((v.length() - expected_speed).abs() <= 1e-4 * expected_speed);
            }
        }
    }

    #[test]
    fn test_positions_stay_near_the_disk() {
        let spiral = SpiralParams::default();
        let set = generate_spiral(1_000, &spiral, &PhysicsParams::default(), &mut rng());

        // |jitter| <= 0.5 * s * r for the default shape
        let max_offset = 0.5 * spiral.randomness * spiral.max_radius;
        for i in 0..set.len() {
            let p = set.position(i);
            assert!(p.y.abs() <= max_offset * spiral.vertical_factor);
            assert!(Vec3::new(p.x, 0.0, p.z).length() <= spiral.max_radius + 2.0 * max_offset);
        }
    }

    #[test]
    fn test_cubed_scaled_jitter() {
        let mut a = rng();
        let mut b = rng();
        let value = jitter(JitterShape::CubedScaled, 0.5, 10.0, &mut a);
        let centered = (b.random::<f32>() - 0.5) * 0.5 * 10.0;
        assert_eq!(value, centered.powi(3));
    }

    #[test]
    fn test_branches_cycle_by_index() {
        let spiral = SpiralParams {
            randomness: 0.0,
            spin: 0.0,
            ..Default::default()
        };
        let p = spiral_position(4, &spiral, &mut rng());
        // Index 4 of 3 branches lies on branch 1 at 120 degrees
        let angle = p.z.atan2(p.x).rem_euclid(TAU);
        assert!((angle - TAU / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_colors_in_palette() {
        let colors = generate_colors(1_000, &mut rng());
        assert_eq!(colors.len(), 3_000);
        for rgb in colors.chunks_exact(3) {
            assert!((0.8..=1.0).contains(&rgb[0]));
            assert!((0.2..=0.5).contains(&rgb[1]));
            assert!((0.6..=0.9).contains(&rgb[2]));
        }
    }

    #[test]
    fn test_background_shell() {
        let stars = generate_background(500, &mut rng());
        assert_eq!(stars.len(), 1_500);
        for p in stars.chunks_exact(3) {
            let r = Vec3::from_slice(p).length();
            assert!(r >= 299.9 && r <= 700.1);
        }
    }

    #[test]
    fn test_same_seed_same_galaxy() {
        let config = GalaxyConfig::default().with_particle_count(100);
        let a = GalaxyField::generate(&config);
        let b = GalaxyField::generate(&config);

        assert_eq!(a.particles, b.particles);
        assert_eq!(a.colors, b.colors);
        assert_eq!(a.background, b.background);
    }
}
