//! Flat particle buffers shared by the generator, the integrator and the
//! render bridge
//!
//! Particle `i` occupies components `[3i, 3i + 1, 3i + 2]` of both buffers.

use glam::Vec3;

use crate::constants::STRIDE;
use crate::error::{Result, SimulationError};

/// Positions and velocities of a fixed number of stars.
///
/// Both buffers always hold exactly `3 * len()` components.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSet {
    positions: Vec<f32>,
    velocities: Vec<f32>,
}

impl ParticleSet {
    /// Validate and wrap a pair of flat buffers.
    pub fn from_buffers(positions: Vec<f32>, velocities: Vec<f32>) -> Result<Self> {
        if positions.len() != velocities.len() || positions.len() % STRIDE != 0 {
            return Err(SimulationError::BufferLengthMismatch {
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }

        Ok(Self {
            positions,
            velocities,
        })
    }

    /// `count` stars at rest at the origin
    pub fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * STRIDE],
            velocities: vec![0.0; count * STRIDE],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / STRIDE
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * STRIDE..])
    }

    pub fn velocity(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.velocities[index * STRIDE..])
    }

    pub fn set(&mut self, index: usize, position: Vec3, velocity: Vec3) {
        let i3 = index * STRIDE;
        position.write_to_slice(&mut self.positions[i3..i3 + STRIDE]);
        velocity.write_to_slice(&mut self.velocities[i3..i3 + STRIDE]);
    }

    /// Mutable views of both buffers at once, for in-place integration
    pub fn buffers_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.positions, &mut self.velocities)
    }

    pub fn into_buffers(self) -> (Vec<f32>, Vec<f32>) {
        (self.positions, self.velocities)
    }
}

/// Mean distance from the central mass over a flat position buffer.
/// Returns 0 for an empty buffer.
pub fn mean_radius(positions: &[f32]) -> f32 {
    let count = positions.len() / STRIDE;
    if count == 0 {
        return 0.0;
    }

    let total: f64 = positions
        .chunks_exact(STRIDE)
        .map(|p| Vec3::from_slice(p).length() as f64)
        .sum();

    (total / count as f64) as f32
}
