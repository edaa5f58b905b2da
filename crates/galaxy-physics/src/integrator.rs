//! Kick-drift-kick leapfrog with linear drag
//!
//! Every star is advanced independently against the central mass, so the
//! update runs data-parallel over particles and is identical to a sequential
//! pass in any order.

use glam::Vec3;
use rayon::prelude::*;

use crate::constants::STRIDE;
use crate::error::{Result, SimulationError};
use crate::forces::central_acceleration;
use crate::params::PhysicsParams;
use crate::particle::ParticleSet;

/// Owns the mutable simulation state and advances it one fixed step at a time.
pub struct Integrator {
    params: PhysicsParams,
    state: Option<ParticleSet>,
    steps: u64,
}

impl Integrator {
    pub fn new(params: PhysicsParams) -> Self {
        Self {
            params,
            state: None,
            steps: 0,
        }
    }

    /// Take ownership of the initial buffers. N is derived from the buffer
    /// length; re-initializing replaces any previous state.
    pub fn initialize(&mut self, positions: Vec<f32>, velocities: Vec<f32>) -> Result<usize> {
        let set = ParticleSet::from_buffers(positions, velocities)?;
        let count = set.len();

        self.state = Some(set);
        self.steps = 0;
        Ok(count)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn particle_count(&self) -> usize {
        self.state.as_ref().map_or(0, ParticleSet::len)
    }

    /// Number of steps taken since the last initialization
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance one fixed `dt` and return a snapshot of the positions.
    pub fn step(&mut self) -> Result<Vec<f32>> {
        self.advance()?;
        Ok(self.positions().map(<[f32]>::to_vec).unwrap_or_default())
    }

    /// Advance one fixed `dt` in place without copying out a snapshot.
    pub fn advance(&mut self) -> Result<()> {
        let params = self.params;
        let state = self.state.as_mut().ok_or(SimulationError::Uninitialized)?;
        let (positions, velocities) = state.buffers_mut();

        positions
            .par_chunks_exact_mut(STRIDE)
            .zip(velocities.par_chunks_exact_mut(STRIDE))
            .for_each(|(p, v)| {
                let mut position = Vec3::from_slice(p);
                let mut velocity = Vec3::from_slice(v);
                leapfrog(&mut position, &mut velocity, &params);
                position.write_to_slice(p);
                velocity.write_to_slice(v);
            });

        self.steps += 1;
        Ok(())
    }

    pub fn positions(&self) -> Option<&[f32]> {
        self.state.as_ref().map(ParticleSet::positions)
    }

    /// Read-only view for diagnostics; never part of a step result
    pub fn velocities(&self) -> Option<&[f32]> {
        self.state.as_ref().map(ParticleSet::velocities)
    }
}

/// One leapfrog step for a single star. Drag uses the velocity at the start of
/// each half kick.
pub fn leapfrog(position: &mut Vec3, velocity: &mut Vec3, params: &PhysicsParams) {
    let a = central_acceleration(*position, params);
    half_kick(velocity, a, params);

    *position += *velocity * params.dt;

    let a_new = central_acceleration(*position, params);
    half_kick(velocity, a_new, params);
}

#[inline]
fn half_kick(velocity: &mut Vec3, acceleration: Vec3, params: &PhysicsParams) {
    *velocity += (acceleration - *velocity * params.drag) * params.dt * 0.5;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::circular_velocity;
    use crate::particle::mean_radius;

    fn single_star(position: Vec3, velocity: Vec3) -> Integrator {
        let mut integrator = Integrator::new(PhysicsParams::default());
        integrator
            .initialize(position.to_array().to_vec(), velocity.to_array().to_vec())
            .unwrap();
        integrator
    }

    #[test]
    fn test_step_before_initialize_fails() {
        let mut integrator = Integrator::new(PhysicsParams::default());
        assert_eq!(integrator.step(), Err(SimulationError::Uninitialized));
        assert_eq!(integrator.steps(), 0);
    }

    #[test]
    fn test_initialize_rejects_mismatched_buffers() {
        let mut integrator = Integrator::new(PhysicsParams::default());
        let err = integrator.initialize(vec![0.0; 9], vec![0.0; 6]).unwrap_err();

        assert_eq!(
            err,
            SimulationError::BufferLengthMismatch {
                positions: 9,
                velocities: 6
            }
        );
        assert!(!integrator.is_initialized());
    }

    #[test]
    fn test_initialize_derives_count() {
        let mut integrator = Integrator::new(PhysicsParams::default());
        assert_eq!(integrator.initialize(vec![1.0; 12], vec![0.0; 12]), Ok(4));
        assert_eq!(integrator.particle_count(), 4);
    }

    #[test]
    fn test_single_step_matches_reference() {
        // N = 1 at (10, 0, 0) on its circular orbit, dt = 0.04, k = 0.003
        let position = Vec3::new(10.0, 0.0, 0.0);
        let velocity = circular_velocity(position, &PhysicsParams::default());
        let mut integrator = single_star(position, velocity);

        let snapshot = integrator.step().unwrap();
        let v = integrator.velocities().unwrap();

        let expected_position = [9.999_992_011_985, 0.0, 0.012_647_719_324];
        let expected_velocity = [-0.000_399_388_607, 0.0, 0.316_173_758_943];
        for i in 0..3 {
            assert!((snapshot[i] as f64 - expected_position[i]).abs() < 1e-6);
            assert!((v[i] as f64 - expected_velocity[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_star_at_origin_stays_finite() {
        let mut integrator = single_star(Vec3::ZERO, Vec3::ZERO);
        let snapshot = integrator.step().unwrap();

        assert!(snapshot.iter().all(|c| c.is_finite()));
        assert!(integrator.velocities().unwrap().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_identical_inputs_give_identical_trajectories() {
        let positions: Vec<f32> = (0..30).map(|i| (i as f32 * 0.37).sin() * 20.0).collect();
        let velocities: Vec<f32> = (0..30).map(|i| (i as f32 * 0.11).cos() * 0.2).collect();

        let mut a = Integrator::new(PhysicsParams::default());
        let mut b = Integrator::new(PhysicsParams::default());
        a.initialize(positions.clone(), velocities.clone()).unwrap();
        b.initialize(positions, velocities).unwrap();

        for _ in 0..100 {
            assert_eq!(a.step().unwrap(), b.step().unwrap());
        }
        assert_eq!(a.velocities(), b.velocities());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut integrator = single_star(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.4));
        let first = integrator.step().unwrap();
        integrator.step().unwrap();

        assert_ne!(first.as_slice(), integrator.positions().unwrap());
        assert_eq!(integrator.steps(), 2);
    }

    #[test]
    fn test_drag_shrinks_mean_radius() {
        let params = PhysicsParams::default();
        let mut set = ParticleSet::zeroed(64);
        for i in 0..64 {
            let angle = i as f32 * 0.7;
            let radius = 5.0 + (i % 16) as f32;
            let p = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
            set.set(i, p, circular_velocity(p, &params));
        }
        let initial_radius = mean_radius(set.positions());

        let (positions, velocities) = set.into_buffers();
        let mut integrator = Integrator::new(params);
        integrator.initialize(positions, velocities).unwrap();

        let mut checkpoints = vec![initial_radius];
        for step in 1..=10_000 {
            integrator.advance().unwrap();
            if step % 2_500 == 0 {
                checkpoints.push(mean_radius(integrator.positions().unwrap()));
            }
        }

        let final_radius = *checkpoints.last().unwrap();
        assert!(final_radius < initial_radius);
        assert!(checkpoints.windows(2).all(|w| w[1] <= w[0] * 1.01));
    }
}
