//! Physics parameters for the central-mass integrator

use crate::constants::{CENTRAL_MASS, DRAG, DT, G, SOFTENING};

/// Immutable for the lifetime of an [`Integrator`](crate::Integrator).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub central_mass: f32,
    pub softening: f32,
    pub dt: f32,
    pub drag: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: G,
            central_mass: CENTRAL_MASS,
            softening: SOFTENING,
            dt: DT,
            drag: DRAG,
        }
    }
}

impl PhysicsParams {
    /// `G * M` of the central attractor
    pub fn mu(&self) -> f32 {
        self.gravity * self.central_mass
    }
}
