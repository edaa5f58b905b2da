//! # Galaxy Physics
//!
//! Point masses orbiting a single central attractor: simulation constants, the
//! softened central force and the kick-drift-kick leapfrog integrator with
//! linear drag.

pub mod constants;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod params;
pub mod particle;

pub use constants::*;
pub use error::*;
pub use forces::*;
pub use integrator::*;
pub use params::*;
pub use particle::*;
