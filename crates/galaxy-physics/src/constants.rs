//! Simulation constants in dimensionless units.
//!
//! The central mass and the gravitational constant are both 1, so orbital
//! speeds are simply `sqrt(1 / r)`.

/// Gravitational constant
pub const G: f32 = 1.0;

/// Mass of the central attractor
pub const CENTRAL_MASS: f32 = 1.0;

/// Added to the squared distance before taking the square root so the force
/// stays finite at the origin
pub const SOFTENING: f32 = 0.1;

/// Fixed integration time step
pub const DT: f32 = 0.04;

/// Linear drag coefficient applied in each half kick
pub const DRAG: f32 = 0.003;

/// Added to the radial distance when computing circular-orbit speed
pub const VELOCITY_EPSILON: f32 = 0.001;

/// Stands in for a zero horizontal length when normalising the tangent
/// direction, so a star sitting exactly on the vertical axis gets no
/// tangential velocity instead of NaN.
pub const TANGENT_EPSILON: f32 = 1.0e-6;

/// Components per particle in the flat position/velocity buffers
pub const STRIDE: usize = 3;
