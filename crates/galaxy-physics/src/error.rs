//! Error taxonomy for the integrator

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("integrator stepped before it was initialized")]
    Uninitialized,
    #[error(
        "position and velocity buffers must have equal lengths that are a multiple of 3 (positions: {positions}, velocities: {velocities})"
    )]
    BufferLengthMismatch { positions: usize, velocities: usize },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
