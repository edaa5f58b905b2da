//! Messages exchanged between the host and the integrator worker
//!
//! Every payload moves by value; the two sides never share a buffer.

use galaxy_physics::SimulationError;

/// Host -> worker
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Hand the initial buffers over to the worker
    Init {
        positions: Vec<f32>,
        velocities: Vec<f32>,
    },
    /// Advance one fixed step on the state from `Init`
    Step,
}

/// Worker -> host
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Internal state is fully populated
    Ready { particle_count: usize },
    /// Positions after a completed step
    Result { positions: Vec<f32> },
    Failed(SimulationError),
}
