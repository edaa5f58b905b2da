use galaxy_physics::SimulationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("simulation host was already started")]
    AlreadyStarted,
    #[error("integrator worker disconnected")]
    WorkerDisconnected,
    #[error("integrator worker did not become ready in time")]
    ReadyTimeout,
    #[error("integrator worker failed: {0}")]
    Worker(#[from] SimulationError),
    #[error("failed to spawn integrator worker: {0}")]
    Spawn(#[from] std::io::Error),
}
