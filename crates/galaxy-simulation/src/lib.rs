//! # Galaxy Simulation
//!
//! Spiral galaxy generation and the host that runs the integrator on a
//! background thread, exchanging buffers with the render loop by message
//! passing only.

pub mod error;
pub mod generator;
pub mod host;
pub mod messages;
pub mod params;
mod worker;

pub use error::*;
pub use generator::*;
pub use host::*;
pub use messages::*;
pub use params::*;
