//! Central-mass force and circular-orbit velocities
//!
//! Stars only feel the fixed attractor at the origin, never each other.

use glam::Vec3;

use crate::constants::{TANGENT_EPSILON, VELOCITY_EPSILON};
use crate::params::PhysicsParams;

/// Softened inverse-square acceleration towards the origin
/// a(p) = -G * M * p / (|p|² + ε)^(3/2)
pub fn central_acceleration(position: Vec3, params: &PhysicsParams) -> Vec3 {
    let r2 = position.length_squared() + params.softening;
    let r = r2.sqrt();
    let force_magnitude = -params.mu() / r2;

    position * force_magnitude / r
}

/// Speed of a circular orbit at `distance` from the central mass
pub fn circular_orbit_speed(distance: f32, params: &PhysicsParams) -> f32 {
    (params.mu() / distance).sqrt()
}

/// Velocity of a massless test particle on a circular orbit in the horizontal
/// plane. The height of the star is ignored for the direction but still counts
/// towards the orbital distance.
pub fn circular_velocity(position: Vec3, params: &PhysicsParams) -> Vec3 {
    let distance = position.length() + VELOCITY_EPSILON;
    let speed = circular_orbit_speed(distance, params);

    // Rotate (x, z) by 90 degrees. Only a star exactly on the vertical axis
    // has no horizontal direction; it gets the epsilon and no tangential speed.
    let horizontal = (position.x * position.x + position.z * position.z).sqrt();
    let horizontal = if horizontal > 0.0 {
        horizontal
    } else {
        TANGENT_EPSILON
    };
    let tangent_x = -position.z / horizontal;
    let tangent_z = position.x / horizontal;

    Vec3::new(tangent_x * speed, 0.0, tangent_z * speed)
}
