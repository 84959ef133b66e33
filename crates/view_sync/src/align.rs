use glam::DVec3;

use crate::{camera::CameraState, spherical::Spherical};

/// Point `camera` along `direction` while keeping its distance to the origin.
///
/// Only the angles of `direction` are used. A zero direction has angles 0, which puts
/// the camera on the +Y pole.
pub fn align_to_direction(camera: &CameraState, direction: DVec3) -> CameraState {
    place_on_direction(direction, camera.distance())
}

/// Camera at `radius` from the origin along `direction`, looking at the origin.
pub fn place_on_direction(direction: DVec3, radius: f64) -> CameraState {
    let angles = Spherical::from_cartesian(direction);
    CameraState::from_spherical(angles.with_radius(radius))
}
