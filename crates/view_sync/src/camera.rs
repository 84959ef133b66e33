use std::{cell::RefCell, rc::Rc};

use glam::{DMat3, DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::spherical::Spherical;

/// Camera handle shared between the sync manager, the orbit controls and the renderer.
pub type SharedCamera = Rc<RefCell<CameraState>>;

const WORLD_UP: DVec3 = DVec3::Y;

/// A camera orbiting the world origin. The look-at target is always the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: DVec3,
}

impl CameraState {
    pub const TARGET: DVec3 = DVec3::ZERO;

    pub const fn new(position: DVec3) -> Self {
        Self { position }
    }

    pub fn from_spherical(spherical: Spherical) -> Self {
        Self::new(spherical.to_cartesian())
    }

    pub fn shared(self) -> SharedCamera {
        Rc::new(RefCell::new(self))
    }

    pub const fn target(&self) -> DVec3 {
        Self::TARGET
    }

    pub fn distance(&self) -> f64 {
        self.position.length()
    }

    pub fn spherical(&self) -> Spherical {
        Spherical::from_cartesian(self.position)
    }

    /// Unit vector from the origin toward the eye (zero when the eye sits on the origin).
    pub fn direction(&self) -> DVec3 {
        self.position.normalize_or_zero()
    }

    /// Up vector used for the look-at basis.
    ///
    /// World up, except on the Y axis where it degenerates: looking down from above the
    /// screen's up is -Z, looking up from below it is +Z.
    pub fn up(&self) -> DVec3 {
        let offset = self.position - Self::TARGET;
        if offset.cross(WORLD_UP).length_squared() > 1e-12 * offset.length_squared() {
            WORLD_UP
        } else if offset.y >= 0.0 {
            DVec3::NEG_Z
        } else {
            DVec3::Z
        }
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, Self::TARGET, self.up())
    }

    /// World-space rotation of the camera (looking down its local -Z).
    pub fn orientation(&self) -> DQuat {
        let back = self.direction();
        if back == DVec3::ZERO {
            return DQuat::IDENTITY;
        }
        let right = self.up().cross(back).normalize();
        let up = back.cross(right);
        DQuat::from_mat3(&DMat3::from_cols(right, up, back)).normalize()
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Projection {
    pub fn new(fov_y_deg: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            fov_y_deg,
            aspect,
            near,
            far,
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.aspect = if width <= 0.0 || height <= 0.0 {
            1.0
        } else {
            width / height
        };
    }

    pub fn matrix(&self) -> DMat4 {
        DMat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect.max(0.001),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self, camera: &CameraState) -> DMat4 {
        self.matrix() * camera.view_matrix()
    }
}
