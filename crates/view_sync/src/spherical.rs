//! Spherical coordinates around the world origin.
//!
//! Y is up. The polar angle is measured from +Y, the azimuth around +Y starting at +Z,
//! so `(r, polar, azimuth)` maps to
//! `(r·sin(polar)·sin(azimuth), r·cos(polar), r·sin(polar)·cos(azimuth))`.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Margin kept between the polar angle and the poles while the user orbits.
pub const POLE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Spherical {
    pub radius: f64,
    pub polar: f64,
    pub azimuth: f64,
}

impl Spherical {
    pub const fn new(radius: f64, polar: f64, azimuth: f64) -> Self {
        Self {
            radius,
            polar,
            azimuth,
        }
    }

    /// The origin has no direction; it maps to radius 0 with both angles 0.
    pub fn from_cartesian(p: DVec3) -> Self {
        let radius = p.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            polar: (p.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: p.x.atan2(p.z),
        }
    }

    pub fn to_cartesian(self) -> DVec3 {
        let sin_polar_radius = self.polar.sin() * self.radius;
        DVec3::new(
            sin_polar_radius * self.azimuth.sin(),
            self.polar.cos() * self.radius,
            sin_polar_radius * self.azimuth.cos(),
        )
    }

    /// Same angles, different distance.
    pub fn with_radius(self, radius: f64) -> Self {
        Self { radius, ..self }
    }

    /// Unit vector pointing from the origin along these angles.
    pub fn direction(self) -> DVec3 {
        self.with_radius(1.0).to_cartesian()
    }

    /// Keep the polar angle strictly between the poles.
    pub fn make_safe(self) -> Self {
        Self {
            polar: self
                .polar
                .clamp(POLE_EPSILON, std::f64::consts::PI - POLE_EPSILON),
            ..self
        }
    }
}

impl From<DVec3> for Spherical {
    fn from(p: DVec3) -> Self {
        Spherical::from_cartesian(p)
    }
}

impl From<Spherical> for DVec3 {
    fn from(s: Spherical) -> Self {
        s.to_cartesian()
    }
}
