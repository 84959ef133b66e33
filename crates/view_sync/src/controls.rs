use glam::DVec2;
use settings::{CameraSettings, OverlaySettings};

use crate::{
    camera::{CameraState, SharedCamera},
    spherical::Spherical,
    sync::Refreshable,
};

/// Orbit controls for a camera circling the world origin.
///
/// Drags move the eye over its sphere, scrolling changes the radius. Pan is not
/// supported: the target is pinned to the origin.
#[derive(Debug)]
pub struct OrbitControls {
    camera: SharedCamera,
    rotate_speed: f64,
    zoom: Option<ZoomLimits>,
    /// Camera angles as of the last user input or refresh
    spherical: Spherical,
}

#[derive(Debug, Clone, Copy)]
struct ZoomLimits {
    sensitivity: f64,
    invert: bool,
    min_distance: f64,
    max_distance: f64,
}

impl OrbitControls {
    /// Controls for the main scene camera: rotate and zoom.
    pub fn for_main(camera: SharedCamera, settings: &CameraSettings) -> Self {
        let mut controls = Self::new(camera, settings.rotate_speed);
        controls.zoom = Some(ZoomLimits {
            sensitivity: settings.zoom_sensitivity,
            invert: settings.invert_zoom,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
        });
        controls
    }

    /// Controls for the orientation cube camera: rotate only, its distance is fixed.
    pub fn for_overlay(camera: SharedCamera, settings: &OverlaySettings) -> Self {
        Self::new(camera, settings.rotate_speed)
    }

    fn new(camera: SharedCamera, rotate_speed: f64) -> Self {
        let spherical = camera.borrow().spherical();
        Self {
            camera,
            rotate_speed,
            zoom: None,
            spherical,
        }
    }

    pub fn camera(&self) -> &SharedCamera {
        &self.camera
    }

    pub fn zoom_enabled(&self) -> bool {
        self.zoom.is_some()
    }

    pub fn polar_angle(&self) -> f64 {
        self.spherical.polar
    }

    pub fn azimuth_angle(&self) -> f64 {
        self.spherical.azimuth
    }

    pub fn distance(&self) -> f64 {
        self.spherical.radius
    }

    /// Rotate by a pointer drag of `delta` pixels inside a viewport `viewport_height`
    /// pixels tall. A drag across the full height turns the camera by a full turn at
    /// speed 1. Returns whether the camera moved.
    pub fn rotate(&mut self, delta: DVec2, viewport_height: f64) -> bool {
        if delta == DVec2::ZERO {
            return false;
        }
        let height = viewport_height.max(1.0);
        let per_pixel = std::f64::consts::TAU / height * self.rotate_speed;

        // Re-read the camera: the sync manager may have moved it since the last drag.
        let mut spherical = self.camera.borrow().spherical();
        if spherical.radius == 0.0 {
            return false;
        }
        spherical.azimuth -= delta.x * per_pixel;
        spherical.polar -= delta.y * per_pixel;
        let spherical = spherical.make_safe();

        self.camera.borrow_mut().position = spherical.to_cartesian();
        self.spherical = spherical;
        true
    }

    /// Zoom by scroll `amount` (positive = wheel up). Returns whether the camera moved.
    pub fn zoom(&mut self, amount: f64) -> bool {
        let Some(limits) = self.zoom else {
            return false;
        };
        let direction = if limits.invert { 1.0 } else { -1.0 };
        let delta = amount * direction * limits.sensitivity;

        let mut camera = self.camera.borrow_mut();
        let current = camera.spherical();
        let radius = (current.radius + delta).clamp(limits.min_distance, limits.max_distance);
        if (radius - current.radius).abs() <= 1e-12 * radius.max(1.0) {
            return false;
        }
        *camera = CameraState::from_spherical(current.with_radius(radius));
        self.spherical = current.with_radius(radius);
        true
    }
}

impl Refreshable for OrbitControls {
    /// Pick up programmatic camera moves. The direction is kept as-is, only the
    /// distance is clamped into the zoom range.
    fn update(&mut self) {
        let mut camera = self.camera.borrow_mut();
        let mut spherical = camera.spherical();
        if let Some(limits) = self.zoom {
            let radius = spherical
                .radius
                .clamp(limits.min_distance, limits.max_distance);
            if radius != spherical.radius && spherical.radius > 0.0 {
                camera.position *= radius / spherical.radius;
                spherical.radius = radius;
            }
        }
        self.spherical = spherical;
    }
}
