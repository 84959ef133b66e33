//! Keeps the main scene camera and the orientation-cube camera pointing the same way.
//!
//! The two cameras share direction but not distance: the main camera's distance belongs to
//! the zoom control, the overlay camera always sits at a fixed distance from the cube.

use std::{cell::RefCell, rc::Rc};

use glam::DVec3;
use settings::OverlaySettings;
use tracing::debug;

use crate::{
    align::{align_to_direction, place_on_direction},
    camera::SharedCamera,
};

/// A control object that caches camera state and must re-read it after the camera
/// was moved programmatically.
pub trait Refreshable {
    fn update(&mut self);
}

pub type SharedControl = Rc<RefCell<dyn Refreshable>>;

/// Everything the sync manager operates on. The caller keeps its own handles.
pub struct SyncContext {
    pub main: SharedCamera,
    pub overlay: SharedCamera,
    pub controls: Vec<SharedControl>,
}

pub struct CameraSyncManager {
    context: SyncContext,
    overlay_distance: f64,
}

impl CameraSyncManager {
    pub fn new(context: SyncContext, overlay_distance: f64) -> Self {
        Self {
            context,
            overlay_distance,
        }
    }

    pub fn from_settings(context: SyncContext, overlay: &OverlaySettings) -> Self {
        Self::new(context, overlay.camera_distance)
    }

    pub fn overlay_distance(&self) -> f64 {
        self.overlay_distance
    }

    pub fn add_control(&mut self, control: SharedControl) {
        self.context.controls.push(control);
    }

    /// Main camera moved (user drag or zoom): put the overlay camera on the same direction.
    pub fn on_main_camera_moved(&self) {
        let direction = self.context.main.borrow().position;
        let placed = place_on_direction(direction, self.overlay_distance);
        *self.context.overlay.borrow_mut() = placed;
        debug!(
            overlay = ?placed.position,
            "overlay camera follows main camera"
        );
    }

    /// Overlay camera was dragged: turn the main camera to match, keeping its distance.
    pub fn on_overlay_camera_moved(&self) {
        let direction = self.context.overlay.borrow().position;
        self.align_main(direction);
        self.refresh_controls();
    }

    /// Snap the main camera to `direction` (e.g. a clicked cube face) and bring the
    /// overlay along.
    pub fn align_main_camera_with_direction(&self, direction: DVec3) {
        self.align_main(direction);
        self.on_main_camera_moved();
        self.refresh_controls();
    }

    /// Unit directions of (main, overlay) as seen from the origin.
    pub fn directions(&self) -> (DVec3, DVec3) {
        (
            self.context.main.borrow().direction(),
            self.context.overlay.borrow().direction(),
        )
    }

    fn align_main(&self, direction: DVec3) {
        let mut main = self.context.main.borrow_mut();
        *main = align_to_direction(&main, direction);
        debug!(main = ?main.position, "main camera aligned");
    }

    fn refresh_controls(&self) {
        for control in &self.context.controls {
            control.borrow_mut().update();
        }
    }
}
