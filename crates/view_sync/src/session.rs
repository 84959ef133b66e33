//! Event routing for a main view with an orientation cube in its corner.
//!
//! Pointer input lands here in window pixels. Drags orbit whichever camera the press
//! started over, hovers light up cube faces, clicks either snap the main camera to a
//! cube face or drop the selection marker in the main scene.

use std::{cell::RefCell, rc::Rc};

use axes::{CubeFace, FaceNormalError};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use settings::{SettingsError, UserSettings};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    camera::{CameraState, Projection, SharedCamera},
    controls::OrbitControls,
    highlight::{CubeMaterials, FacePicker, HighlightChange, HighlightState},
    picking::{nearest_hit, Aabb, ObjectId, PickTarget, Ray, RayHit},
    pointer::{PointerGesture, PointerTracker, Viewport},
    selection::SelectionMarker,
    sync::{CameraSyncManager, Refreshable, SharedControl, SyncContext},
};

/// Id of the cube inside the overlay scene.
pub const OVERLAY_CUBE: ObjectId = ObjectId(0);

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    FaceNormal(#[from] FaceNormalError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Input events in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewerEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    Scroll { amount: f64 },
    Resize { width: f64, height: f64 },
}

/// What an event ended up doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    Ignored,
    MainCameraMoved,
    OverlayCameraMoved,
    Highlight(HighlightChange),
    FaceSnapped(CubeFace),
    Selection(Option<RayHit>),
    Resized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragTarget {
    Main,
    Overlay,
}

/// State worth showing after a batch of events.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub main_camera: CameraState,
    pub overlay_camera: CameraState,
    pub highlight: HighlightState,
    pub cube_materials: [u8; 6],
    pub selection: Option<DVec3>,
}

pub struct ViewerSession {
    main_camera: SharedCamera,
    overlay_camera: SharedCamera,
    main_projection: Projection,
    overlay_projection: Projection,
    main_viewport: Viewport,
    overlay_viewport: Viewport,
    overlay_widget: (f64, f64),
    main_controls: Rc<RefCell<OrbitControls>>,
    overlay_controls: OrbitControls,
    sync: CameraSyncManager,
    pointer: PointerTracker,
    drag_target: Option<DragTarget>,
    cube: PickTarget,
    picker: FacePicker,
    cube_materials: CubeMaterials,
    scene: Vec<PickTarget>,
    selection: SelectionMarker,
}

impl ViewerSession {
    pub fn new(
        settings: &UserSettings,
        window: (f64, f64),
        scene: Vec<PickTarget>,
    ) -> Result<Self, ViewerError> {
        settings.validate()?;
        let camera = &settings.camera;
        let overlay = &settings.overlay;

        let main_camera = CameraState::new(DVec3::from_array(camera.initial_position)).shared();
        let overlay_camera = CameraState::new(DVec3::Z * overlay.camera_distance).shared();

        let main_controls = Rc::new(RefCell::new(OrbitControls::for_main(
            main_camera.clone(),
            camera,
        )));
        let overlay_controls = OrbitControls::for_overlay(overlay_camera.clone(), overlay);

        let refreshed: SharedControl = main_controls.clone();
        let sync = CameraSyncManager::from_settings(
            SyncContext {
                main: main_camera.clone(),
                overlay: overlay_camera.clone(),
                controls: vec![refreshed],
            },
            overlay,
        );
        main_controls.borrow_mut().update();
        sync.on_main_camera_moved();

        let main_viewport = Viewport::new(0.0, 0.0, window.0, window.1);
        let overlay_widget = (overlay.widget_size, overlay.margin);
        let mut main_projection = Projection::new(camera.fov_degrees, 1.0, camera.near, camera.far);
        main_projection.set_viewport(window.0, window.1);

        info!(
            objects = scene.len(),
            main = ?main_camera.borrow().position,
            "viewer session ready"
        );

        Ok(Self {
            main_camera,
            overlay_camera,
            main_projection,
            overlay_projection: Projection::new(overlay.fov_degrees, 1.0, camera.near, camera.far),
            main_viewport,
            overlay_viewport: Viewport::bottom_right(
                &main_viewport,
                overlay_widget.0,
                overlay_widget.1,
            ),
            overlay_widget,
            main_controls,
            overlay_controls,
            sync,
            pointer: PointerTracker::new(settings.pointer.click_drag_threshold_px),
            drag_target: None,
            cube: PickTarget::new(OVERLAY_CUBE, Aabb::centered_cube(overlay.cube_size)),
            picker: FacePicker::new(OVERLAY_CUBE),
            cube_materials: CubeMaterials::default(),
            scene,
            selection: SelectionMarker::default(),
        })
    }

    pub fn handle(&mut self, event: ViewerEvent) -> Result<EventOutcome, ViewerError> {
        match event {
            ViewerEvent::PointerDown { x, y } => {
                self.pointer_down(DVec2::new(x, y));
                Ok(EventOutcome::Ignored)
            }
            ViewerEvent::PointerMove { x, y } => self.pointer_move(DVec2::new(x, y)),
            ViewerEvent::PointerUp { x, y } => self.pointer_up(DVec2::new(x, y)),
            ViewerEvent::Scroll { amount } => Ok(self.scroll(amount)),
            ViewerEvent::Resize { width, height } => {
                self.resize(width, height);
                Ok(EventOutcome::Resized)
            }
        }
    }

    fn pointer_down(&mut self, pos: DVec2) {
        self.pointer.press(pos);
        self.drag_target = Some(if self.overlay_viewport.contains(pos) {
            DragTarget::Overlay
        } else {
            DragTarget::Main
        });
    }

    fn pointer_move(&mut self, pos: DVec2) -> Result<EventOutcome, ViewerError> {
        if !self.pointer.is_down() {
            let hit = self.overlay_hit(pos);
            let change = self.picker.hover(hit.as_ref(), &mut self.cube_materials)?;
            return Ok(EventOutcome::Highlight(change));
        }

        let Some(delta) = self.pointer.drag_delta(pos) else {
            return Ok(EventOutcome::Ignored);
        };
        match self.drag_target {
            Some(DragTarget::Overlay) => {
                if self
                    .overlay_controls
                    .rotate(delta, self.overlay_viewport.height)
                {
                    self.sync.on_overlay_camera_moved();
                    return Ok(EventOutcome::OverlayCameraMoved);
                }
            }
            Some(DragTarget::Main) => {
                let moved = self
                    .main_controls
                    .borrow_mut()
                    .rotate(delta, self.main_viewport.height);
                if moved {
                    self.sync.on_main_camera_moved();
                    return Ok(EventOutcome::MainCameraMoved);
                }
            }
            None => {}
        }
        Ok(EventOutcome::Ignored)
    }

    fn pointer_up(&mut self, pos: DVec2) -> Result<EventOutcome, ViewerError> {
        self.drag_target = None;
        match self.pointer.release(pos) {
            PointerGesture::Drag => Ok(EventOutcome::Ignored),
            PointerGesture::Click(pos) => self.click(pos),
        }
    }

    fn click(&mut self, pos: DVec2) -> Result<EventOutcome, ViewerError> {
        let overlay_hit = self.overlay_hit(pos);
        if let Some(face) = self.picker.face_at(overlay_hit.as_ref())? {
            info!(%face, "snapping main camera to cube face");
            self.sync.align_main_camera_with_direction(face.normal());
            return Ok(EventOutcome::FaceSnapped(face));
        }

        let hit = self.main_hit(pos);
        self.selection.update(hit.as_ref());
        Ok(EventOutcome::Selection(hit))
    }

    fn scroll(&mut self, amount: f64) -> EventOutcome {
        let zoomed = self.main_controls.borrow_mut().zoom(amount);
        if !zoomed {
            return EventOutcome::Ignored;
        }
        self.sync.on_main_camera_moved();
        EventOutcome::MainCameraMoved
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.main_viewport = Viewport::new(0.0, 0.0, width, height);
        self.main_projection.set_viewport(width, height);
        let (size, margin) = self.overlay_widget;
        self.overlay_viewport = Viewport::bottom_right(&self.main_viewport, size, margin);
        debug!(width, height, "viewport resized");
    }

    /// Hit on the orientation cube under `pos`, if the pointer is over the overlay.
    fn overlay_hit(&self, pos: DVec2) -> Option<RayHit> {
        if !self.overlay_viewport.contains(pos) {
            return None;
        }
        let ndc = self.overlay_viewport.to_ndc(pos);
        let ray = Ray::from_camera(&self.overlay_camera.borrow(), &self.overlay_projection, ndc);
        self.cube.intersect(&ray)
    }

    fn main_hit(&self, pos: DVec2) -> Option<RayHit> {
        let ndc = self.main_viewport.to_ndc(pos);
        let ray = Ray::from_camera(&self.main_camera.borrow(), &self.main_projection, ndc);
        nearest_hit(&ray, &self.scene)
    }

    pub fn main_camera(&self) -> CameraState {
        *self.main_camera.borrow()
    }

    pub fn overlay_camera(&self) -> CameraState {
        *self.overlay_camera.borrow()
    }

    /// Shared handle for a renderer that draws from the main camera.
    pub fn main_camera_handle(&self) -> SharedCamera {
        self.main_camera.clone()
    }

    pub fn main_projection(&self) -> &Projection {
        &self.main_projection
    }

    pub fn main_viewport(&self) -> Viewport {
        self.main_viewport
    }

    pub fn overlay_viewport(&self) -> Viewport {
        self.overlay_viewport
    }

    pub fn sync(&self) -> &CameraSyncManager {
        &self.sync
    }

    pub fn highlight(&self) -> HighlightState {
        self.picker.state()
    }

    pub fn cube_materials(&self) -> CubeMaterials {
        self.cube_materials
    }

    pub fn selection(&self) -> SelectionMarker {
        self.selection
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            main_camera: self.main_camera(),
            overlay_camera: self.overlay_camera(),
            highlight: self.highlight(),
            cube_materials: self.cube_materials.slots(),
            selection: self.selection.position(),
        }
    }
}
