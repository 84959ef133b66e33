use glam::DVec3;
use serde::Serialize;
use tracing::info;

use crate::picking::RayHit;

/// Point marker shown where the last click hit the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SelectionMarker {
    position: Option<DVec3>,
}

impl SelectionMarker {
    pub fn position(&self) -> Option<DVec3> {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }

    /// Move the marker to the hit point, or hide it when the click missed.
    pub fn update(&mut self, hit: Option<&RayHit>) {
        match hit {
            Some(hit) => {
                info!(object = hit.object.0, point = ?hit.point, "selected world element");
                self.position = Some(hit.point);
            }
            None => {
                info!("selected world element: none");
                self.position = None;
            }
        }
    }
}
