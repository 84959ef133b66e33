//! Cube face identification and hover highlighting for the orientation cube.

use axes::{CubeFace, FaceNormalError};
use serde::Serialize;
use tracing::{debug, error};

use crate::picking::{ObjectId, RayHit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HighlightState {
    #[default]
    Idle,
    Hovering(CubeFace),
}

impl HighlightState {
    pub fn face(self) -> Option<CubeFace> {
        match self {
            HighlightState::Idle => None,
            HighlightState::Hovering(face) => Some(face),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightEvent {
    Highlight(CubeFace),
    Unhighlight(CubeFace),
}

/// Side effects of one highlight transition, unhighlight first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightChange {
    pub unhighlight: Option<CubeFace>,
    pub highlight: Option<CubeFace>,
}

impl HighlightChange {
    pub fn is_empty(&self) -> bool {
        self.unhighlight.is_none() && self.highlight.is_none()
    }

    pub fn events(&self) -> impl Iterator<Item = HighlightEvent> {
        self.unhighlight
            .map(HighlightEvent::Unhighlight)
            .into_iter()
            .chain(self.highlight.map(HighlightEvent::Highlight))
    }
}

/// Next highlight state for a hover over `hovered` (None = nothing on the cube).
pub fn transition(
    state: HighlightState,
    hovered: Option<CubeFace>,
) -> (HighlightState, HighlightChange) {
    match (state.face(), hovered) {
        (current, next) if current == next => (state, HighlightChange::default()),
        (current, None) => (
            HighlightState::Idle,
            HighlightChange {
                unhighlight: current,
                highlight: None,
            },
        ),
        (current, Some(next)) => (
            HighlightState::Hovering(next),
            HighlightChange {
                unhighlight: current,
                highlight: Some(next),
            },
        ),
    }
}

/// Receives face highlight toggles, typically the cube mesh's material groups.
pub trait HighlightSink {
    fn apply(&mut self, event: HighlightEvent);
}

/// Material slot of each cube face group, in [`CubeFace::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CubeMaterials {
    slots: [u8; 6],
}

impl CubeMaterials {
    pub const BASE: u8 = 0;

    pub fn slot(&self, face: CubeFace) -> u8 {
        self.slots[face.index()]
    }

    pub fn slots(&self) -> [u8; 6] {
        self.slots
    }
}

impl HighlightSink for CubeMaterials {
    fn apply(&mut self, event: HighlightEvent) {
        match event {
            HighlightEvent::Highlight(face) => self.slots[face.index()] = face.highlight_material(),
            HighlightEvent::Unhighlight(face) => self.slots[face.index()] = Self::BASE,
        }
    }
}

/// Turns ray hits on the orientation cube into faces and tracks the hovered one.
#[derive(Debug, Clone)]
pub struct FacePicker {
    cube: ObjectId,
    state: HighlightState,
}

impl FacePicker {
    pub fn new(cube: ObjectId) -> Self {
        Self {
            cube,
            state: HighlightState::Idle,
        }
    }

    pub fn state(&self) -> HighlightState {
        self.state
    }

    pub fn cube(&self) -> ObjectId {
        self.cube
    }

    /// Face under a hit, or None when nothing or something other than the cube was hit.
    pub fn face_at(&self, hit: Option<&RayHit>) -> Result<Option<CubeFace>, FaceNormalError> {
        match hit {
            Some(hit) if hit.object == self.cube => CubeFace::from_normal(hit.normal).map(Some),
            _ => Ok(None),
        }
    }

    pub fn update_highlight(
        &mut self,
        hovered: Option<CubeFace>,
        sink: &mut impl HighlightSink,
    ) -> HighlightChange {
        let (next, change) = transition(self.state, hovered);
        if !change.is_empty() {
            debug!(from = ?self.state, to = ?next, "cube highlight changed");
        }
        self.state = next;
        for event in change.events() {
            sink.apply(event);
        }
        change
    }

    /// Hover with a raw pick result. A bad face normal leaves the state untouched.
    pub fn hover(
        &mut self,
        hit: Option<&RayHit>,
        sink: &mut impl HighlightSink,
    ) -> Result<HighlightChange, FaceNormalError> {
        let face = self.face_at(hit).inspect_err(|err| {
            error!("rejected cube hover: {err}");
        })?;
        Ok(self.update_highlight(face, sink))
    }
}
