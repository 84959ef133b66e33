//! Camera synchronization between a scene view and its orientation cube.
//!
//! The main camera and the overlay (cube) camera both orbit the world origin and always
//! look at it. Moving either one turns the other to the same direction; clicking a cube
//! face snaps the main camera onto that face's axis without changing its zoom.

pub mod align;
pub mod camera;
pub mod controls;
pub mod highlight;
pub mod picking;
pub mod pointer;
pub mod selection;
pub mod session;
pub mod spherical;
pub mod sync;

pub use align::{align_to_direction, place_on_direction};
pub use axes::{CubeFace, FaceNormalError};
pub use camera::{CameraState, Projection, SharedCamera};
pub use controls::OrbitControls;
pub use highlight::{
    transition, CubeMaterials, FacePicker, HighlightChange, HighlightEvent, HighlightSink,
    HighlightState,
};
pub use picking::{nearest_hit, Aabb, ObjectId, PickTarget, Ray, RayHit};
pub use pointer::{PointerGesture, PointerTracker, Viewport};
pub use selection::SelectionMarker;
pub use session::{EventOutcome, SessionSnapshot, ViewerError, ViewerEvent, ViewerSession};
pub use spherical::Spherical;
pub use sync::{CameraSyncManager, Refreshable, SharedControl, SyncContext};
