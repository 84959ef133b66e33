use approx::assert_relative_eq;
use glam::DVec3;
use settings::UserSettings;
use view_sync::{
    Aabb, CubeFace, EventOutcome, HighlightChange, HighlightState, ObjectId, PickTarget,
    ViewerEvent, ViewerSession,
};

const WINDOW: (f64, f64) = (1280.0, 720.0);
/// Center of the default 150px overlay, 10px in from the bottom-right corner.
const OVERLAY_CENTER: (f64, f64) = (1195.0, 635.0);

fn session_at(position: [f64; 3]) -> ViewerSession {
    let mut settings = UserSettings::default();
    settings.camera.initial_position = position;
    let scene = vec![PickTarget::new(ObjectId(1), Aabb::centered_cube(1.0))];
    ViewerSession::new(&settings, WINDOW, scene).unwrap()
}

fn click(session: &mut ViewerSession, x: f64, y: f64) -> EventOutcome {
    session.handle(ViewerEvent::PointerDown { x, y }).unwrap();
    session.handle(ViewerEvent::PointerUp { x, y }).unwrap()
}

fn hover(session: &mut ViewerSession, x: f64, y: f64) -> EventOutcome {
    session.handle(ViewerEvent::PointerMove { x, y }).unwrap()
}

fn assert_synced(session: &ViewerSession) {
    let main = session.main_camera().direction();
    let overlay = session.overlay_camera().direction();
    assert!(main.abs_diff_eq(overlay, 1e-9), "{main:?} vs {overlay:?}");
    assert_relative_eq!(session.overlay_camera().distance(), 3.2, epsilon = 1e-9);
}

#[test]
fn overlay_starts_in_sync_at_fixed_distance() {
    let session = session_at([2.0, 2.0, 6.0]);

    let overlay = session.overlay_camera();
    assert_relative_eq!(overlay.distance(), 3.2, epsilon = 1e-9);
    assert!(overlay
        .direction()
        .abs_diff_eq(DVec3::new(2.0, 2.0, 6.0).normalize(), 1e-9));
    assert_relative_eq!(session.main_camera().distance(), 44.0_f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn clicking_top_face_snaps_main_camera_overhead() {
    let mut session = session_at([2.0, 6.0, 2.0]);
    let distance = session.main_camera().distance();
    assert_relative_eq!(distance, 6.63, epsilon = 5e-3);

    let outcome = click(&mut session, OVERLAY_CENTER.0, OVERLAY_CENTER.1);

    assert_eq!(outcome, EventOutcome::FaceSnapped(CubeFace::POS_Y));
    let main = session.main_camera();
    assert!(main
        .position
        .abs_diff_eq(DVec3::new(0.0, distance, 0.0), 1e-9));
    assert!(main.view_matrix().is_finite());
    assert_synced(&session);
}

#[test]
fn clicking_front_face_keeps_zoom() {
    let mut session = session_at([2.0, 2.0, 6.0]);
    let distance = session.main_camera().distance();

    let outcome = click(&mut session, OVERLAY_CENTER.0, OVERLAY_CENTER.1);

    assert_eq!(outcome, EventOutcome::FaceSnapped(CubeFace::POS_Z));
    assert!(session
        .main_camera()
        .position
        .abs_diff_eq(DVec3::new(0.0, 0.0, distance), 1e-9));
    assert_synced(&session);
}

#[test]
fn hovering_two_faces_then_leaving() {
    let mut session = session_at([4.0, 4.0, 4.0]);
    let top = (OVERLAY_CENTER.0, OVERLAY_CENTER.1 - 30.0);
    let right = (OVERLAY_CENTER.0 + 30.0, OVERLAY_CENTER.1);

    assert_eq!(
        hover(&mut session, top.0, top.1),
        EventOutcome::Highlight(HighlightChange {
            unhighlight: None,
            highlight: Some(CubeFace::POS_Y),
        })
    );
    assert_eq!(
        hover(&mut session, top.0 + 1.0, top.1),
        EventOutcome::Highlight(HighlightChange::default())
    );
    assert_eq!(session.cube_materials().slot(CubeFace::POS_Y), 2);

    assert_eq!(
        hover(&mut session, right.0, right.1),
        EventOutcome::Highlight(HighlightChange {
            unhighlight: Some(CubeFace::POS_Y),
            highlight: Some(CubeFace::POS_X),
        })
    );
    assert_eq!(session.cube_materials().slots(), [1, 0, 0, 0, 0, 0]);

    assert_eq!(
        hover(&mut session, 600.0, 300.0),
        EventOutcome::Highlight(HighlightChange {
            unhighlight: Some(CubeFace::POS_X),
            highlight: None,
        })
    );
    assert_eq!(session.highlight(), HighlightState::Idle);
    assert_eq!(session.cube_materials().slots(), [0; 6]);
}

#[test]
fn dragging_overlay_turns_main_camera() {
    let mut session = session_at([2.0, 2.0, 6.0]);
    let before = session.main_camera();

    session
        .handle(ViewerEvent::PointerDown {
            x: OVERLAY_CENTER.0,
            y: OVERLAY_CENTER.1,
        })
        .unwrap();
    let moved = session
        .handle(ViewerEvent::PointerMove {
            x: OVERLAY_CENTER.0 + 40.0,
            y: OVERLAY_CENTER.1,
        })
        .unwrap();
    let released = session
        .handle(ViewerEvent::PointerUp {
            x: OVERLAY_CENTER.0 + 40.0,
            y: OVERLAY_CENTER.1,
        })
        .unwrap();

    assert_eq!(moved, EventOutcome::OverlayCameraMoved);
    assert_eq!(released, EventOutcome::Ignored);
    let after = session.main_camera();
    assert_relative_eq!(after.distance(), before.distance(), epsilon = 1e-9);
    assert!(!after.direction().abs_diff_eq(before.direction(), 1e-3));
    assert_synced(&session);
}

#[test]
fn dragging_main_view_moves_overlay_and_skips_hover() {
    let mut session = session_at([2.0, 2.0, 6.0]);

    session
        .handle(ViewerEvent::PointerDown { x: 400.0, y: 300.0 })
        .unwrap();
    let moved = hover(&mut session, 450.0, 330.0);
    assert_eq!(moved, EventOutcome::MainCameraMoved);
    assert_synced(&session);

    // Dragging across the overlay keeps orbiting the main camera, no highlight.
    let over_cube = hover(&mut session, OVERLAY_CENTER.0, OVERLAY_CENTER.1);
    assert_eq!(over_cube, EventOutcome::MainCameraMoved);
    assert_eq!(session.highlight(), HighlightState::Idle);
    assert_synced(&session);

    session
        .handle(ViewerEvent::PointerUp {
            x: OVERLAY_CENTER.0,
            y: OVERLAY_CENTER.1,
        })
        .unwrap();
}

#[test]
fn scrolling_zooms_main_only() {
    let mut session = session_at([2.0, 2.0, 6.0]);
    let before = session.main_camera().distance();

    let outcome = session.handle(ViewerEvent::Scroll { amount: 2.0 }).unwrap();

    assert_eq!(outcome, EventOutcome::MainCameraMoved);
    assert_relative_eq!(session.main_camera().distance(), before - 0.3, epsilon = 1e-9);
    assert_synced(&session);
}

#[test]
fn clicks_in_main_view_move_selection_marker() {
    let mut session = session_at([2.0, 2.0, 6.0]);

    let outcome = click(&mut session, 640.0, 360.0);
    let EventOutcome::Selection(Some(hit)) = outcome else {
        panic!("expected a scene hit, got {outcome:?}");
    };
    assert_eq!(hit.object, ObjectId(1));
    assert!(hit
        .point
        .abs_diff_eq(DVec3::new(1.0 / 6.0, 1.0 / 6.0, 0.5), 1e-9));
    assert_eq!(session.selection().position(), Some(hit.point));

    assert_eq!(click(&mut session, 20.0, 20.0), EventOutcome::Selection(None));
    assert!(!session.selection().is_visible());
}

#[test]
fn overlay_click_off_the_cube_falls_through_to_scene() {
    let mut session = session_at([2.0, 2.0, 6.0]);
    let corner = session.overlay_viewport();

    let outcome = click(&mut session, corner.x + 2.0, corner.y + 2.0);

    assert_eq!(outcome, EventOutcome::Selection(None));
    assert_synced(&session);
}

#[test]
fn short_drag_still_counts_as_click() {
    let mut session = session_at([2.0, 2.0, 6.0]);
    session
        .handle(ViewerEvent::PointerDown {
            x: OVERLAY_CENTER.0,
            y: OVERLAY_CENTER.1,
        })
        .unwrap();
    let outcome = session
        .handle(ViewerEvent::PointerUp {
            x: OVERLAY_CENTER.0 + 3.0,
            y: OVERLAY_CENTER.1 + 4.0,
        })
        .unwrap();
    assert!(matches!(outcome, EventOutcome::FaceSnapped(_)));
}

#[test]
fn resize_reanchors_overlay() {
    let mut session = session_at([2.0, 2.0, 6.0]);
    session
        .handle(ViewerEvent::Resize {
            width: 800.0,
            height: 600.0,
        })
        .unwrap();

    let overlay = session.overlay_viewport();
    assert_eq!((overlay.x, overlay.y), (640.0, 440.0));
    assert_relative_eq!(session.main_projection().aspect, 800.0 / 600.0);
}

#[test]
fn long_mixed_sequence_stays_synced() {
    let mut session = session_at([2.0, 2.0, 6.0]);
    let events = [
        ViewerEvent::PointerDown { x: 300.0, y: 200.0 },
        ViewerEvent::PointerMove { x: 340.0, y: 150.0 },
        ViewerEvent::PointerMove { x: 200.0, y: 500.0 },
        ViewerEvent::PointerUp { x: 200.0, y: 500.0 },
        ViewerEvent::Scroll { amount: -3.0 },
        ViewerEvent::PointerDown { x: 1180.0, y: 620.0 },
        ViewerEvent::PointerMove { x: 1150.0, y: 660.0 },
        ViewerEvent::PointerUp { x: 1150.0, y: 660.0 },
        ViewerEvent::PointerDown { x: 1195.0, y: 635.0 },
        ViewerEvent::PointerUp { x: 1195.0, y: 635.0 },
        ViewerEvent::PointerMove { x: 1200.0, y: 630.0 },
    ];

    for event in events {
        session.handle(event).unwrap();
        assert_synced(&session);
    }
}

#[test]
fn events_deserialize_from_tagged_json() {
    let events: Vec<ViewerEvent> = serde_json::from_str(
        r#"[
            { "kind": "pointer_down", "x": 1.0, "y": 2.0 },
            { "kind": "scroll", "amount": -1.5 },
            { "kind": "resize", "width": 640.0, "height": 480.0 }
        ]"#,
    )
    .unwrap();
    assert_eq!(
        events,
        vec![
            ViewerEvent::PointerDown { x: 1.0, y: 2.0 },
            ViewerEvent::Scroll { amount: -1.5 },
            ViewerEvent::Resize {
                width: 640.0,
                height: 480.0
            },
        ]
    );
}

#[test]
fn invalid_settings_are_refused() {
    let mut settings = UserSettings::default();
    settings.overlay.camera_distance = -1.0;
    assert!(ViewerSession::new(&settings, WINDOW, Vec::new()).is_err());
}

#[test]
fn camera_starting_at_origin_is_refused() {
    let mut settings = UserSettings::default();
    settings.camera.initial_position = [0.0, 0.0, 0.0];
    assert!(ViewerSession::new(&settings, WINDOW, Vec::new()).is_err());
}

#[test]
fn nan_zoom_limit_is_refused_before_any_scroll() {
    let mut settings = UserSettings::default();
    settings.camera.max_distance = f64::NAN;
    assert!(ViewerSession::new(&settings, WINDOW, Vec::new()).is_err());
}

#[test]
fn start_outside_zoom_range_is_clamped_up_front() {
    let mut settings = UserSettings::default();
    settings.camera.initial_position = [0.0, 0.0, 50.0];
    settings.camera.max_distance = 10.0;
    let mut session = ViewerSession::new(&settings, WINDOW, Vec::new()).unwrap();

    assert!(session
        .main_camera()
        .position
        .abs_diff_eq(DVec3::new(0.0, 0.0, 10.0), 1e-9));
    assert_synced(&session);

    session.handle(ViewerEvent::Scroll { amount: 2.0 }).unwrap();
    assert_relative_eq!(session.main_camera().distance(), 9.7, epsilon = 1e-9);
    assert_synced(&session);
}
