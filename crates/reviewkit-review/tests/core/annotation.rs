use reviewkit_canvas::{
    AnnotationCommit, CompareMode, Drawing, GestureKind, Interaction, KeyEvent, MediaKind,
    NormalizedRect, Point, PointerButton, ScreenPoint, ScreenRect, Tool,
};
use reviewkit_review::{Actor, Asset, KeyOutcome, ReviewSession, Role};
use reviewkit_settings::Config;

/// 100x100 px content box at the origin: pixels equal normalized units.
const CONTENT: ScreenRect = ScreenRect {
    left: 0.0,
    top: 0.0,
    width: 100.0,
    height: 100.0,
};

fn open(role: Role, kind: MediaKind) -> ReviewSession {
    let asset = Asset::new("Launch banner", kind, "v1");
    ReviewSession::new(asset, Actor::new("u1", role), &Config::default()).unwrap()
}

fn press(session: &mut ReviewSession, x: f64, y: f64) -> Interaction {
    session.pointer_down(ScreenPoint::new(x, y), PointerButton::Primary, None, &CONTENT)
}

fn release(session: &mut ReviewSession, x: f64, y: f64) -> Interaction {
    session.pointer_up(ScreenPoint::new(x, y)).unwrap()
}

#[test]
fn test_click_places_pin_and_selects_it() {
    let mut session = open(Role::Creator, MediaKind::Image);
    press(&mut session, 25.0, 40.0);
    let outcome = release(&mut session, 25.0, 40.0);
    assert!(matches!(
        outcome,
        Interaction::Committed(AnnotationCommit::Place { drawing: None, .. })
    ));

    let comments = session.visible_comments();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].anchor(), Some(Point::new(25.0, 40.0)));
    assert_eq!(comments[0].text, "");
    assert_eq!(session.selection(), Some(comments[0].id));
}

#[test]
fn test_click_with_selection_only_clears_it() {
    let mut session = open(Role::Creator, MediaKind::Image);
    press(&mut session, 10.0, 10.0);
    release(&mut session, 10.0, 10.0);
    assert!(session.selection().is_some());

    assert_eq!(press(&mut session, 50.0, 50.0), Interaction::SelectionCleared);
    assert_eq!(release(&mut session, 50.0, 50.0), Interaction::None);
    assert_eq!(session.selection(), None);
    assert_eq!(session.visible_comments().len(), 1);

    press(&mut session, 50.0, 50.0);
    release(&mut session, 50.0, 50.0);
    assert_eq!(session.visible_comments().len(), 2);
}

#[test]
fn test_pin_released_outside_is_discarded() {
    let mut session = open(Role::Creator, MediaKind::Image);
    press(&mut session, 50.0, 50.0);
    session.pointer_move(ScreenPoint::new(130.0, 50.0));
    assert_eq!(release(&mut session, 130.0, 50.0), Interaction::None);
    assert!(session.visible_comments().is_empty());
}

#[test]
fn test_pen_stroke_commits_and_tool_resets() {
    let mut session = open(Role::Creator, MediaKind::Image);
    session.select_tool(Tool::Pen);
    press(&mut session, 10.0, 10.0);
    session.pointer_move(ScreenPoint::new(20.0, 15.0));
    session.pointer_move(ScreenPoint::new(30.0, 20.0));
    assert_eq!(session.gesture_kind(), GestureKind::Pen);
    assert!(session.drawing_preview().is_some());
    release(&mut session, 30.0, 20.0);

    let comment = session.visible_comments()[0].clone();
    assert_eq!(comment.anchor(), Some(Point::new(10.0, 10.0)));
    match comment.drawing {
        Some(Drawing::Pen { ref points, .. }) => assert_eq!(points.len(), 3),
        ref other => panic!("expected pen drawing, got {:?}", other),
    }
    assert_eq!(session.tool(), Tool::Pointer);
}

#[test]
fn test_backwards_box_is_normalized() {
    let mut session = open(Role::Creator, MediaKind::Image);
    session.select_tool(Tool::Box);
    press(&mut session, 80.0, 70.0);
    session.pointer_move(ScreenPoint::new(60.0, 60.0));
    release(&mut session, 60.0, 60.0);

    let comment = &session.visible_comments()[0];
    assert_eq!(comment.anchor(), Some(Point::new(60.0, 60.0)));
    assert_eq!(
        comment.drawing,
        Some(Drawing::rect(NormalizedRect::new(60.0, 60.0, 20.0, 10.0), "#ef4444"))
    );
    assert_eq!(session.tool(), Tool::Pointer);
}

#[test]
fn test_drag_moves_pin_and_drawing_together() {
    let mut session = open(Role::Creator, MediaKind::Image);
    session.select_tool(Tool::Box);
    press(&mut session, 60.0, 60.0);
    release(&mut session, 80.0, 70.0);
    let id = session.visible_comments()[0].id;
    session.clear_selection();

    let down = session.pointer_down(
        ScreenPoint::new(60.0, 60.0),
        PointerButton::Primary,
        Some(id),
        &CONTENT,
    );
    assert_eq!(down, Interaction::Selected(id));
    assert_eq!(session.capture().active_count(), 1);

    session.pointer_leave();
    session.pointer_move(ScreenPoint::new(70.0, 75.0));
    let preview = session.drag_preview().unwrap();
    assert_eq!(preview.anchor, Point::new(70.0, 75.0));

    let up = release(&mut session, 70.0, 75.0);
    assert_eq!(
        up,
        Interaction::Committed(AnnotationCommit::Relocate {
            id,
            dx: 10.0,
            dy: 15.0
        })
    );
    assert_eq!(session.capture().active_count(), 0);

    let comment = session.comment(id).unwrap();
    assert_eq!(comment.anchor(), Some(Point::new(70.0, 75.0)));
    assert_eq!(
        comment.drawing,
        Some(Drawing::rect(NormalizedRect::new(70.0, 75.0, 20.0, 10.0), "#ef4444"))
    );
    assert_eq!(session.selection(), Some(id));
}

#[test]
fn test_observer_can_select_but_not_annotate() {
    let mut asset = Asset::new("Spot", MediaKind::Image, "v1");
    let version = asset.latest().unwrap().id;
    let pin = reviewkit_review::Comment::pinned("u2".into(), Point::new(40.0, 40.0), None);
    let id = pin.id;
    asset.version_mut(version).unwrap().prepend_comment(pin).unwrap();
    let mut session =
        ReviewSession::new(asset, Actor::new("obs", Role::Observer), &Config::default()).unwrap();

    let down = session.pointer_down(
        ScreenPoint::new(40.0, 40.0),
        PointerButton::Primary,
        Some(id),
        &CONTENT,
    );
    assert_eq!(down, Interaction::Selected(id));
    assert_eq!(session.gesture_kind(), GestureKind::Idle);

    session.clear_selection();
    press(&mut session, 10.0, 10.0);
    assert_eq!(release(&mut session, 10.0, 10.0), Interaction::None);

    let err = session.edit_text(id, "nope").unwrap_err();
    assert!(err.is_permission_denied());
    assert!(session.place_comment(Point::new(1.0, 1.0), None).is_err());
    assert_eq!(session.visible_comments().len(), 1);
}

#[test]
fn test_compare_mode_blocks_annotation_and_zoom() {
    let mut session = open(Role::Creator, MediaKind::Image);
    let v1 = session.active_version_id();
    session.upload_version("v2").unwrap();
    session.compare_with(v1, CompareMode::SideBySide).unwrap();

    press(&mut session, 10.0, 10.0);
    assert_eq!(release(&mut session, 10.0, 10.0), Interaction::None);
    assert!(!session.wheel(-100.0, ScreenPoint::new(50.0, 50.0)));
    assert!(session.viewport().is_identity());

    session.stop_compare();
    assert!(session.wheel(-100.0, ScreenPoint::new(50.0, 50.0)));
}

#[test]
fn test_wipe_divider_follows_pointer() {
    let mut session = open(Role::Creator, MediaKind::Image);
    let v1 = session.active_version_id();
    session.upload_version("v2").unwrap();
    assert!(!session.wipe_down(ScreenPoint::new(30.0, 50.0), &CONTENT));

    session.compare_with(v1, CompareMode::Wipe).unwrap();
    assert!(session.wipe_down(ScreenPoint::new(30.0, 50.0), &CONTENT));
    assert_eq!(session.wipe_position(), 30.0);
    session.wipe_move(ScreenPoint::new(150.0, 50.0));
    assert_eq!(session.wipe_position(), 100.0);
    session.wipe_up();
    assert_eq!(session.capture().active_count(), 0);
}

#[test]
fn test_space_holds_hand_on_images_and_toggles_video() {
    let mut image = open(Role::Creator, MediaKind::Image);
    assert_eq!(image.key(&KeyEvent::pressed("space")), KeyOutcome::Handled);
    assert_eq!(image.tool(), Tool::Hand);
    assert_eq!(image.key(&KeyEvent::released("space")), KeyOutcome::Handled);
    assert_eq!(image.tool(), Tool::Pointer);

    let mut video = open(Role::Creator, MediaKind::Video);
    assert_eq!(video.key(&KeyEvent::pressed("space")), KeyOutcome::TogglePlayback);
    assert_eq!(video.tool(), Tool::Pointer);
}

#[test]
fn test_video_pins_carry_playback_time() {
    let mut session = open(Role::Creator, MediaKind::Video);
    session.set_playback_position(12.5);
    let late = session.place_comment(Point::new(5.0, 5.0), None).unwrap();
    session.set_playback_position(3.0);
    let early = session.place_comment(Point::new(6.0, 6.0), None).unwrap();
    session.set_playback_position(f64::NAN);
    assert_eq!(session.playback_position(), 3.0);

    let markers: Vec<_> = session.video_markers().iter().map(|m| m.comment).collect();
    assert_eq!(markers, vec![early, late]);
    assert_eq!(session.seek_target(late).unwrap(), Some(12.5));
}
