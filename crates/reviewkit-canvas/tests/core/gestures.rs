use std::cell::Cell;

use reviewkit_canvas::{
    AnnotationCommit, ContentMeasure, Drawing, GestureKind, Interaction, InteractionEngine,
    NormalizedRect, PinHit, Point, PointerButton, PointerCapture, PointerContext, ScreenPoint,
    ScreenRect, Tool, Viewport,
};
use reviewkit_core::CommentId;
use reviewkit_settings::GestureSettings;

/// 100x100 px content box at the origin, so pixels equal normalized units.
struct CountingMeasure {
    calls: Cell<usize>,
}

impl CountingMeasure {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl ContentMeasure for CountingMeasure {
    fn measure(&self) -> ScreenRect {
        self.calls.set(self.calls.get() + 1);
        ScreenRect::new(0.0, 0.0, 100.0, 100.0)
    }
}

fn context<'a>(tool: Tool, measure: &'a dyn ContentMeasure) -> PointerContext<'a> {
    PointerContext {
        tool,
        compare: Default::default(),
        can_annotate: true,
        has_selection: false,
        hit: None,
        measure,
    }
}

fn run(
    engine: &mut InteractionEngine,
    tool: Tool,
    down: (f64, f64),
    moves: &[(f64, f64)],
    up: (f64, f64),
) -> Interaction {
    let measure = CountingMeasure::new();
    let mut vp = Viewport::default();
    engine.pointer_down(
        ScreenPoint::new(down.0, down.1),
        PointerButton::Primary,
        &context(tool, &measure),
    );
    for (x, y) in moves {
        engine.pointer_move(ScreenPoint::new(*x, *y), &mut vp);
    }
    engine.pointer_up(ScreenPoint::new(up.0, up.1), &mut vp)
}

fn engine() -> InteractionEngine {
    InteractionEngine::new(GestureSettings::default(), PointerCapture::new())
}

#[test]
fn test_backwards_box_is_normalized() {
    let result = run(&mut engine(), Tool::Box, (60.0, 60.0), &[(40.0, 40.0), (20.0, 20.0)], (20.0, 20.0));
    match result {
        Interaction::Committed(AnnotationCommit::Place { anchor, drawing }) => {
            assert_eq!(anchor, Point::new(20.0, 20.0));
            assert_eq!(
                drawing,
                Some(Drawing::rect(NormalizedRect::new(20.0, 20.0, 40.0, 40.0), "#ef4444"))
            );
        }
        other => panic!("expected a commit, got {:?}", other),
    }
}

#[test]
fn test_single_point_pen_commits_nothing() {
    let result = run(&mut engine(), Tool::Pen, (10.0, 10.0), &[], (10.0, 10.0));
    assert_eq!(result, Interaction::None);
}

#[test]
fn test_two_point_pen_commits_once() {
    let result = run(&mut engine(), Tool::Pen, (10.0, 10.0), &[(12.0, 14.0)], (12.0, 14.0));
    match result {
        Interaction::Committed(AnnotationCommit::Place { anchor, drawing }) => {
            assert_eq!(anchor, Point::new(10.0, 10.0));
            assert_eq!(
                drawing,
                Some(Drawing::pen(
                    vec![Point::new(10.0, 10.0), Point::new(12.0, 14.0)],
                    "#ef4444"
                ))
            );
        }
        other => panic!("expected a commit, got {:?}", other),
    }
}

#[test]
fn test_pen_points_leave_the_box_raw() {
    let result = run(&mut engine(), Tool::Pen, (95.0, 50.0), &[(105.0, 50.0)], (105.0, 50.0));
    let Interaction::Committed(AnnotationCommit::Place { anchor, drawing: Some(Drawing::Pen { points, .. }) }) = result else {
        panic!("expected a pen commit");
    };
    assert_eq!(anchor, Point::new(95.0, 50.0));
    assert_eq!(points[1], Point::new(105.0, 50.0));
}

#[test]
fn test_pen_points_clamped_when_configured() {
    let settings = GestureSettings {
        clamp_pen_points: true,
        ..Default::default()
    };
    let mut engine = InteractionEngine::new(settings, PointerCapture::new());
    let result = run(&mut engine, Tool::Pen, (95.0, 50.0), &[(105.0, -3.0)], (105.0, -3.0));
    let Interaction::Committed(AnnotationCommit::Place { drawing: Some(Drawing::Pen { points, .. }), .. }) = result else {
        panic!("expected a pen commit");
    };
    assert_eq!(points[1], Point::new(100.0, 0.0));
}

#[test]
fn test_tiny_box_discarded() {
    let result = run(&mut engine(), Tool::Box, (50.0, 50.0), &[(50.5, 50.9)], (50.5, 50.9));
    assert_eq!(result, Interaction::None);
}

#[test]
fn test_thin_box_kept() {
    // Only one side needs to reach the threshold.
    let result = run(&mut engine(), Tool::Box, (50.0, 50.0), &[(51.0, 50.2)], (51.0, 50.2));
    assert!(matches!(result, Interaction::Committed(AnnotationCommit::Place { .. })));
}

#[test]
fn test_box_clipped_before_threshold() {
    // Entirely outside the content box: clips to nothing and is dropped.
    let result = run(&mut engine(), Tool::Box, (120.0, 120.0), &[(140.0, 140.0)], (140.0, 140.0));
    assert_eq!(result, Interaction::None);

    // Partly outside: the kept part is what counts.
    let result = run(&mut engine(), Tool::Box, (99.5, 10.0), &[(140.0, 10.5)], (140.0, 10.5));
    assert_eq!(result, Interaction::None);

    // Raw width is 10.5 but only 0.5 of it lands on the content.
    let result = run(&mut engine(), Tool::Box, (-10.0, 50.0), &[(0.5, 50.5)], (0.5, 50.5));
    assert_eq!(result, Interaction::None);
}

#[test]
fn test_measured_once_per_gesture() {
    let measure = CountingMeasure::new();
    let mut vp = Viewport::default();
    let mut engine = engine();

    engine.pointer_down(ScreenPoint::new(1.0, 1.0), PointerButton::Primary, &context(Tool::Pen, &measure));
    for i in 0..50 {
        engine.pointer_move(ScreenPoint::new(1.0 + i as f64, 2.0), &mut vp);
    }
    engine.pointer_up(ScreenPoint::new(51.0, 2.0), &mut vp);
    assert_eq!(measure.calls.get(), 1);

    engine.pointer_down(ScreenPoint::new(1.0, 1.0), PointerButton::Primary, &context(Tool::Box, &measure));
    assert_eq!(measure.calls.get(), 2);
}

#[test]
fn test_new_press_replaces_running_gesture() {
    let capture = PointerCapture::new();
    let mut engine = InteractionEngine::new(GestureSettings::default(), capture.clone());
    let measure = CountingMeasure::new();
    let id = CommentId::new();

    let mut ctx = context(Tool::Pointer, &measure);
    ctx.hit = Some(PinHit {
        id,
        anchor: Point::new(30.0, 30.0),
        drawing: None,
    });
    engine.pointer_down(ScreenPoint::new(30.0, 30.0), PointerButton::Primary, &ctx);
    assert_eq!(engine.gesture_kind(), GestureKind::Dragging);
    assert_eq!(capture.active_count(), 1);

    engine.pointer_down(ScreenPoint::new(30.0, 30.0), PointerButton::Primary, &context(Tool::Hand, &measure));
    assert_eq!(engine.gesture_kind(), GestureKind::Panning);
    assert_eq!(capture.active_count(), 0);
}

#[test]
fn test_cancel_releases_capture() {
    let capture = PointerCapture::new();
    let mut engine = InteractionEngine::new(GestureSettings::default(), capture.clone());
    let measure = CountingMeasure::new();
    let mut ctx = context(Tool::Pointer, &measure);
    ctx.hit = Some(PinHit {
        id: CommentId::new(),
        anchor: Point::new(5.0, 5.0),
        drawing: None,
    });
    engine.pointer_down(ScreenPoint::new(5.0, 5.0), PointerButton::Primary, &ctx);
    engine.cancel();
    assert_eq!(capture.active_count(), 0);
    assert!(engine.drag_preview().is_none());
}

#[test]
fn test_click_on_pin_without_moving_only_selects() {
    let mut engine = engine();
    let measure = CountingMeasure::new();
    let mut vp = Viewport::default();
    let id = CommentId::new();
    let mut ctx = context(Tool::Pointer, &measure);
    ctx.hit = Some(PinHit {
        id,
        anchor: Point::new(40.0, 40.0),
        drawing: None,
    });
    assert_eq!(
        engine.pointer_down(ScreenPoint::new(40.0, 40.0), PointerButton::Primary, &ctx),
        Interaction::Selected(id)
    );
    assert_eq!(engine.pointer_up(ScreenPoint::new(40.0, 40.0), &mut vp), Interaction::None);
}

#[test]
fn test_drag_released_past_edge_is_clamped() {
    let mut engine = engine();
    let measure = CountingMeasure::new();
    let mut vp = Viewport::default();
    let id = CommentId::new();
    let mut ctx = context(Tool::Pointer, &measure);
    ctx.hit = Some(PinHit {
        id,
        anchor: Point::new(90.0, 50.0),
        drawing: None,
    });
    engine.pointer_down(ScreenPoint::new(90.0, 50.0), PointerButton::Primary, &ctx);
    let result = engine.pointer_up(ScreenPoint::new(130.0, 50.0), &mut vp);
    assert_eq!(
        result,
        Interaction::Committed(AnnotationCommit::Relocate { id, dx: 10.0, dy: 0.0 })
    );
}

#[test]
fn test_drawing_preview_tracks_box() {
    let mut engine = engine();
    let measure = CountingMeasure::new();
    let mut vp = Viewport::default();
    engine.pointer_down(ScreenPoint::new(70.0, 70.0), PointerButton::Primary, &context(Tool::Box, &measure));
    engine.pointer_move(ScreenPoint::new(50.0, 60.0), &mut vp);
    assert_eq!(
        engine.drawing_preview(),
        Some(Drawing::rect(NormalizedRect::new(50.0, 60.0, 20.0, 10.0), "#ef4444"))
    );
}
