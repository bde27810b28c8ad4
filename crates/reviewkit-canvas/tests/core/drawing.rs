use proptest::prelude::*;
use reviewkit_canvas::{Drawing, NormalizedRect, Point};

fn coord() -> impl Strategy<Value = f64> {
    -50.0f64..150.0
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

fn drawing() -> impl Strategy<Value = Drawing> {
    prop_oneof![
        prop::collection::vec(point(), 1..40).prop_map(|points| Drawing::pen(points, "#ef4444")),
        (coord(), coord(), 0.0f64..100.0, 0.0f64..100.0)
            .prop_map(|(x, y, w, h)| Drawing::rect(NormalizedRect::new(x, y, w, h), "#3b82f6")),
    ]
}

fn assert_close(a: &Drawing, b: &Drawing) {
    match (a, b) {
        (Drawing::Pen { points: pa, .. }, Drawing::Pen { points: pb, .. }) => {
            assert_eq!(pa.len(), pb.len());
            for (p, q) in pa.iter().zip(pb) {
                assert!((p.x - q.x).abs() < 1e-9 && (p.y - q.y).abs() < 1e-9);
            }
        }
        (Drawing::Box { rect: ra, .. }, Drawing::Box { rect: rb, .. }) => {
            assert!((ra.x - rb.x).abs() < 1e-9 && (ra.y - rb.y).abs() < 1e-9);
            assert_eq!(ra.w, rb.w);
            assert_eq!(ra.h, rb.h);
        }
        _ => panic!("variant changed"),
    }
    assert_eq!(a.color(), b.color());
}

proptest! {
    #[test]
    fn translate_there_and_back(d in drawing(), dx in -100.0f64..100.0, dy in -100.0f64..100.0) {
        let back = d.translated(dx, dy).translated(-dx, -dy);
        assert_close(&d, &back);
    }

    #[test]
    fn translate_moves_bounds_by_delta(d in drawing(), dx in -100.0f64..100.0, dy in -100.0f64..100.0) {
        let before = d.bounds();
        let after = d.translated(dx, dy).bounds();
        prop_assert!((after.x - before.x - dx).abs() < 1e-6);
        prop_assert!((after.y - before.y - dy).abs() < 1e-6);
        prop_assert!((after.w - before.w).abs() < 1e-6);
        prop_assert!((after.h - before.h).abs() < 1e-6);
    }
}

#[test]
fn test_translate_in_place_matches_translated() {
    let mut d = Drawing::pen(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)], "#000000");
    let copy = d.translated(2.0, 2.0);
    d.translate(2.0, 2.0);
    assert_eq!(d, copy);
}
