use ecaview::config::MAX_ZOOM;
use ecaview::config::MIN_ZOOM;
use ecaview::viewport::Point;
use ecaview::viewport::Viewport;
use proptest::prelude::*;

fn close(a: f64, b: f64, scale: f64) -> bool {
    (a - b).abs() <= 1e-9 * scale.max(1.0)
}

fn zoom() -> impl Strategy<Value = f64> {
    (-6f64..1f64).prop_map(|e| 10f64.powf(e))
}

proptest! {
    #[test]
    fn round_trip(
        zoom in zoom(),
        pan_x in -1e4f64..1e4,
        pan_y in -1e4f64..1e4,
        x in -1e3f64..1e3,
        y in -1e3f64..1e3,
    ) {
        let vp = Viewport::with_state(zoom, pan_x, pan_y, 800, 600);
        let p = vp.to_display(vp.to_automaton(Point::new(x, y)));

        let scale = pan_x.abs().max(pan_y.abs()).max(x.abs()).max(y.abs());
        prop_assert!(close(p.x, x, scale), "{:?}", p);
        prop_assert!(close(p.y, y, scale), "{:?}", p);
    }

    #[test]
    fn zoom_keeps_anchor(
        zoom in zoom(),
        factor in 0.5f64..2.0,
        ax in 0f64..800.0,
        ay in 0f64..600.0,
    ) {
        let mut vp = Viewport::with_state(zoom, 400.0, 0.0, 800, 600);
        let anchor = Point::new(ax, ay);
        let before = vp.to_automaton(anchor);

        vp.zoom_at(anchor, factor);

        // The automaton point under the anchor is still displayed at the anchor
        let p = vp.to_display(before);
        prop_assert!(close(p.x, ax, 1e3), "{:?}", p);
        prop_assert!(close(p.y, ay, 1e3), "{:?}", p);
    }

    #[test]
    fn zoom_stays_in_bounds(factors in prop::collection::vec(prop_oneof![
        Just(0.0),
        Just(-1.0),
        Just(1e-300),
        Just(1e300),
        0.0f64..100.0,
    ], 1..50)) {
        let mut vp = Viewport::new(800, 600);

        for f in factors {
            vp.zoom_at(Point::new(10.0, 20.0), f);
            prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&vp.zoom()));
        }
    }

    #[test]
    fn zooming_in_shrinks_window(
        zoom in (-6f64..0.5f64).prop_map(|e| 10f64.powf(e)),
        factor in 1.01f64..1.5,
        pan_x in -1e3f64..1e3,
        pan_y in -1e3f64..0.0,
    ) {
        let before = Viewport::with_state(zoom, pan_x, pan_y, 800, 600).visible_window();
        let after = Viewport::with_state(zoom * factor, pan_x, pan_y, 800, 600).visible_window();

        prop_assert!(after.width() < before.width());
        prop_assert!(after.height() < before.height());
    }
}
