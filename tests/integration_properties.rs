use proptest::prelude::*;

use wiw::coords::{to_canvas, to_model};
use wiw::zoom::{ZOOM_LEVELS, clamp_zoom, snap_zoom};
use wiw::{ModelRect, Store, WindowId, WindowOptions};

fn ladder_zoom() -> impl Strategy<Value = f64> {
    prop::sample::select(ZOOM_LEVELS.to_vec())
}

proptest! {
    #[test]
    fn canvas_round_trip_is_identity(v in -1.0e6f64..1.0e6, zoom in ladder_zoom()) {
        let back = to_model(to_canvas(v, zoom), zoom);
        prop_assert!((back - v).abs() <= v.abs() * 1e-12 + 1e-9);
    }

    #[test]
    fn rect_round_trip_is_identity(
        x in 0.0f64..5000.0,
        y in 0.0f64..5000.0,
        w in 200.0f64..2000.0,
        h in 300.0f64..2000.0,
        zoom in ladder_zoom(),
    ) {
        let model = ModelRect::new(x, y, w, h);
        let back = model.to_canvas(zoom).to_model(zoom);
        for (a, b) in [(back.x, x), (back.y, y), (back.w, w), (back.h, h)] {
            prop_assert!((a - b).abs() <= b.abs() * 1e-12 + 1e-9);
        }
    }

    #[test]
    fn canvas_round_trip_holds_off_the_ladder(v in -1.0e6f64..1.0e6, zoom in 0.5f64..=1.5) {
        let back = to_model(to_canvas(v, zoom), zoom);
        prop_assert!((back - v).abs() <= v.abs() * 1e-12 + 1e-9);
    }

    #[test]
    fn rect_round_trip_holds_for_clamped_zoom(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        w in 200.0f64..2000.0,
        h in 300.0f64..2000.0,
        stored in 0.0f64..10.0,
    ) {
        let zoom = clamp_zoom(Some(stored));
        let model = ModelRect::new(x, y, w, h);
        let back = model.to_canvas(zoom).to_model(zoom);
        for (a, b) in [(back.x, x), (back.y, y), (back.w, w), (back.h, h)] {
            prop_assert!((a - b).abs() <= b.abs() * 1e-12 + 1e-9);
        }
    }

    #[test]
    fn snapped_zoom_is_nearest_level(requested in 0.0f64..3.0) {
        let snapped = snap_zoom(requested).expect("finite input snaps");
        prop_assert!(ZOOM_LEVELS.contains(&snapped));
        let clamped = requested.clamp(0.5, 1.5);
        for level in ZOOM_LEVELS {
            prop_assert!((snapped - clamped).abs() <= (level - clamped).abs());
        }
    }

    #[test]
    fn raised_window_is_always_strictly_on_top(picks in prop::collection::vec(0usize..5, 1..40)) {
        let mut store = Store::new();
        let ids: Vec<WindowId> = (0..5)
            .map(|i| {
                store
                    .add_window(&format!("p{i}.example"), WindowOptions::default())
                    .expect("url accepted")
            })
            .collect();
        for pick in picks {
            let id = &ids[pick];
            prop_assert!(store.bring_to_front(id));
            let z = store.window(id).map(|w| w.z).expect("open");
            for other in store.windows().iter().filter(|w| &w.id != id) {
                prop_assert!(other.z < z);
            }
            prop_assert_eq!(z, store.max_z());
        }
    }
}
