use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use wiw::actions::Action;
use wiw::input::{Direction, Intent, apply, intent_for_gesture};
use wiw::keybindings::{KeyBindings, KeyCombo};
use wiw::{CanvasRect, GestureEvent, GestureKind, InputReconciler, Store, WindowId, WindowOptions};

fn store_with(urls: &[&str]) -> (Store, Vec<WindowId>) {
    let mut store = Store::new();
    let ids = urls
        .iter()
        .map(|u| {
            store
                .add_window(u, WindowOptions::default())
                .expect("url accepted")
        })
        .collect();
    (store, ids)
}

#[test]
fn drag_stop_at_zoom_writes_model_position_only() {
    let (mut store, ids) = store_with(&["a.example"]);
    store.set_zoom(0.5);
    let input = InputReconciler::default();
    let stop = GestureEvent::new(
        ids[0].clone(),
        GestureKind::DragStop(CanvasRect::new(100.0, 40.0, 999.0, 999.0)),
    );
    assert!(input.handle_gesture(&mut store, &stop));
    let w = store.window(&ids[0]).expect("exists");
    assert_eq!((w.x, w.y), (200.0, 80.0));
    assert_eq!((w.w, w.h), (360.0, 640.0));
}

#[test]
fn resize_stop_round_trips_through_canvas() {
    let (mut store, ids) = store_with(&["a.example"]);
    store.set_zoom(1.25);
    let input = InputReconciler::default();
    let canvas = CanvasRect::new(25.0, 50.0, 500.0, 1000.0);
    let stop = GestureEvent::new(ids[0].clone(), GestureKind::ResizeStop(canvas));
    input.handle_gesture(&mut store, &stop);
    let w = store.window(&ids[0]).expect("exists");
    assert_eq!((w.x, w.y, w.w, w.h), (20.0, 40.0, 400.0, 800.0));
    assert_eq!(w.rect().to_canvas(store.zoom()), canvas);
}

#[test]
fn gesture_start_raises_and_selects() {
    let (mut store, ids) = store_with(&["a.example", "b.example"]);
    let input = InputReconciler::default();
    let start = GestureEvent::new(ids[0].clone(), GestureKind::DragStart);
    assert!(input.handle_gesture(&mut store, &start));
    assert_eq!(store.selected_window_id(), Some(&ids[0]));
    assert_eq!(store.workspace().topmost().map(|w| &w.id), Some(&ids[0]));
}

#[test]
fn gesture_on_closed_window_is_ignored() {
    let (mut store, ids) = store_with(&["a.example"]);
    store.remove_window(&ids[0]);
    let rev = store.revision();
    let input = InputReconciler::default();
    for kind in [
        GestureKind::PointerDown,
        GestureKind::DragStop(CanvasRect::new(1.0, 1.0, 1.0, 1.0)),
    ] {
        assert!(!input.handle_gesture(&mut store, &GestureEvent::new(ids[0].clone(), kind)));
    }
    assert_eq!(store.revision(), rev);
}

#[test]
fn nudge_up_left_stops_at_zero() {
    let (mut store, ids) = store_with(&["a.example"]);
    let input = InputReconciler::default();
    let up = KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT);
    let left = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
    for _ in 0..10 {
        input.handle_key(&mut store, &up);
        input.handle_key(&mut store, &left);
    }
    let w = store.window(&ids[0]).expect("exists");
    assert_eq!((w.x, w.y), (0.0, 0.0));
    assert!(!input.handle_key(&mut store, &up));
}

#[test]
fn nudge_targets_only_the_selected_window() {
    let (mut store, ids) = store_with(&["a.example", "b.example"]);
    store.set_selected_window(Some(ids[0].clone()));
    let input = InputReconciler::default();
    input.handle_key(&mut store, &KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT));
    assert_eq!(store.window(&ids[0]).map(|w| w.y), Some(58.0));
    assert_eq!(store.window(&ids[1]).map(|w| w.y), Some(80.0));
}

#[test]
fn unshifted_and_released_keys_do_nothing() {
    let (mut store, _) = store_with(&["a.example"]);
    let input = InputReconciler::default();
    assert!(!input.handle_key(&mut store, &KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)));
    let mut release = KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT);
    release.kind = KeyEventKind::Release;
    assert!(!input.handle_key(&mut store, &release));
}

#[test]
fn custom_bindings_are_honoured() {
    let mut bindings = KeyBindings::new();
    let combo: KeyCombo = "L".parse().expect("single letter parses");
    bindings.add(Action::NudgeRight, combo);
    let (mut store, ids) = store_with(&["a.example"]);
    let input = InputReconciler::new(bindings);
    assert!(input.handle_key(&mut store, &KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE)));
    assert!(!input.handle_key(&mut store, &KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT)));
    assert_eq!(store.window(&ids[0]).map(|w| w.x), Some(58.0));
}

#[test]
fn intents_apply_directly() {
    let (mut store, ids) = store_with(&["a.example"]);
    let nudge = Intent::Nudge {
        id: ids[0].clone(),
        direction: Direction::Right,
    };
    assert!(apply(&mut store, nudge));
    assert!(apply(&mut store, Intent::StepZoom(-4)));
    assert_eq!(store.zoom(), 0.5);
    let stop = GestureEvent::new(
        ids[0].clone(),
        GestureKind::DragStop(CanvasRect::new(8.0, 5.0, 0.0, 0.0)),
    );
    let intent = intent_for_gesture(&stop, store.zoom());
    assert_eq!(
        intent,
        Intent::MoveTo {
            id: ids[0].clone(),
            x: 16.0,
            y: 10.0
        }
    );
}
