//! Turning discrete input into store mutations.
//!
//! Mapping is split in two steps. [`intent_for_key`] and
//! [`intent_for_gesture`] are pure: they look at one input record (plus the
//! little state they need) and name the mutation it asks for. [`apply`] then
//! performs that [`Intent`] on a [`Store`]. Hosts feed events through
//! [`InputReconciler`], which does both in order.

mod gesture;

use crossterm::event::KeyEvent;

use crate::actions::Action;
use crate::constants::NUDGE_STEP;
use crate::coords::ModelRect;
use crate::keybindings::KeyBindings;
use crate::store::Store;
use crate::window::{WindowId, WindowPatch};
use crate::zoom::{DEFAULT_ZOOM, step_zoom};

pub use gesture::{GestureEvent, GestureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Position after one nudge step.
///
/// Up and left moves stop at zero; down and right moves are unbounded here
/// and left to the renderer's container.
pub fn nudged_position(x: f64, y: f64, direction: Direction, step: f64) -> (f64, f64) {
    match direction {
        Direction::Up => (x, (y - step).max(0.0)),
        Direction::Down => (x, y + step),
        Direction::Left => ((x - step).max(0.0), y),
        Direction::Right => (x + step, y),
    }
}

/// A single store mutation requested by an input.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Nudge { id: WindowId, direction: Direction },
    ClearSelection,
    BringToFront(WindowId),
    /// Drag end: new top-left in model space, size untouched.
    MoveTo { id: WindowId, x: f64, y: f64 },
    /// Resize end: full rectangle in model space.
    SetRect { id: WindowId, rect: ModelRect },
    StepZoom(i32),
    ResetZoom,
}

/// Intent for a key press, if any.
///
/// Escape clears the selection whether or not a window is selected; nudges
/// need a selection.
pub fn intent_for_key(
    bindings: &KeyBindings,
    key: &KeyEvent,
    selected: Option<&WindowId>,
) -> Option<Intent> {
    let action = bindings.action_for_key(key)?;
    let nudge = |direction| {
        selected.map(|id| Intent::Nudge {
            id: id.clone(),
            direction,
        })
    };
    match action {
        Action::ClearSelection => Some(Intent::ClearSelection),
        Action::NudgeUp => nudge(Direction::Up),
        Action::NudgeDown => nudge(Direction::Down),
        Action::NudgeLeft => nudge(Direction::Left),
        Action::NudgeRight => nudge(Direction::Right),
        Action::ZoomIn => Some(Intent::StepZoom(1)),
        Action::ZoomOut => Some(Intent::StepZoom(-1)),
        Action::ZoomReset => Some(Intent::ResetZoom),
    }
}

/// Intent for a gesture event at the given canvas zoom.
///
/// Every start event raises the window. Stop events are converted from
/// canvas to model space with `zoom`, which must be the zoom the canvas was
/// drawn at while the gesture ran.
pub fn intent_for_gesture(event: &GestureEvent, zoom: f64) -> Intent {
    let id = event.window.clone();
    match &event.kind {
        GestureKind::PointerDown | GestureKind::DragStart | GestureKind::ResizeStart => {
            Intent::BringToFront(id)
        }
        GestureKind::DragStop(canvas) => {
            let rect = canvas.to_model(zoom);
            Intent::MoveTo {
                id,
                x: rect.x,
                y: rect.y,
            }
        }
        GestureKind::ResizeStop(canvas) => Intent::SetRect {
            id,
            rect: canvas.to_model(zoom),
        },
    }
}

/// Perform `intent` on `store`. Returns whether the store changed.
pub fn apply(store: &mut Store, intent: Intent) -> bool {
    match intent {
        Intent::Nudge { id, direction } => {
            let Some(window) = store.window(&id) else {
                return false;
            };
            let (x, y) = nudged_position(window.x, window.y, direction, NUDGE_STEP);
            store.update_window(&id, WindowPatch::position(x, y))
        }
        Intent::ClearSelection => {
            let had = store.selected_window_id().is_some();
            store.set_selected_window(None);
            had
        }
        Intent::BringToFront(id) => store.bring_to_front(&id),
        Intent::MoveTo { id, x, y } => store.update_window(&id, WindowPatch::position(x, y)),
        Intent::SetRect { id, rect } => store.update_window(&id, WindowPatch::rect(rect)),
        Intent::StepZoom(steps) => {
            let before = store.zoom();
            store.set_zoom(step_zoom(before, steps)) != before
        }
        Intent::ResetZoom => {
            let before = store.zoom();
            store.set_zoom(DEFAULT_ZOOM) != before
        }
    }
}

/// Routes host input events into a [`Store`].
#[derive(Debug, Clone, Default)]
pub struct InputReconciler {
    bindings: KeyBindings,
}

impl InputReconciler {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn handle_key(&self, store: &mut Store, key: &KeyEvent) -> bool {
        match intent_for_key(&self.bindings, key, store.selected_window_id()) {
            Some(intent) => apply(store, intent),
            None => false,
        }
    }

    pub fn handle_gesture(&self, store: &mut Store, event: &GestureEvent) -> bool {
        let intent = intent_for_gesture(event, store.zoom());
        tracing::trace!(window_id = %event.window, ?intent, "gesture");
        apply(store, intent)
    }
}
