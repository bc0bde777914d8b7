use crate::coords::CanvasRect;
use crate::window::WindowId;

/// Lifecycle events the direct-manipulation layer reports for one window.
///
/// Stop events carry the final rectangle in canvas space, exactly as the
/// gesture layer measured it on the zoomed canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureKind {
    PointerDown,
    DragStart,
    ResizeStart,
    DragStop(CanvasRect),
    ResizeStop(CanvasRect),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    pub window: WindowId,
    pub kind: GestureKind,
}

impl GestureEvent {
    pub fn new(window: impl Into<WindowId>, kind: GestureKind) -> Self {
        Self {
            window: window.into(),
            kind,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(
            self.kind,
            GestureKind::PointerDown | GestureKind::DragStart | GestureKind::ResizeStart
        )
    }
}
