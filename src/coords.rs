//! Mapping between model space and canvas space.
//!
//! Model space is the zoom-independent coordinate system windows are stored
//! and persisted in. Canvas space is what a zoom-scaled visual canvas (and
//! the gesture layer sitting on it) reports: every model value multiplied by
//! the current zoom.
//!
//! All functions here are pure. `zoom` must be strictly positive; the
//! workspace keeps it inside `[ZOOM_MIN, ZOOM_MAX]` so this holds for every
//! zoom read from a [`crate::store::Store`].

use serde::{Deserialize, Serialize};

/// Scale a model-space value into canvas space.
pub fn to_canvas(model: f64, zoom: f64) -> f64 {
    debug_assert!(zoom > 0.0, "zoom must be positive, got {zoom}");
    model * zoom
}

/// Scale a canvas-space value back into model space.
pub fn to_model(canvas: f64, zoom: f64) -> f64 {
    debug_assert!(zoom > 0.0, "zoom must be positive, got {zoom}");
    canvas / zoom
}

/// Rectangle in model space (persisted units).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Rectangle in canvas space, as reported by the gesture layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ModelRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn to_canvas(self, zoom: f64) -> CanvasRect {
        CanvasRect {
            x: to_canvas(self.x, zoom),
            y: to_canvas(self.y, zoom),
            width: to_canvas(self.w, zoom),
            height: to_canvas(self.h, zoom),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

impl CanvasRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_model(self, zoom: f64) -> ModelRect {
        ModelRect {
            x: to_model(self.x, zoom),
            y: to_model(self.y, zoom),
            w: to_model(self.width, zoom),
            h: to_model(self.height, zoom),
        }
    }
}
