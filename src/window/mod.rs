pub mod preset;
pub mod url;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    DEFAULT_ASPECT_RATIO, DEFAULT_DEVICE_PROFILE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
    MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WINDOW_ID_PREFIX,
};
use crate::coords::ModelRect;

pub use preset::{PRESET_SIZES, PresetSize, preset_by_name};
pub use url::{normalize_url, validate_url};

/// Opaque window identifier. Assigned once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub(crate) fn generate() -> Self {
        Self(format!("{WINDOW_ID_PREFIX}{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WindowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One embedded web view.
///
/// Position and size are in model space. `z` only changes through
/// [`crate::store::Store::bring_to_front`]. Reading a window back from storage
/// goes through the lenient decoder in [`crate::persistence`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: WindowId,
    pub title: String,
    pub url: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub z: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    /// Auto-refresh interval. `None` when absent from the record,
    /// `Some(None)` when stored as an explicit `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_sec: Option<Option<f64>>,
    pub aspect_ratio: String,
    pub device_profile: String,
}

impl Window {
    pub fn rect(&self) -> ModelRect {
        ModelRect::new(self.x, self.y, self.w, self.h)
    }

    /// Merge `patch` into this window. Returns whether anything changed.
    ///
    /// Geometry fields that are not finite are skipped individually so a
    /// bad value can never reach the persisted record.
    pub fn apply(&mut self, patch: &WindowPatch) -> bool {
        let before = self.clone();
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(url) = &patch.url {
            self.url.clone_from(url);
        }
        for (name, value, slot) in [
            ("x", patch.x, &mut self.x),
            ("y", patch.y, &mut self.y),
            ("w", patch.w, &mut self.w),
            ("h", patch.h, &mut self.h),
        ] {
            match value {
                Some(v) if v.is_finite() => *slot = v,
                Some(v) => tracing::warn!(
                    window_id = %self.id,
                    field = name,
                    value = v,
                    "ignoring non-finite geometry"
                ),
                None => {}
            }
        }
        if let Some(pinned) = patch.pinned {
            self.pinned = Some(pinned);
        }
        if let Some(refresh) = patch.refresh_sec {
            self.refresh_sec = Some(refresh);
        }
        if let Some(ratio) = &patch.aspect_ratio {
            self.aspect_ratio.clone_from(ratio);
        }
        if let Some(profile) = &patch.device_profile {
            self.device_profile.clone_from(profile);
        }
        *self != before
    }
}

/// Partial update for [`Window`]. `id` and `z` cannot be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub pinned: Option<bool>,
    /// `Some(None)` clears the interval to an explicit null.
    pub refresh_sec: Option<Option<f64>>,
    pub aspect_ratio: Option<String>,
    pub device_profile: Option<String>,
}

impl WindowPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(w: f64, h: f64) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }

    pub fn rect(rect: ModelRect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            w: Some(rect.w),
            h: Some(rect.h),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Caller-supplied settings for a new window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowOptions {
    pub title: Option<String>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub preset: Option<PresetSize>,
    pub aspect_ratio: Option<String>,
}

impl WindowOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_preset(mut self, preset: PresetSize) -> Self {
        self.preset = Some(preset);
        self
    }

    pub fn with_size(mut self, w: f64, h: f64) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    /// Explicit size wins over the preset, which wins over the default.
    /// Results are raised to the minimum window size.
    pub(crate) fn resolved_size(&self) -> (f64, f64) {
        let (preset_w, preset_h) = self
            .preset
            .map(|p| (p.width, p.height))
            .unwrap_or((DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT));
        let w = self.w.filter(|v| v.is_finite()).unwrap_or(preset_w);
        let h = self.h.filter(|v| v.is_finite()).unwrap_or(preset_h);
        (w.max(MIN_WINDOW_WIDTH), h.max(MIN_WINDOW_HEIGHT))
    }

    /// Blank titles fall back to the URL.
    pub(crate) fn resolved_title(&self, url: &str) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => url.to_string(),
        }
    }

    pub(crate) fn resolved_aspect_ratio(&self) -> String {
        self.aspect_ratio
            .clone()
            .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string())
    }
}

pub(crate) fn default_device_profile() -> String {
    DEFAULT_DEVICE_PROFILE.to_string()
}
