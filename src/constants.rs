//! Shared crate-wide constants.

/// Storage key the whole workspace record lives under.
pub const WORKSPACE_STORAGE_KEY: &str = "wiw:workspace:default";

/// Identity of the single workspace instance.
pub const DEFAULT_WORKSPACE_ID: &str = "default";
pub const DEFAULT_WORKSPACE_NAME: &str = "Default Workspace";

/// Size given to a new window when the caller supplies neither a size nor a
/// preset. Matches the first viewport preset.
pub const DEFAULT_WINDOW_WIDTH: f64 = 360.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 640.0;

/// Smallest window the renderer's resize contract allows, in model units.
///
/// The store only clamps caller-supplied creation sizes against these; the
/// resize gesture itself is bounded by the renderer.
pub const MIN_WINDOW_WIDTH: f64 = 200.0;
pub const MIN_WINDOW_HEIGHT: f64 = 300.0;

/// Position of the first window created in an empty workspace, in model
/// units. Every further window is shifted by [`CREATION_OFFSET_STEP`] on both
/// axes per window already present, so stacked windows stay staggered.
pub const CREATION_OFFSET_ORIGIN: f64 = 50.0;
pub const CREATION_OFFSET_STEP: f64 = 30.0;

/// Distance a keyboard nudge moves the selected window, in model units.
pub const NUDGE_STEP: f64 = 8.0;

pub const DEFAULT_ASPECT_RATIO: &str = "9:16";
pub const DEFAULT_DEVICE_PROFILE: &str = "mobile-portrait";

/// Prefix of generated window ids.
pub const WINDOW_ID_PREFIX: &str = "win_";
