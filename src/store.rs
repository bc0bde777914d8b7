//! The single source of truth for the open workspace.
//!
//! A [`Store`] is owned by whatever composes the application and handed by
//! reference to the pieces that read or mutate it. Every mutation goes through
//! the methods here; each runs to completion synchronously and is visible to
//! the next reader immediately.

use crate::constants::{CREATION_OFFSET_ORIGIN, CREATION_OFFSET_STEP};
use crate::persistence::{KeyValueStore, WorkspaceStorage};
use crate::theme::Theme;
use crate::window::{
    Window, WindowId, WindowOptions, WindowPatch, default_device_profile, normalize_url,
    preset_by_name, validate_url,
};
use crate::workspace::Workspace;
use crate::zoom::snap_zoom;

#[derive(Debug, Default)]
pub struct Store {
    workspace: Workspace,
    selected: Option<WindowId>,
    // Not persisted; rebuilt from the windows whenever a workspace is swapped in.
    max_z: i64,
    theme_dirty: bool,
    revision: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn window(&self, id: &WindowId) -> Option<&Window> {
        self.workspace.window(id)
    }

    pub fn windows(&self) -> &[Window] {
        &self.workspace.windows
    }

    pub fn selected_window_id(&self) -> Option<&WindowId> {
        self.selected.as_ref()
    }

    pub fn selected_window(&self) -> Option<&Window> {
        self.selected.as_ref().and_then(|id| self.workspace.window(id))
    }

    pub fn zoom(&self) -> f64 {
        self.workspace.zoom
    }

    pub fn theme(&self) -> Theme {
        self.workspace.theme
    }

    /// Current top of the stacking counter.
    pub fn max_z(&self) -> i64 {
        self.max_z
    }

    /// Bumped on every effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Next stacking value, strictly above every window. When the counter
    /// would overflow, existing windows are renumbered first.
    fn next_z(&mut self) -> i64 {
        if self.max_z == i64::MAX {
            self.max_z = self.workspace.compact_z();
            tracing::warn!(top = self.max_z, "stacking counter exhausted; renumbered windows");
        }
        self.max_z += 1;
        self.max_z
    }

    fn fresh_id(&self) -> WindowId {
        loop {
            let id = WindowId::generate();
            if !self.workspace.contains(&id) {
                return id;
            }
        }
    }

    /// Open a new window on `url` and select it.
    ///
    /// The URL is normalized (`https://` added to bare hosts) and must then be
    /// a valid web URL; otherwise nothing happens and `None` is returned.
    pub fn add_window(&mut self, url: &str, options: WindowOptions) -> Option<WindowId> {
        let url = normalize_url(url);
        if !validate_url(&url) {
            tracing::warn!(url = %url, "rejecting window with invalid url");
            return None;
        }
        let count = self.workspace.windows.len() as f64;
        let offset = CREATION_OFFSET_ORIGIN + count * CREATION_OFFSET_STEP;
        let (w, h) = options.resolved_size();
        let id = self.fresh_id();
        let z = self.next_z();
        let window = Window {
            id: id.clone(),
            title: options.resolved_title(&url),
            url,
            x: offset,
            y: offset,
            w,
            h,
            z,
            pinned: None,
            refresh_sec: None,
            aspect_ratio: options.resolved_aspect_ratio(),
            device_profile: default_device_profile(),
        };
        tracing::debug!(window_id = %id, z, x = offset, y = offset, "opened window");
        self.workspace.windows.push(window);
        self.selected = Some(id.clone());
        self.touch();
        Some(id)
    }

    /// Merge `patch` into the window `id`. Unknown ids are ignored.
    ///
    /// A URL in the patch goes through the same normalization and validation
    /// as [`Store::add_window`]; an invalid one is dropped from the patch.
    pub fn update_window(&mut self, id: &WindowId, patch: WindowPatch) -> bool {
        let mut patch = patch;
        if let Some(raw) = patch.url.take() {
            let url = normalize_url(&raw);
            if validate_url(&url) {
                patch.url = Some(url);
            } else {
                tracing::warn!(window_id = %id, url = %raw, "ignoring invalid url in patch");
            }
        }
        let Some(window) = self.workspace.window_mut(id) else {
            tracing::trace!(window_id = %id, "update for unknown window ignored");
            return false;
        };
        let changed = window.apply(&patch);
        if changed {
            self.touch();
        }
        changed
    }

    /// Close window `id`, clearing the selection if it pointed at it.
    pub fn remove_window(&mut self, id: &WindowId) -> bool {
        let before = self.workspace.windows.len();
        self.workspace.windows.retain(|w| &w.id != id);
        if self.workspace.windows.len() == before {
            return false;
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        tracing::debug!(window_id = %id, "closing window");
        self.touch();
        true
    }

    /// Raise window `id` strictly above every other window and select it.
    pub fn bring_to_front(&mut self, id: &WindowId) -> bool {
        if !self.workspace.contains(id) {
            return false;
        }
        let z = self.next_z();
        if let Some(window) = self.workspace.window_mut(id) {
            window.z = z;
        }
        self.selected = Some(id.clone());
        tracing::trace!(window_id = %id, z, "raised window");
        self.touch();
        true
    }

    /// Store the ladder level nearest `requested` and return it.
    pub fn set_zoom(&mut self, requested: f64) -> f64 {
        let Some(zoom) = snap_zoom(requested) else {
            tracing::warn!(requested, "ignoring NaN zoom request");
            return self.workspace.zoom;
        };
        if zoom != self.workspace.zoom {
            tracing::debug!(requested, zoom, "zoom changed");
            self.workspace.zoom = zoom;
            self.touch();
        }
        zoom
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.workspace.theme == theme {
            return;
        }
        self.workspace.theme = theme;
        self.theme_dirty = true;
        self.touch();
    }

    /// The theme to apply to the environment, once per change.
    pub fn take_theme_change(&mut self) -> Option<Theme> {
        if self.theme_dirty {
            self.theme_dirty = false;
            Some(self.workspace.theme)
        } else {
            None
        }
    }

    pub fn set_selected_window(&mut self, id: Option<WindowId>) {
        if self.selected != id {
            self.selected = id;
            self.touch();
        }
    }

    /// Resize window `id` to the named viewport preset.
    pub fn resize_to_preset(&mut self, id: &WindowId, preset: &str) -> bool {
        let Some(preset) = preset_by_name(preset) else {
            tracing::warn!(preset, "unknown viewport preset");
            return false;
        };
        self.update_window(id, WindowPatch::size(preset.width, preset.height))
    }

    /// Swap in a whole workspace, rebuilding the stacking counter from it.
    pub fn replace_workspace(&mut self, workspace: Workspace) {
        if workspace.theme != self.workspace.theme {
            self.theme_dirty = true;
        }
        self.max_z = workspace.max_z();
        self.workspace = workspace;
        if let Some(selected) = &self.selected
            && !self.workspace.contains(selected)
        {
            self.selected = None;
        }
        self.touch();
    }

    /// Persist the current workspace. Failures are logged and leave the
    /// previously stored record in place.
    pub fn save<S: KeyValueStore>(&self, storage: &mut WorkspaceStorage<S>) -> bool {
        storage.save(&self.workspace)
    }

    /// Replace the workspace with the stored one, if any.
    pub fn load<S: KeyValueStore>(&mut self, storage: &WorkspaceStorage<S>) -> bool {
        match storage.load() {
            Some(workspace) => {
                tracing::debug!(
                    windows = workspace.windows.len(),
                    zoom = workspace.zoom,
                    "loaded workspace"
                );
                self.replace_workspace(workspace);
                true
            }
            None => false,
        }
    }

    /// Startup load. Keeps the defaults when nothing is stored.
    pub fn initialize<S: KeyValueStore>(&mut self, storage: &WorkspaceStorage<S>) -> bool {
        let loaded = self.load(storage);
        if !loaded {
            tracing::debug!("no stored workspace; starting from defaults");
        }
        loaded
    }
}
