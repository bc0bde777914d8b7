use serde::Serialize;

use crate::constants::{DEFAULT_WORKSPACE_ID, DEFAULT_WORKSPACE_NAME};
use crate::theme::Theme;
use crate::window::{Window, WindowId};
use crate::zoom::DEFAULT_ZOOM;

/// The whole persisted arrangement.
///
/// `windows` keeps creation order; stacking is decided by each window's `z`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub workspace_id: String,
    pub name: String,
    pub zoom: f64,
    pub theme: Theme,
    pub windows: Vec<Window>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            workspace_id: DEFAULT_WORKSPACE_ID.to_string(),
            name: DEFAULT_WORKSPACE_NAME.to_string(),
            zoom: DEFAULT_ZOOM,
            theme: Theme::default(),
            windows: Vec::new(),
        }
    }
}

impl Workspace {
    pub fn window(&self, id: &WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| &w.id == id)
    }

    pub(crate) fn window_mut(&mut self, id: &WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| &w.id == id)
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.window(id).is_some()
    }

    /// Highest `z` in use, never below zero.
    pub fn max_z(&self) -> i64 {
        self.windows.iter().map(|w| w.z).fold(0, i64::max)
    }

    /// Windows bottom-to-top. Equal `z` keeps creation order.
    pub fn windows_by_stack(&self) -> Vec<&Window> {
        let mut ordered: Vec<&Window> = self.windows.iter().collect();
        ordered.sort_by_key(|w| w.z);
        ordered
    }

    /// Renumber `z` to `1..=n` in stacking order and return the new top.
    /// Relative order, ties included, is unchanged.
    pub(crate) fn compact_z(&mut self) -> i64 {
        let mut order: Vec<usize> = (0..self.windows.len()).collect();
        order.sort_by_key(|&i| self.windows[i].z);
        for (rank, index) in order.into_iter().enumerate() {
            self.windows[index].z = rank as i64 + 1;
        }
        self.windows.len() as i64
    }

    pub fn topmost(&self) -> Option<&Window> {
        self.windows_by_stack().last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_workspace_is_empty_light_unzoomed() {
        let ws = Workspace::default();
        assert_eq!(ws.workspace_id, "default");
        assert_eq!(ws.name, "Default Workspace");
        assert_eq!(ws.zoom, 1.0);
        assert_eq!(ws.theme, Theme::Light);
        assert!(ws.windows.is_empty());
        assert_eq!(ws.max_z(), 0);
        assert!(ws.topmost().is_none());
    }

    #[test]
    fn compaction_keeps_stacking_order() {
        let mut ws = Workspace::default();
        for (id, z) in [("a", i64::MAX), ("b", -4), ("c", 40)] {
            ws.windows.push(Window {
                id: WindowId::from(id),
                title: id.to_string(),
                url: format!("https://{id}.example"),
                x: 0.0,
                y: 0.0,
                w: 360.0,
                h: 640.0,
                z,
                pinned: None,
                refresh_sec: None,
                aspect_ratio: "9:16".to_string(),
                device_profile: "mobile-portrait".to_string(),
            });
        }
        assert_eq!(ws.compact_z(), 3);
        let zs: Vec<i64> = ws.windows.iter().map(|w| w.z).collect();
        assert_eq!(zs, vec![3, 1, 2]);
    }
}
