//! Lenient decoding of stored workspace records.
//!
//! The stored record has no schema version. Every field is optional on the
//! way in and falls back to a fixed default, so records written by older or
//! newer builds (or corrupted by hand) still load.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::constants::{
    DEFAULT_ASPECT_RATIO, DEFAULT_DEVICE_PROFILE, DEFAULT_WORKSPACE_ID, DEFAULT_WORKSPACE_NAME,
};
use crate::theme::Theme;
use crate::window::{Window, WindowId};
use crate::workspace::Workspace;
use crate::zoom::clamp_zoom;

use super::PersistError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WindowRecord {
    id: WindowId,
    #[serde(default)]
    title: Option<String>,
    url: String,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    #[serde(default)]
    z: i64,
    #[serde(default)]
    pinned: Option<bool>,
    #[serde(default, deserialize_with = "refresh_interval")]
    refresh_sec: Option<Option<f64>>,
    #[serde(default)]
    aspect_ratio: Option<String>,
    #[serde(default)]
    device_profile: Option<String>,
}

// Keeps `null` distinct from an absent field: absent stays `None` through
// `default`, `null` becomes `Some(None)`. A value that is neither a number
// nor null is dropped on its own instead of failing the whole window.
fn refresh_interval<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Some(None),
        Value::Number(n) => n.as_f64().map(Some),
        other => {
            tracing::warn!(value = %other, "ignoring non-numeric stored refreshSec");
            None
        }
    })
}

impl From<WindowRecord> for Window {
    fn from(record: WindowRecord) -> Self {
        let title = record
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| record.url.clone());
        Window {
            id: record.id,
            title,
            url: record.url,
            x: record.x,
            y: record.y,
            w: record.w,
            h: record.h,
            z: record.z,
            pinned: record.pinned,
            refresh_sec: record.refresh_sec,
            aspect_ratio: record
                .aspect_ratio
                .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string()),
            device_profile: record
                .device_profile
                .unwrap_or_else(|| DEFAULT_DEVICE_PROFILE.to_string()),
        }
    }
}

fn non_empty_str(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Rebuild a [`Workspace`] from parsed JSON, defaulting whatever is missing.
///
/// Only a non-object top level is an error. Window entries that cannot be
/// decoded, and repeats of an id already seen, are dropped with a warning.
pub(crate) fn decode_workspace(value: Value) -> Result<Workspace, PersistError> {
    let Value::Object(map) = value else {
        return Err(PersistError::NotAnObject);
    };

    let theme = match map.get("theme").and_then(Value::as_str) {
        Some(raw) => raw.parse::<Theme>().unwrap_or_else(|_| {
            tracing::warn!(theme = raw, "unknown stored theme; using light");
            Theme::Light
        }),
        None => Theme::Light,
    };

    let mut seen = HashSet::new();
    let windows = match map.get("windows").and_then(Value::as_array) {
        Some(entries) => entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                match serde_json::from_value::<WindowRecord>(entry.clone()) {
                    Ok(record) => Some(Window::from(record)),
                    Err(err) => {
                        tracing::warn!(index, error = %err, "dropping malformed stored window");
                        None
                    }
                }
            })
            .filter(|window| {
                let fresh = seen.insert(window.id.clone());
                if !fresh {
                    tracing::warn!(window_id = %window.id, "dropping duplicate stored window");
                }
                fresh
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(Workspace {
        workspace_id: non_empty_str(&map, "workspaceId")
            .unwrap_or_else(|| DEFAULT_WORKSPACE_ID.to_string()),
        name: non_empty_str(&map, "name").unwrap_or_else(|| DEFAULT_WORKSPACE_NAME.to_string()),
        zoom: clamp_zoom(map.get("zoom").and_then(Value::as_f64)),
        theme,
        windows,
    })
}
