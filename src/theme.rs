use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// CSS custom properties the host should apply for this theme.
    ///
    /// The store never touches the environment itself; a host polls
    /// [`crate::store::Store::take_theme_change`] and applies this palette.
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                bg: "#0f0f0f",
                surface: "#1a1a1a",
                text: "#ffffff",
                muted: "#666666",
                border: "#333333",
                accent: ACCENT,
                overlay: "rgba(0, 0, 0, 0.8)",
            },
            Theme::Light => Palette {
                bg: "#ffffff",
                surface: "#f8f9fa",
                text: "#000000",
                muted: "#6b7280",
                border: "#e5e7eb",
                accent: ACCENT,
                overlay: "rgba(0, 0, 0, 0.1)",
            },
        }
    }
}

const ACCENT: &str = "#3b82f6";

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}` (expected light or dark)")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

/// Resolved colour values for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub overlay: &'static str,
}

impl Palette {
    /// `(css variable, value)` pairs in a stable order.
    pub fn css_vars(&self) -> [(&'static str, &'static str); 7] {
        [
            ("--bg", self.bg),
            ("--surface", self.surface),
            ("--text", self.text),
            ("--muted", self.muted),
            ("--border", self.border),
            ("--accent", self.accent),
            ("--overlay", self.overlay),
        ]
    }
}
