use std::fmt;

/// Discrete keyboard actions the workspace understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Selected-window nudges
    NudgeUp,
    NudgeDown,
    NudgeLeft,
    NudgeRight,
    ClearSelection,
    // Canvas zoom
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::NudgeUp => "Nudge selected window up",
            Action::NudgeDown => "Nudge selected window down",
            Action::NudgeLeft => "Nudge selected window left",
            Action::NudgeRight => "Nudge selected window right",
            Action::ClearSelection => "Clear selection (Esc)",
            Action::ZoomIn => "Zoom in",
            Action::ZoomOut => "Zoom out",
            Action::ZoomReset => "Reset zoom",
        };
        write!(f, "{}", s)
    }
}
