//! The discrete zoom ladder.

/// Every zoom level the workspace may hold after `set_zoom`, ascending.
pub const ZOOM_LEVELS: [f64; 8] = [0.5, 0.67, 0.8, 0.9, 1.0, 1.1, 1.25, 1.5];

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 1.5;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Snap `requested` to the nearest ladder level.
///
/// Ties go to the lower level (first candidate in ascending order). Infinite
/// requests land on the nearest end of the ladder. Returns `None` for NaN,
/// which has no nearest level.
pub fn snap_zoom(requested: f64) -> Option<f64> {
    if requested.is_nan() {
        return None;
    }
    let requested = requested.clamp(ZOOM_MIN, ZOOM_MAX);
    let mut best = ZOOM_LEVELS[0];
    for &candidate in ZOOM_LEVELS.iter().skip(1) {
        if (candidate - requested).abs() < (best - requested).abs() {
            best = candidate;
        }
    }
    Some(best)
}

/// Move `steps` rungs up (positive) or down the ladder from the level
/// nearest `current`, stopping at either end.
pub fn step_zoom(current: f64, steps: i32) -> f64 {
    let here = snap_zoom(current).unwrap_or(DEFAULT_ZOOM);
    let index = ZOOM_LEVELS.iter().position(|&z| z == here).unwrap_or(0) as i64;
    let last = ZOOM_LEVELS.len() as i64 - 1;
    let target = (index + i64::from(steps)).clamp(0, last) as usize;
    ZOOM_LEVELS.get(target).copied().unwrap_or(here)
}

/// Clamp a persisted zoom into range without snapping it to the ladder.
///
/// Missing, zero and non-numeric values fall back to [`DEFAULT_ZOOM`].
pub fn clamp_zoom(stored: Option<f64>) -> f64 {
    match stored {
        Some(z) if z.is_finite() && z != 0.0 => z.clamp(ZOOM_MIN, ZOOM_MAX),
        _ => DEFAULT_ZOOM,
    }
}

/// Whether `zoom` is exactly one of the ladder levels.
pub fn is_ladder_level(zoom: f64) -> bool {
    ZOOM_LEVELS.contains(&zoom)
}
