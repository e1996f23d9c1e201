//! Editor settings.

use crate::snap::{DEFAULT_GRID_SPACING, GUIDE_THRESHOLD, SnapSettings, VERTEX_SNAP_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Smallest width, height or radius accepted from an interactive resize.
pub const MIN_RESIZE: f64 = 5.0;

/// Smallest width, height or radius property panels should write.
pub const MIN_EDIT_SIZE: f64 = 1.0;

/// User-tunable editor behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    pub grid_spacing: f64,
    pub show_grid: bool,
    pub snap_enabled: bool,
    pub guide_threshold: f64,
    pub vertex_threshold: f64,
    pub min_resize: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_spacing: DEFAULT_GRID_SPACING,
            show_grid: true,
            snap_enabled: true,
            guide_threshold: GUIDE_THRESHOLD,
            vertex_threshold: VERTEX_SNAP_THRESHOLD,
            min_resize: MIN_RESIZE,
        }
    }
}

impl EditorSettings {
    /// Deserialize settings from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Snap configuration derived from these settings.
    pub fn snap_settings(&self) -> SnapSettings {
        SnapSettings {
            grid_enabled: self.show_grid,
            grid_spacing: self.grid_spacing,
            guides_enabled: self.snap_enabled,
            guide_threshold: self.guide_threshold,
            vertex_threshold: self.vertex_threshold,
        }
    }
}

/// Clamp a property-panel size to [`MIN_EDIT_SIZE`].
pub fn clamp_edit_size(value: f64) -> f64 {
    if value.is_finite() { value.max(MIN_EDIT_SIZE) } else { MIN_EDIT_SIZE }
}
