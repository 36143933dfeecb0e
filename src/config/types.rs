//! Configuration type definitions.

use super::enums::{ColorSpec, PointerLeavePolicy};
use crate::capture::file::{FileSaveConfig, expand_tilde};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brush presets applied by the tool menu.
///
/// `Pencil` switches to the pencil preset and `Eraser` to the eraser preset.
/// The eraser paints with its color rather than removing ink, so it should
/// match the export background.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Pencil ink color - a named color or an RGB array like `[0, 0, 0]`
    #[serde(default = "default_pencil_color")]
    pub pencil_color: ColorSpec,

    /// Pencil radius in pixels (valid range: 0.5 - 100.0)
    #[serde(default = "default_pencil_radius")]
    pub pencil_radius: f64,

    /// Eraser color
    #[serde(default = "default_eraser_color")]
    pub eraser_color: ColorSpec,

    /// Eraser radius in pixels (valid range: 0.5 - 100.0)
    #[serde(default = "default_eraser_radius")]
    pub eraser_radius: f64,

    /// Maximum strokes kept on the canvas (0 = unlimited)
    #[serde(default)]
    pub max_strokes: usize,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            pencil_color: default_pencil_color(),
            pencil_radius: default_pencil_radius(),
            eraser_color: default_eraser_color(),
            eraser_radius: default_eraser_radius(),
            max_strokes: 0,
        }
    }
}

/// Region selection behaviour and overlay styling.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SelectionConfig {
    /// What a pointer leaving the viewport mid-drag does ("finish" or "cancel")
    #[serde(default)]
    pub on_pointer_leave: PointerLeavePolicy,

    /// Dashed border color of the live selection rectangle
    #[serde(default = "default_border_color")]
    pub border_color: ColorSpec,

    /// Border width in pixels (valid range: 1 - 10)
    #[serde(default = "default_border_width")]
    pub border_width: u32,

    /// Dash length in pixels (valid range: 1 - 64)
    #[serde(default = "default_dash_length")]
    pub dash_length: u32,

    /// Opacity of the black tint inside the selection (0.0 - 1.0)
    #[serde(default = "default_fill_alpha")]
    pub fill_alpha: f64,

    /// Gap between the selection's bottom-right corner and the confirm prompt
    /// (valid range: 0 - 200)
    #[serde(default = "default_prompt_margin")]
    pub prompt_margin: i32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            on_pointer_leave: PointerLeavePolicy::default(),
            border_color: default_border_color(),
            border_width: default_border_width(),
            dash_length: default_dash_length(),
            fill_alpha: default_fill_alpha(),
            prompt_margin: default_prompt_margin(),
        }
    }
}

/// Export destination and output settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory exports are written to (`~/` is expanded)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Name offered for region exports
    #[serde(default = "default_selection_filename")]
    pub selection_filename: String,

    /// Name offered for whole-canvas exports
    #[serde(default = "default_canvas_filename")]
    pub canvas_filename: String,

    /// Append a timestamp to exported filenames
    #[serde(default)]
    pub timestamped: bool,

    /// Opaque fill behind exported pixels
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            selection_filename: default_selection_filename(),
            canvas_filename: default_canvas_filename(),
            timestamped: false,
            background_color: default_background_color(),
        }
    }
}

impl ExportConfig {
    /// File sink settings derived from this section.
    pub fn file_save_config(&self) -> FileSaveConfig {
        FileSaveConfig {
            save_directory: expand_tilde(&self.directory),
            timestamped: self.timestamped,
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_pencil_color() -> ColorSpec {
    ColorSpec::name("black")
}

fn default_pencil_radius() -> f64 {
    2.0
}

fn default_eraser_color() -> ColorSpec {
    ColorSpec::name("white")
}

fn default_eraser_radius() -> f64 {
    10.0
}

fn default_border_color() -> ColorSpec {
    ColorSpec::name("black")
}

fn default_border_width() -> u32 {
    2
}

fn default_dash_length() -> u32 {
    6
}

fn default_fill_alpha() -> f64 {
    0.1
}

fn default_prompt_margin() -> i32 {
    12
}

pub(super) fn default_export_directory() -> String {
    "~/Pictures/Sketchboard".to_string()
}

pub(super) fn default_selection_filename() -> String {
    "selection.png".to_string()
}

pub(super) fn default_canvas_filename() -> String {
    "drawing.png".to_string()
}

fn default_background_color() -> ColorSpec {
    ColorSpec::name("white")
}
