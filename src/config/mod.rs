//! Configuration file support for sketchboard.
//!
//! Settings are read from `~/.config/sketchboard/config.toml`: brush presets
//! for the tool menu, selection behaviour and overlay styling, and where and
//! how exports are written.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::{ColorSpec, PointerLeavePolicy};
pub use types::{BrushConfig, ExportConfig, SelectionConfig};

use crate::draw::{Brush, WHITE, color::BLACK};
use crate::input::ControllerSettings;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [brush]
/// pencil_color = "black"
/// pencil_radius = 2.0
/// eraser_radius = 10.0
///
/// [selection]
/// on_pointer_leave = "finish"
///
/// [export]
/// directory = "~/Pictures/Sketchboard"
/// selection_filename = "selection.png"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, schemars::JsonSchema)]
pub struct Config {
    /// Tool menu brush presets
    #[serde(default)]
    pub brush: BrushConfig,

    /// Region selection settings
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or reset to the
    /// default for strings) and a warning is logged.
    ///
    /// Validated ranges:
    /// - brush radii: 0.5 - 100.0
    /// - `selection.border_width`: 1 - 10
    /// - `selection.dash_length`: 1 - 64
    /// - `selection.fill_alpha`: 0.0 - 1.0
    /// - `selection.prompt_margin`: 0 - 200
    pub(crate) fn validate_and_clamp(&mut self) {
        for (label, radius) in [
            ("pencil_radius", &mut self.brush.pencil_radius),
            ("eraser_radius", &mut self.brush.eraser_radius),
        ] {
            let value = *radius;
            if !(0.5..=100.0).contains(&value) {
                log::warn!(
                    "Invalid {} {:.1}, clamping to 0.5-100.0 range",
                    label,
                    value
                );
                // NaN fails `contains` but survives `clamp`
                *radius = if value.is_nan() {
                    2.0
                } else {
                    value.clamp(0.5, 100.0)
                };
            }
        }

        if !(1..=10).contains(&self.selection.border_width) {
            log::warn!(
                "Invalid border_width {}, clamping to 1-10 range",
                self.selection.border_width
            );
            self.selection.border_width = self.selection.border_width.clamp(1, 10);
        }

        if !(1..=64).contains(&self.selection.dash_length) {
            log::warn!(
                "Invalid dash_length {}, clamping to 1-64 range",
                self.selection.dash_length
            );
            self.selection.dash_length = self.selection.dash_length.clamp(1, 64);
        }

        if !(0.0..=1.0).contains(&self.selection.fill_alpha) {
            log::warn!(
                "Invalid fill_alpha {:.3}, clamping to 0.0-1.0",
                self.selection.fill_alpha
            );
            self.selection.fill_alpha = if self.selection.fill_alpha.is_nan() {
                0.1
            } else {
                self.selection.fill_alpha.clamp(0.0, 1.0)
            };
        }

        if !(0..=200).contains(&self.selection.prompt_margin) {
            log::warn!(
                "Invalid prompt_margin {}, clamping to 0-200 range",
                self.selection.prompt_margin
            );
            self.selection.prompt_margin = self.selection.prompt_margin.clamp(0, 200);
        }

        for (label, name, fallback) in [
            (
                "selection_filename",
                &mut self.export.selection_filename,
                types::default_selection_filename(),
            ),
            (
                "canvas_filename",
                &mut self.export.canvas_filename,
                types::default_canvas_filename(),
            ),
        ] {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                log::warn!("Invalid {} '{}', falling back to '{}'", label, name, fallback);
                *name = fallback;
            }
        }

        if self.export.directory.trim().is_empty() {
            log::warn!("Empty export directory, falling back to the default");
            self.export.directory = types::default_export_directory();
        }
    }

    /// Settings for the interaction controller.
    pub fn controller_settings(&self) -> ControllerSettings {
        let selection = &self.selection;
        ControllerSettings {
            pencil: Brush::new(
                self.brush.pencil_color.to_color_or(BLACK),
                self.brush.pencil_radius,
            ),
            eraser: Brush::new(
                self.brush.eraser_color.to_color_or(WHITE),
                self.brush.eraser_radius,
            ),
            pointer_leave: selection.on_pointer_leave,
            border_color: selection.border_color.to_color_or(BLACK),
            border_width: selection.border_width,
            dash_length: selection.dash_length,
            fill_color: BLACK.with_alpha(selection.fill_alpha),
            prompt_margin: selection.prompt_margin,
            selection_filename: self.export.selection_filename.clone(),
            canvas_filename: self.export.canvas_filename.clone(),
            background: self.export.background_color.to_color_or(WHITE),
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Writes a documented default config file to the default location.
    ///
    /// # Errors
    /// Returns an error if a config file already exists or cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
