//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What happens when the pointer leaves the viewport during a selection drag.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PointerLeavePolicy {
    /// Treat leaving as releasing the pointer: the selection is finished and
    /// the confirm prompt is shown.
    #[default]
    Finish,
    /// Abandon the capture session and return to drawing.
    Cancel,
}

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// pencil_color = "black"
///
/// # Custom RGB color (0-255 per component)
/// pencil_color = [40, 40, 160]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// Unknown color names fall back to `fallback` with a warning.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using fallback", name);
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::rgb(
                f64::from(*r) / 255.0,
                f64::from(*g) / 255.0,
                f64::from(*b) / 255.0,
            ),
        }
    }

    /// Converts with black as the fallback for unknown names.
    pub fn to_color(&self) -> Color {
        self.to_color_or(BLACK)
    }

    pub fn name(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_rgb_specs_convert() {
        assert_eq!(ColorSpec::name("white").to_color(), WHITE);
        assert_eq!(ColorSpec::Rgb([255, 0, 0]).to_color(), RED);
    }

    #[test]
    fn unknown_name_uses_fallback() {
        assert_eq!(ColorSpec::name("mauve").to_color_or(BLUE), BLUE);
    }

    #[test]
    fn pointer_leave_policy_parses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: PointerLeavePolicy,
        }
        let parsed: Wrapper = toml::from_str("policy = \"cancel\"").unwrap();
        assert_eq!(parsed.policy, PointerLeavePolicy::Cancel);
    }
}
