//! Utility functions for colors and selection geometry.
//!
//! This module provides:
//! - Color name mapping used by the configuration system
//! - Viewport points and the normalized selection rectangle
//! - Rectangle clamping against bitmap bounds

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Maps a Color value to its human-readable name.
///
/// Uses approximate matching (threshold-based) to identify colors.
/// Returns "Custom" if the color doesn't match any predefined color.
pub fn color_to_name(color: &Color) -> &'static str {
    if color.r > 0.9 && color.g > 0.9 && color.b > 0.9 {
        "White"
    } else if color.r < 0.1 && color.g < 0.1 && color.b < 0.1 {
        "Black"
    } else if color.r > 0.9 && color.g < 0.1 && color.b < 0.1 {
        "Red"
    } else if color.r < 0.1 && color.g > 0.9 && color.b < 0.1 {
        "Green"
    } else if color.r < 0.1 && color.g < 0.1 && color.b > 0.9 {
        "Blue"
    } else {
        "Custom"
    }
}

// ============================================================================
// Selection Geometry
// ============================================================================

/// A pointer position in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Largest accepted viewport side, in pixels.
///
/// Keeps a full-viewport RGBA buffer under 1 GiB.
pub const MAX_VIEWPORT_DIMENSION: u32 = 16_384;

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The rectangle covering the whole viewport.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Whether both sides are within [`MAX_VIEWPORT_DIMENSION`].
    pub fn is_supported(&self) -> bool {
        self.width <= MAX_VIEWPORT_DIMENSION && self.height <= MAX_VIEWPORT_DIMENSION
    }
}

/// Axis-aligned rectangle with a top-left origin and non-negative size.
///
/// Selection rectangles are never stored; they are derived from the two
/// gesture points with [`Rect::from_points`] whenever they are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Normalizes a drag between two points, whichever direction it went.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        i64::from(self.left) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        i64::from(self.top) + i64::from(self.height)
    }

    /// Returns true if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersection of two rectangles.
    ///
    /// Disjoint rectangles yield a zero-size rectangle anchored at the
    /// clamped origin rather than `None`, so callers can keep working with
    /// a plain `Rect` and check [`Rect::is_empty`].
    pub fn intersect(&self, other: &Rect) -> Rect {
        let left = i64::from(self.left).max(i64::from(other.left));
        let top = i64::from(self.top).max(i64::from(other.top));
        let right = self.right().min(other.right()).max(left);
        let bottom = self.bottom().min(other.bottom()).max(top);

        // Both origins come from i32 fields, so the max stays in range.
        Rect {
            left: left as i32,
            top: top as i32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        }
    }

    /// Restricts the rectangle to `[0, width] x [0, height]`.
    pub fn clamp_to(&self, width: u32, height: u32) -> Rect {
        let bounds = Rect::new(0, 0, width, height);
        let clamped = self.intersect(&bounds);
        if clamped.is_empty() {
            // Keep the origin inside the bounds for fully out-of-range input.
            Rect {
                left: clamped.left.clamp(0, i32::try_from(width).unwrap_or(i32::MAX)),
                top: clamped.top.clamp(0, i32::try_from(height).unwrap_or(i32::MAX)),
                ..clamped
            }
        } else {
            clamped
        }
    }
}
