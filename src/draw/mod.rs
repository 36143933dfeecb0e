//! Raster drawing primitives and the drawing surface abstraction.
//!
//! This module defines the drawing types behind the sketch surface:
//! - [`Color`]: RGBA color representation with predefined palette constants
//! - [`Brush`]: the pencil/eraser settings applied to new strokes
//! - [`Frame`]: the stroke history that backs undo and clear
//! - [`DrawingSurface`]: the collaborator the interaction controller drives
//! - [`Canvas`]: the in-memory surface implementation
//! - Rendering functions that rasterize strokes and the live selection overlay

pub mod canvas;
pub mod color;
pub mod frame;
pub mod render;
pub mod stroke;
pub mod surface;

/// Owned 8-bit RGBA raster buffer passed between pipeline stages.
pub type Bitmap = image::RgbaImage;

pub use canvas::Canvas;
pub use color::Color;
pub use frame::Frame;
pub use render::{SelectionOverlay, paint_selection, render_strokes};
pub use stroke::Stroke;
pub use surface::{Brush, DrawingSurface, Snapshot};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
