//! The drawing surface collaborator and the values it exchanges.

use super::color::{BLACK, Color, WHITE};
use crate::capture::CaptureError;
use crate::util::{Point, Viewport};

/// Brush settings applied to newly started strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color,
    /// Stroke radius in pixels
    pub radius: f64,
}

impl Brush {
    pub const fn new(color: Color, radius: f64) -> Self {
        Self { color, radius }
    }

    /// Thin black ink.
    pub const fn pencil() -> Self {
        Self::new(BLACK, 2.0)
    }

    /// Wide white ink that paints over existing strokes.
    pub const fn eraser() -> Self {
        Self::new(WHITE, 10.0)
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::pencil()
    }
}

/// Encoded (PNG) image of the surface taken at one instant.
///
/// Taking the snapshot is synchronous and cheap; turning it back into a
/// [`Bitmap`](super::Bitmap) is the asynchronous decode step of the export path.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot(Vec<u8>);

impl Snapshot {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Snapshot({} bytes)", self.0.len())
    }
}

/// A persistent freehand drawing surface.
///
/// The interaction controller only ever talks to the surface through this
/// trait. Pointer events are forwarded while the controller is in drawing
/// mode; implementations must ignore them while input is disabled.
pub trait DrawingSurface: Send {
    /// Removes the most recent stroke.
    fn undo(&mut self);

    /// Removes every stroke.
    fn clear(&mut self);

    /// Sets the brush used by subsequent strokes.
    fn set_brush(&mut self, brush: Brush);

    /// Enables or disables pointer input.
    fn set_input_enabled(&mut self, enabled: bool);

    fn input_enabled(&self) -> bool;

    /// Applies new viewport dimensions.
    fn resize(&mut self, viewport: Viewport);

    /// Encodes the current contents.
    fn export_image(&self) -> Result<Snapshot, CaptureError>;

    fn stroke_begin(&mut self, _point: Point) {}

    fn stroke_extend(&mut self, _point: Point) {}

    fn stroke_end(&mut self) {}
}
