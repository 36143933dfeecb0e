//! In-memory raster implementation of [`DrawingSurface`].

use std::io::Cursor;

use image::ImageFormat;

use super::{
    Bitmap,
    frame::Frame,
    render::render_strokes,
    stroke::Stroke,
    surface::{Brush, DrawingSurface, Snapshot},
};
use crate::capture::CaptureError;
use crate::util::{MAX_VIEWPORT_DIMENSION, Point, Viewport};

/// Freehand canvas backed by a stroke history.
///
/// Strokes are rasterized on demand onto a transparent background, the same
/// way a browser canvas exports only what was drawn. Making the export
/// opaque is the compositor's job.
pub struct Canvas {
    viewport: Viewport,
    frame: Frame,
    active: Option<Stroke>,
    brush: Brush,
    input_enabled: bool,
    /// Maximum number of strokes kept (0 = unlimited)
    max_strokes: usize,
}

impl Canvas {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            frame: Frame::new(),
            active: None,
            brush: Brush::default(),
            input_enabled: true,
            max_strokes: 0,
        }
    }

    pub fn with_max_strokes(mut self, max_strokes: usize) -> Self {
        self.max_strokes = max_strokes;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.frame.strokes
    }

    /// Commits a complete stroke, bypassing pointer handling.
    pub fn add_stroke(&mut self, stroke: Stroke) -> bool {
        if self.frame.try_add_stroke(stroke, self.max_strokes) {
            true
        } else {
            log::warn!(
                "Stroke limit ({}) reached; discarding new stroke",
                self.max_strokes
            );
            false
        }
    }

    /// Rasterizes committed strokes plus the one in progress.
    ///
    /// # Errors
    /// Returns [`CaptureError::ImageError`] without allocating when the
    /// viewport exceeds [`MAX_VIEWPORT_DIMENSION`] on either side.
    pub fn render(&self) -> Result<Bitmap, CaptureError> {
        if !self.viewport.is_supported() {
            return Err(CaptureError::ImageError(format!(
                "Canvas {}x{} exceeds the {}px limit",
                self.viewport.width, self.viewport.height, MAX_VIEWPORT_DIMENSION
            )));
        }
        let mut bitmap = Bitmap::new(self.viewport.width, self.viewport.height);
        render_strokes(&mut bitmap, &self.frame.strokes);
        if let Some(active) = &self.active {
            render_strokes(&mut bitmap, std::slice::from_ref(active));
        }
        Ok(bitmap)
    }
}

impl DrawingSurface for Canvas {
    fn undo(&mut self) {
        if self.frame.is_empty() {
            log::debug!("Undo requested on empty canvas");
            return;
        }
        self.frame.undo();
    }

    fn clear(&mut self) {
        self.active = None;
        self.frame.clear();
    }

    fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if !enabled && let Some(stroke) = self.active.take() {
            // A stroke cut short by a mode switch is still kept.
            self.add_stroke(stroke);
        }
        self.input_enabled = enabled;
    }

    fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    fn resize(&mut self, viewport: Viewport) {
        log::debug!(
            "Canvas resized from {}x{} to {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
    }

    fn export_image(&self) -> Result<Snapshot, CaptureError> {
        let bitmap = self.render()?;
        let mut buffer = Cursor::new(Vec::new());
        bitmap
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| CaptureError::ImageError(format!("Failed to encode canvas: {}", e)))?;
        Ok(Snapshot::new(buffer.into_inner()))
    }

    fn stroke_begin(&mut self, point: Point) {
        if !self.input_enabled {
            return;
        }
        self.active = Some(Stroke::new(point, self.brush));
    }

    fn stroke_extend(&mut self, point: Point) {
        if !self.input_enabled {
            return;
        }
        if let Some(stroke) = &mut self.active {
            stroke.push(point);
        }
    }

    fn stroke_end(&mut self) {
        if let Some(stroke) = self.active.take() {
            self.add_stroke(stroke);
        }
    }
}
