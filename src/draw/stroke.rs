//! Freehand stroke definition.

use super::surface::Brush;
use crate::util::{Point, Rect};

/// A freehand stroke: the pointer path plus the brush it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Sampled pointer positions in draw order
    pub points: Vec<Point>,
    /// Brush captured when the stroke started
    pub brush: Brush,
}

impl Stroke {
    pub fn new(start: Point, brush: Brush) -> Self {
        Self {
            points: vec![start],
            brush,
        }
    }

    /// Appends a sample, skipping exact repeats of the last point.
    pub fn push(&mut self, point: Point) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    /// Pixel bounds covered by the stroke including the brush radius.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let pad = self.brush.radius.ceil().max(0.0) as i32;
        Some(Rect::from_points(
            Point::new(min_x.saturating_sub(pad), min_y.saturating_sub(pad)),
            Point::new(max_x.saturating_add(pad + 1), max_y.saturating_add(pad + 1)),
        ))
    }
}
