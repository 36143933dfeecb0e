//! Stroke history backing undo and clear.

use super::stroke::Stroke;

/// Container for all committed strokes on the canvas.
///
/// Strokes are kept in draw order (first = bottom layer, last = top layer);
/// undo pops the most recent one.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub strokes: Vec<Stroke>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    /// Removes all strokes from the frame.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Attempts to add a stroke, enforcing a maximum count when `max` > 0.
    ///
    /// Returns `true` if the stroke was added, `false` if the limit would be exceeded.
    pub fn try_add_stroke(&mut self, stroke: Stroke, max: usize) -> bool {
        if max == 0 || self.strokes.len() < max {
            self.strokes.push(stroke);
            true
        } else {
            false
        }
    }

    /// Removes and returns the most recently added stroke, if any.
    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, Brush};
    use crate::util::Point;

    fn dot(x: i32) -> Stroke {
        Stroke::new(Point::new(x, x), Brush::new(BLACK, 2.0))
    }

    #[test]
    fn try_add_stroke_respects_limit() {
        let mut frame = Frame::new();
        assert!(frame.try_add_stroke(dot(1), 1));
        assert!(!frame.try_add_stroke(dot(2), 1));
        assert_eq!(frame.strokes.len(), 1);
    }

    #[test]
    fn undo_pops_latest_stroke() {
        let mut frame = Frame::new();
        frame.try_add_stroke(dot(1), 0);
        frame.try_add_stroke(dot(2), 0);
        assert_eq!(frame.undo(), Some(dot(2)));
        assert_eq!(frame.strokes, vec![dot(1)]);
        frame.clear();
        assert!(frame.undo().is_none());
    }
}
