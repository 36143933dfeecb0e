//! Pointer-driven rectangle selection.

use thiserror::Error;

use crate::util::{Point, Rect};

/// Phase of a region selection.
///
/// The end point only exists once the pointer has moved, so a selection that
/// was pressed and released in place is a zero-area rectangle at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No selection started
    #[default]
    Idle,
    /// Pointer is down and dragging
    Selecting { start: Point, end: Option<Point> },
    /// Pointer released; waiting for confirm or cancel
    AwaitingConfirmation { start: Point, end: Point },
}

impl SelectionState {
    /// Normalized rectangle for this state, `None` when idle.
    pub fn rect(&self) -> Option<Rect> {
        match *self {
            SelectionState::Idle => None,
            SelectionState::Selecting { start, end } => {
                Some(Rect::from_points(start, end.unwrap_or(start)))
            }
            SelectionState::AwaitingConfirmation { start, end } => {
                Some(Rect::from_points(start, end))
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SelectionState::Idle => "idle",
            SelectionState::Selecting { .. } => "selecting",
            SelectionState::AwaitingConfirmation { .. } => "awaiting confirmation",
        }
    }
}

/// A tracker operation arrived in a phase that does not accept it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot {operation} a selection while {state}")]
pub struct SelectionError {
    pub operation: &'static str,
    pub state: &'static str,
}

/// Turns pointer-down/move/up into a candidate rectangle.
///
/// Rejected operations leave the state untouched.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    state: SelectionState,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SelectionState::Idle
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Selecting { .. })
    }

    pub fn begin(&mut self, point: Point) -> Result<(), SelectionError> {
        match self.state {
            SelectionState::Idle => {
                self.state = SelectionState::Selecting {
                    start: point,
                    end: None,
                };
                Ok(())
            }
            _ => Err(self.reject("begin")),
        }
    }

    pub fn update(&mut self, point: Point) -> Result<(), SelectionError> {
        if let SelectionState::Selecting { end, .. } = &mut self.state {
            *end = Some(point);
            return Ok(());
        }
        Err(self.reject("update"))
    }

    pub fn finish(&mut self) -> Result<(), SelectionError> {
        match self.state {
            SelectionState::Selecting { start, end } => {
                self.state = SelectionState::AwaitingConfirmation {
                    start,
                    end: end.unwrap_or(start),
                };
                Ok(())
            }
            _ => Err(self.reject("finish")),
        }
    }

    pub fn reset(&mut self) {
        self.state = SelectionState::Idle;
    }

    pub fn current_rect(&self) -> Option<Rect> {
        self.state.rect()
    }

    fn reject(&self, operation: &'static str) -> SelectionError {
        SelectionError {
            operation,
            state: self.state.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_produces_normalized_rect() {
        let mut tracker = SelectionTracker::new();
        tracker.begin(Point::new(300, 250)).unwrap();
        tracker.update(Point::new(200, 260)).unwrap();
        tracker.update(Point::new(100, 100)).unwrap();
        tracker.finish().unwrap();

        assert_eq!(
            tracker.state(),
            SelectionState::AwaitingConfirmation {
                start: Point::new(300, 250),
                end: Point::new(100, 100),
            }
        );
        assert_eq!(tracker.current_rect(), Some(Rect::new(100, 100, 200, 150)));
    }

    #[test]
    fn press_and_release_in_place_is_zero_area() {
        let mut tracker = SelectionTracker::new();
        tracker.begin(Point::new(50, 50)).unwrap();
        assert_eq!(tracker.current_rect(), Some(Rect::new(50, 50, 0, 0)));
        tracker.finish().unwrap();
        assert_eq!(tracker.current_rect(), Some(Rect::new(50, 50, 0, 0)));
    }

    #[test]
    fn idle_has_no_rect() {
        let tracker = SelectionTracker::new();
        assert!(tracker.is_idle());
        assert_eq!(tracker.current_rect(), None);
    }

    #[test]
    fn out_of_phase_calls_are_rejected_without_change() {
        let mut tracker = SelectionTracker::new();
        let err = tracker.update(Point::new(1, 1)).unwrap_err();
        assert_eq!(err.to_string(), "cannot update a selection while idle");
        assert!(tracker.finish().is_err());
        assert!(tracker.is_idle());

        tracker.begin(Point::new(0, 0)).unwrap();
        assert!(tracker.begin(Point::new(9, 9)).is_err());
        tracker.update(Point::new(4, 4)).unwrap();
        tracker.finish().unwrap();

        let before = tracker.state();
        assert!(tracker.update(Point::new(20, 20)).is_err());
        assert!(tracker.finish().is_err());
        assert_eq!(tracker.state(), before);
    }

    #[test]
    fn reset_returns_to_idle_from_any_phase() {
        let mut tracker = SelectionTracker::new();
        tracker.reset();
        assert!(tracker.is_idle());

        tracker.begin(Point::new(1, 2)).unwrap();
        tracker.reset();
        assert!(tracker.is_idle());

        tracker.begin(Point::new(1, 2)).unwrap();
        tracker.finish().unwrap();
        tracker.reset();
        assert!(tracker.is_idle());
        assert!(!tracker.is_dragging());
    }
}
