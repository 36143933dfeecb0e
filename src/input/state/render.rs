use crate::draw::{Bitmap, SelectionOverlay, paint_selection};
use crate::util::Point;

use super::{InteractionController, InteractionMode};

impl InteractionController {
    /// Returns the selection rectangle to draw over the canvas.
    ///
    /// # Returns
    /// - `Some` while a selection is being dragged or awaits confirmation
    /// - `None` while drawing, or before the first press of a session
    pub fn selection_overlay(&self) -> Option<SelectionOverlay> {
        if !self.mode.in_session() {
            return None;
        }
        let rect = self.tracker.current_rect()?;
        Some(SelectionOverlay {
            rect,
            border_color: self.settings.border_color,
            border_width: self.settings.border_width,
            dash_length: self.settings.dash_length,
            fill_color: self.settings.fill_color,
        })
    }

    /// Where the confirm prompt goes: just past the selection's bottom-right
    /// corner, so it never covers the region being exported.
    pub fn confirm_prompt_anchor(&self) -> Option<Point> {
        if self.mode != InteractionMode::AwaitingConfirmation {
            return None;
        }
        let rect = self.tracker.current_rect()?;
        let margin = i64::from(self.settings.prompt_margin);
        Some(Point::new(
            saturate(rect.right() + margin),
            saturate(rect.bottom() + margin),
        ))
    }

    /// Paints the live selection onto a rendered frame.
    ///
    /// Returns `true` if anything was painted.
    pub fn render_overlay(&self, frame: &mut Bitmap) -> bool {
        match self.selection_overlay() {
            Some(overlay) => {
                paint_selection(frame, &overlay);
                true
            }
            None => false,
        }
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
