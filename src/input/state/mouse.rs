use crate::config::PointerLeavePolicy;
use crate::util::Point;

use super::{InteractionController, InteractionMode};

impl InteractionController {
    /// Processes a primary pointer press.
    ///
    /// # Behavior
    /// - Drawing: starts a stroke on the surface
    /// - Selecting: anchors the selection rectangle
    /// - AwaitingConfirmation: ignored until the prompt is answered
    pub fn on_pointer_down(&mut self, point: Point) {
        match self.mode {
            InteractionMode::Drawing => self.surface.stroke_begin(point),
            InteractionMode::Selecting => {
                if let Err(e) = self.tracker.begin(point) {
                    log::debug!("Ignoring pointer down: {}", e);
                    return;
                }
                self.needs_redraw = true;
            }
            InteractionMode::AwaitingConfirmation => {
                log::debug!("Ignoring pointer down while the confirm prompt is shown");
            }
        }
    }

    /// Processes pointer motion.
    ///
    /// Hover motion before a selection has been anchored is not an error and
    /// is dropped silently.
    pub fn on_pointer_move(&mut self, point: Point) {
        match self.mode {
            InteractionMode::Drawing => self.surface.stroke_extend(point),
            InteractionMode::Selecting if self.tracker.is_dragging() => {
                if let Err(e) = self.tracker.update(point) {
                    log::debug!("Ignoring pointer move: {}", e);
                    return;
                }
                self.needs_redraw = true;
            }
            _ => {}
        }
    }

    /// Processes a pointer release.
    ///
    /// Releasing a drag shows the confirm prompt.
    pub fn on_pointer_up(&mut self) {
        match self.mode {
            InteractionMode::Drawing => self.surface.stroke_end(),
            InteractionMode::Selecting => self.finish_selection(),
            InteractionMode::AwaitingConfirmation => {
                log::debug!("Ignoring pointer up while the confirm prompt is shown");
            }
        }
    }

    /// Processes the pointer leaving the viewport.
    ///
    /// A stroke in progress is committed. A selection drag is finished or
    /// cancelled according to [`PointerLeavePolicy`].
    pub fn on_pointer_leave(&mut self) {
        match self.mode {
            InteractionMode::Drawing => self.surface.stroke_end(),
            InteractionMode::Selecting if self.tracker.is_dragging() => {
                match self.settings.pointer_leave {
                    PointerLeavePolicy::Finish => {
                        log::debug!("Pointer left mid-drag; finishing selection");
                        self.finish_selection();
                    }
                    PointerLeavePolicy::Cancel => {
                        log::debug!("Pointer left mid-drag; cancelling selection");
                        self.cancel();
                    }
                }
            }
            _ => {}
        }
    }

    fn finish_selection(&mut self) {
        match self.tracker.finish() {
            Ok(()) => {
                self.mode = InteractionMode::AwaitingConfirmation;
                self.needs_redraw = true;
                log::debug!("Selection finished: {:?}", self.tracker.current_rect());
            }
            Err(e) => log::debug!("Ignoring pointer up: {}", e),
        }
    }
}
