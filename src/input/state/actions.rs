use crate::capture::{ExportRequest, ExportTicket};
use crate::draw::Brush;
use crate::input::{events::InputEvent, tool::ToolAction};
use crate::util::{self, Rect, Viewport};

use super::{InteractionController, InteractionMode};

impl InteractionController {
    /// Dispatches one event to the matching handler.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Tool(action) => self.on_tool_action(action),
            InputEvent::PointerDown(point) => self.on_pointer_down(point),
            InputEvent::PointerMove(point) => self.on_pointer_move(point),
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::Confirm => self.confirm(),
            InputEvent::Cancel => self.cancel(),
            InputEvent::Resize(viewport) => self.on_resize(viewport),
            InputEvent::ExportCanvas => self.export_whole_canvas(),
        }
    }

    /// Applies a tool menu action.
    ///
    /// Brush and history actions only take effect while drawing. During a
    /// capture session they are dropped, not queued, so the brush and the
    /// selection stay as they were.
    pub fn on_tool_action(&mut self, action: ToolAction) {
        if self.mode != InteractionMode::Drawing {
            log::debug!("Ignoring '{}' during region selection", action);
            return;
        }

        match action {
            ToolAction::Pencil => self.set_brush(self.settings.pencil),
            ToolAction::Eraser => self.set_brush(self.settings.eraser),
            ToolAction::Undo => self.surface.undo(),
            ToolAction::Clear => self.surface.clear(),
            ToolAction::Save => self.start_session(),
        }
        self.needs_redraw = true;
    }

    fn set_brush(&mut self, brush: Brush) {
        log::debug!(
            "Brush set to {} ({:.1}px)",
            util::color_to_name(&brush.color),
            brush.radius
        );
        self.brush = brush;
        self.surface.set_brush(brush);
    }

    /// Accepts the confirm prompt.
    ///
    /// Takes a snapshot of the surface and queues an export of the selected
    /// region. Zero-area selections export nothing. The controller returns to
    /// drawing whatever happens to the snapshot.
    pub fn confirm(&mut self) {
        if self.mode != InteractionMode::AwaitingConfirmation {
            log::debug!("Ignoring confirm in {:?} mode", self.mode);
            return;
        }

        match self.tracker.current_rect() {
            Some(rect) if !rect.is_empty() => {
                let name = self.settings.selection_filename.clone();
                self.queue_export(rect, name, self.epoch.ticket());
            }
            rect => log::info!("Selection {:?} is empty; nothing to export", rect),
        }

        self.end_session();
    }

    /// Dismisses the session without exporting.
    ///
    /// Any export still decoding from this controller is abandoned too.
    pub fn cancel(&mut self) {
        if !self.mode.in_session() {
            log::debug!("Ignoring cancel outside region selection");
            return;
        }
        self.epoch.invalidate();
        self.end_session();
        log::info!("Region selection cancelled");
    }

    /// Abandons exports that are queued or still being decoded.
    pub fn abort_pending_export(&mut self) {
        self.epoch.invalidate();
        let dropped = self.pending_exports.len();
        self.pending_exports.clear();
        log::debug!("Aborted pending exports ({} queued requests dropped)", dropped);
    }

    /// Queues an export of the entire viewport.
    ///
    /// Only available while drawing. The request is not tied to a selection
    /// session, so starting one later does not cancel it.
    pub fn export_whole_canvas(&mut self) {
        if self.mode != InteractionMode::Drawing {
            log::debug!("Ignoring canvas export during region selection");
            return;
        }
        let name = self.settings.canvas_filename.clone();
        self.queue_export(self.viewport.bounds(), name, ExportTicket::detached());
    }

    /// Handles a viewport resize.
    ///
    /// During a session the resize waits until drawing resumes, so the
    /// selection keeps referring to the frame it was started on. Sizes over
    /// the viewport limit are dropped.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if !viewport.is_supported() {
            log::warn!(
                "Ignoring resize to {}x{}: larger than {}px",
                viewport.width,
                viewport.height,
                util::MAX_VIEWPORT_DIMENSION
            );
            return;
        }
        if self.mode.in_session() {
            log::debug!(
                "Deferring resize to {}x{} until selection ends",
                viewport.width,
                viewport.height
            );
            self.pending_viewport = Some(viewport);
        } else {
            self.apply_resize(viewport);
        }
    }

    fn queue_export(&mut self, rect: Rect, suggested_name: String, ticket: ExportTicket) {
        let snapshot = match self.surface.export_image() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Could not snapshot drawing for export: {}", e);
                return;
            }
        };

        let request = ExportRequest {
            snapshot,
            rect,
            suggested_name,
            background: self.settings.background.to_rgba8(),
            ticket,
        };
        log::debug!("Queued export: {:?}", request);
        self.pending_exports.push(request);
    }
}
