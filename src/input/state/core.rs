//! Interaction controller state.

use crate::capture::{ExportRequest, SessionEpoch};
use crate::config::PointerLeavePolicy;
use crate::draw::{BLACK, Brush, Color, DrawingSurface, WHITE};
use crate::input::selection::SelectionTracker;
use crate::util::Viewport;

/// Which half of the app pointer input currently drives.
///
/// A capture session runs from `Save` until confirm or cancel; while it is
/// active the drawing surface does not receive pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Pointer input draws strokes
    #[default]
    Drawing,
    /// Pointer input drags out a selection rectangle
    Selecting,
    /// Selection finished; the confirm prompt is showing
    AwaitingConfirmation,
}

impl InteractionMode {
    pub fn in_session(self) -> bool {
        !matches!(self, InteractionMode::Drawing)
    }
}

/// Controller settings resolved from the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    /// Brush applied by the pencil tool
    pub pencil: Brush,
    /// Brush applied by the eraser tool
    pub eraser: Brush,
    /// Pointer leaving the viewport mid-drag
    pub pointer_leave: PointerLeavePolicy,
    pub border_color: Color,
    pub border_width: u32,
    pub dash_length: u32,
    pub fill_color: Color,
    /// Gap between the selection's far corner and the confirm prompt
    pub prompt_margin: i32,
    /// Suggested name for region exports
    pub selection_filename: String,
    /// Suggested name for whole-canvas exports
    pub canvas_filename: String,
    /// Opaque fill behind exported pixels
    pub background: Color,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            pencil: Brush::pencil(),
            eraser: Brush::eraser(),
            pointer_leave: PointerLeavePolicy::Finish,
            border_color: BLACK,
            border_width: 2,
            dash_length: 6,
            fill_color: BLACK.with_alpha(0.1),
            prompt_margin: 12,
            selection_filename: "selection.png".to_string(),
            canvas_filename: "drawing.png".to_string(),
            background: WHITE,
        }
    }
}

/// Orchestrates drawing and region selection over one drawing surface.
///
/// Every event is handled to completion with `&mut self`, so transitions
/// never interleave. Exports are not run here: confirming a selection queues
/// an [`ExportRequest`] that the caller hands to the export manager.
pub struct InteractionController {
    pub(super) surface: Box<dyn DrawingSurface>,
    pub(super) tracker: SelectionTracker,
    pub(super) mode: InteractionMode,
    /// Brush most recently chosen from the tool menu
    pub(super) brush: Brush,
    pub(super) settings: ControllerSettings,
    /// Viewport the current frame was captured at
    pub(super) viewport: Viewport,
    /// Resize that arrived during a session
    pub(super) pending_viewport: Option<Viewport>,
    pub(super) epoch: SessionEpoch,
    pub(super) pending_exports: Vec<ExportRequest>,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
}

impl InteractionController {
    /// Creates a controller in drawing mode with the pencil selected.
    pub fn new(
        mut surface: Box<dyn DrawingSurface>,
        viewport: Viewport,
        settings: ControllerSettings,
    ) -> Self {
        let brush = settings.pencil;
        surface.set_brush(brush);
        surface.set_input_enabled(true);
        surface.resize(viewport);

        Self {
            surface,
            tracker: SelectionTracker::new(),
            mode: InteractionMode::Drawing,
            brush,
            settings,
            viewport,
            pending_viewport: None,
            epoch: SessionEpoch::new(),
            pending_exports: Vec::new(),
            needs_redraw: true,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    pub fn surface(&self) -> &dyn DrawingSurface {
        self.surface.as_ref()
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize waiting for the session to end, if any.
    pub fn pending_viewport(&self) -> Option<Viewport> {
        self.pending_viewport
    }

    /// Epoch the queued exports' tickets are checked against.
    pub fn epoch(&self) -> &SessionEpoch {
        &self.epoch
    }

    pub fn has_pending_exports(&self) -> bool {
        !self.pending_exports.is_empty()
    }

    /// Drains queued export requests in the order they were made.
    pub fn take_pending_exports(&mut self) -> Vec<ExportRequest> {
        std::mem::take(&mut self.pending_exports)
    }

    /// Enters selection mode.
    pub(super) fn start_session(&mut self) {
        self.epoch.invalidate();
        self.tracker.reset();
        self.surface.set_input_enabled(false);
        self.mode = InteractionMode::Selecting;
        self.needs_redraw = true;
        log::info!("Region selection started");
    }

    /// Leaves selection mode, restoring drawing input.
    ///
    /// Every exit from a session goes through here.
    pub(super) fn end_session(&mut self) {
        self.tracker.reset();
        self.mode = InteractionMode::Drawing;
        self.surface.set_input_enabled(true);
        if let Some(viewport) = self.pending_viewport.take() {
            log::debug!("Applying resize deferred during selection");
            self.apply_resize(viewport);
        }
        self.needs_redraw = true;
    }

    pub(super) fn apply_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface.resize(viewport);
        self.needs_redraw = true;
    }
}
