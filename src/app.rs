//! Event-loop driver tying the controller to the export manager.
//!
//! The controller is synchronous and never touches the runtime. After every
//! event the driver moves queued export requests over to the
//! [`ExportManager`], which finishes them in the background.

use log::{debug, info, warn};
use tokio::runtime::Handle;

use crate::capture::{CaptureStatus, ExportDependencies, ExportManager, ExportOutcome};
use crate::config::Config;
use crate::draw::Canvas;
use crate::input::{InputEvent, InteractionController};
use crate::util::Viewport;

pub struct Sketchboard {
    controller: InteractionController,
    exports: ExportManager,
}

impl Sketchboard {
    pub fn new(controller: InteractionController, exports: ExportManager) -> Self {
        Self {
            controller,
            exports,
        }
    }

    /// Builds a blank canvas and a file-writing export manager from `config`.
    pub fn from_config(config: &Config, viewport: Viewport, runtime: &Handle) -> Self {
        let canvas = Canvas::new(viewport).with_max_strokes(config.brush.max_strokes);
        let controller =
            InteractionController::new(Box::new(canvas), viewport, config.controller_settings());
        let exports = ExportManager::with_dependencies(
            runtime,
            ExportDependencies::with_file_config(config.export.file_save_config()),
        );
        info!(
            "Sketchboard ready ({}x{})",
            viewport.width, viewport.height
        );
        Self::new(controller, exports)
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    pub fn exports(&self) -> &ExportManager {
        &self.exports
    }

    /// Feeds one event to the controller and submits any exports it queued.
    ///
    /// Returns the number of exports submitted. A request the manager cannot
    /// accept is logged and dropped; the interaction carries on either way.
    pub fn handle(&mut self, event: InputEvent) -> usize {
        self.controller.handle_event(event);

        let mut submitted = 0;
        for request in self.controller.take_pending_exports() {
            match self.exports.request_export(request) {
                Ok(()) => submitted += 1,
                Err(e) => warn!("Failed to submit export: {}", e),
            }
        }
        submitted
    }

    /// Takes a finished export outcome, if one is ready, without waiting.
    pub fn poll_outcome(&self) -> Option<ExportOutcome> {
        let outcome = self.exports.try_take_result()?;
        report(&outcome);
        Some(outcome)
    }

    /// Status of the export currently or most recently processed.
    pub async fn status(&self) -> CaptureStatus {
        self.exports.get_status().await
    }

    /// Waits for every submitted export and returns the last outcome.
    ///
    /// The manager status is back to idle afterwards.
    pub async fn settle(&self) -> Option<ExportOutcome> {
        self.exports.flush().await;
        debug!("Export queue drained: {:?}", self.exports.get_status().await);
        let outcome = self.exports.take_result().await;
        self.exports.reset().await;
        let outcome = outcome?;
        report(&outcome);
        Some(outcome)
    }

    /// Abandons exports that have not been delivered yet.
    ///
    /// Selection exports still queued or decoding finish as cancelled.
    /// Whole-canvas exports are not tied to a session and still complete.
    pub fn shutdown(&mut self) {
        self.controller.abort_pending_export();
        info!("Sketchboard shutting down");
    }
}

fn report(outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Success(result) => match &result.saved_path {
            Some(path) => info!("Export saved to: {}", path.display()),
            None => info!("Export delivered as {}", result.name),
        },
        ExportOutcome::Failed(error) => warn!("Export failed: {}", error),
        ExportOutcome::Cancelled(reason) => info!("Export cancelled: {}", reason),
    }
}
