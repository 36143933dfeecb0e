use std::{fmt, path::PathBuf, sync::Arc};

use image::Rgba;
use tokio::task;

use crate::capture::{
    compositor,
    dependencies::{ExportDependencies, ExportSink},
    ticket::ExportTicket,
    types::{CaptureError, ExportResult},
};
use crate::draw::{Bitmap, Snapshot};
use crate::util::Rect;

/// Everything needed to finish an export once the event thread has moved on.
#[derive(Clone)]
pub struct ExportRequest {
    pub snapshot: Snapshot,
    /// Region to export, in viewport coordinates
    pub rect: Rect,
    pub suggested_name: String,
    /// Opaque fill behind the cropped region
    pub background: Rgba<u8>,
    pub ticket: ExportTicket,
}

impl fmt::Debug for ExportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportRequest")
            .field("rect", &self.rect)
            .field("suggested_name", &self.suggested_name)
            .field("snapshot_bytes", &self.snapshot.len())
            .field("current", &self.ticket.is_current())
            .finish()
    }
}

pub(crate) async fn perform_export(
    request: ExportRequest,
    dependencies: Arc<ExportDependencies>,
) -> Result<ExportResult, CaptureError> {
    log::info!(
        "Starting export of {:?} as {}",
        request.rect,
        request.suggested_name
    );

    if !request.ticket.is_current() {
        return Err(CaptureError::Cancelled(
            "selection reset before decode".to_string(),
        ));
    }

    // Step 1: decode the snapshot (the only suspension point)
    let source = dependencies.decoder.decode(request.snapshot).await?;
    log::debug!(
        "Decoded snapshot: {}x{} pixels",
        source.width(),
        source.height()
    );

    // Step 2: a reset or cancel may have arrived while decoding
    if !request.ticket.is_current() {
        log::info!("Discarding decoded snapshot; selection was reset during decode");
        return Err(CaptureError::Cancelled(
            "selection reset during decode".to_string(),
        ));
    }

    // Step 3: crop onto an opaque background
    let cropped = request.rect.clamp_to(source.width(), source.height());
    let output = compositor::crop(&source, request.rect, request.background);
    drop(source);

    // Step 4: deliver
    let (width, height) = output.dimensions();
    let saved_path = deliver(
        Arc::clone(&dependencies.sink),
        output,
        request.suggested_name.clone(),
    )
    .await?;

    Ok(ExportResult {
        requested: request.rect,
        cropped,
        width,
        height,
        name: request.suggested_name,
        saved_path,
    })
}

async fn deliver(
    sink: Arc<dyn ExportSink>,
    bitmap: Bitmap,
    name: String,
) -> Result<Option<PathBuf>, CaptureError> {
    task::spawn_blocking(move || sink.deliver(&bitmap, &name))
        .await
        .map_err(|e| CaptureError::SinkError(format!("Delivery task failed: {}", e)))?
}
