use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::{Mutex, mpsc, watch};

use crate::capture::{
    dependencies::ExportDependencies,
    pipeline::{ExportRequest, perform_export},
    types::{CaptureError, CaptureStatus, ExportOutcome},
};

/// Runs exports off the event thread.
///
/// The interaction controller stays synchronous; it hands finished selections
/// to the manager, which decodes, crops and delivers them on a background task
/// in request order.
#[derive(Clone)]
pub struct ExportManager {
    /// Channel for sending export requests.
    request_tx: mpsc::UnboundedSender<ExportRequest>,
    /// Shared status of the current export.
    status: Arc<Mutex<CaptureStatus>>,
    /// Shared result of the last export (if any).
    last_result: Arc<Mutex<Option<ExportOutcome>>>,
    /// Number of requests accepted so far.
    submitted: Arc<AtomicU64>,
    /// Number of requests the background task has finished.
    completed: watch::Receiver<u64>,
}

impl ExportManager {
    /// Create a new export manager writing PNG files with default settings.
    ///
    /// This spawns a background task on `runtime_handle`.
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        Self::with_dependencies(runtime_handle, ExportDependencies::default())
    }

    /// Create an export manager with custom dependencies (useful for testing).
    pub fn with_dependencies(
        runtime_handle: &tokio::runtime::Handle,
        dependencies: ExportDependencies,
    ) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ExportRequest>();
        let (completed_tx, completed) = watch::channel(0u64);
        let status = Arc::new(Mutex::new(CaptureStatus::Idle));
        let last_result = Arc::new(Mutex::new(None));
        let dependencies = Arc::new(dependencies);

        let status_clone = status.clone();
        let result_clone = last_result.clone();

        runtime_handle.spawn(async move {
            while let Some(request) = request_rx.recv().await {
                log::debug!("Processing export request: {:?}", request);

                *status_clone.lock().await = CaptureStatus::Decoding;

                let outcome = match perform_export(request, dependencies.clone()).await {
                    Ok(result) => {
                        log::info!(
                            "Export delivered: {}x{} {:?}",
                            result.width,
                            result.height,
                            result.saved_path
                        );
                        *status_clone.lock().await = CaptureStatus::Success;
                        ExportOutcome::Success(result)
                    }
                    Err(CaptureError::Cancelled(reason)) => {
                        log::info!("Export cancelled: {}", reason);
                        *status_clone.lock().await = CaptureStatus::Cancelled(reason.clone());
                        ExportOutcome::Cancelled(reason)
                    }
                    Err(e) => {
                        let error_message = e.to_string();
                        log::warn!("Export failed: {}", error_message);
                        *status_clone.lock().await = CaptureStatus::Failed(error_message.clone());
                        ExportOutcome::Failed(error_message)
                    }
                };

                *result_clone.lock().await = Some(outcome);
                completed_tx.send_modify(|count| *count += 1);
            }
        });

        Self {
            request_tx,
            status,
            last_result,
            submitted: Arc::new(AtomicU64::new(0)),
            completed,
        }
    }

    /// Queue an export. Non-blocking; the work happens in the background.
    pub fn request_export(&self, request: ExportRequest) -> Result<(), CaptureError> {
        self.request_tx
            .send(request)
            .map_err(|_| CaptureError::ImageError("Export manager not running".to_string()))?;
        self.submitted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Get the current export status.
    pub async fn get_status(&self) -> CaptureStatus {
        self.status.lock().await.clone()
    }

    /// Get the result of the last export and clear it.
    pub async fn take_result(&self) -> Option<ExportOutcome> {
        self.last_result.lock().await.take()
    }

    /// Try to get the result without waiting (non-blocking).
    pub fn try_take_result(&self) -> Option<ExportOutcome> {
        self.last_result.try_lock().ok().and_then(|mut r| r.take())
    }

    /// Wait until every request queued so far has finished.
    pub async fn flush(&self) {
        let target = self.submitted.load(Ordering::SeqCst);
        let mut completed = self.completed.clone();
        if completed.wait_for(|done| *done >= target).await.is_err() {
            log::warn!("Export task stopped before finishing queued requests");
        }
    }

    /// Reset status to idle.
    pub async fn reset(&self) {
        *self.status.lock().await = CaptureStatus::Idle;
    }
}

#[cfg(test)]
impl ExportManager {
    pub(crate) fn with_closed_channel_for_test() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<ExportRequest>();
        drop(rx);
        let (_completed_tx, completed) = watch::channel(0u64);
        Self {
            request_tx: tx,
            status: Arc::new(Mutex::new(CaptureStatus::Idle)),
            last_result: Arc::new(Mutex::new(None)),
            submitted: Arc::new(AtomicU64::new(0)),
            completed,
        }
    }
}
