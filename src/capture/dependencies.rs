use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::task;

use crate::capture::{
    file::{self, FileSaveConfig},
    types::CaptureError,
};
use crate::draw::{Bitmap, Snapshot};

/// Abstraction over turning an encoded snapshot back into pixels.
#[async_trait]
pub trait SnapshotDecoder: Send + Sync {
    async fn decode(&self, snapshot: Snapshot) -> Result<Bitmap, CaptureError>;
}

/// Destination for exported bitmaps (download, save dialog, file on disk).
///
/// Delivery is fire-and-forget from the interaction's point of view: errors
/// are logged and recorded by the export manager, never surfaced as panics.
pub trait ExportSink: Send + Sync {
    /// Hands over `bitmap` under `suggested_name`, returning where it ended up
    /// when the sink knows.
    fn deliver(&self, bitmap: &Bitmap, suggested_name: &str)
    -> Result<Option<PathBuf>, CaptureError>;
}

/// Bundle of dependencies used by the export pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub decoder: Arc<dyn SnapshotDecoder>,
    pub sink: Arc<dyn ExportSink>,
}

impl ExportDependencies {
    /// PNG decoding with the given sink.
    pub fn with_sink(sink: Arc<dyn ExportSink>) -> Self {
        Self {
            decoder: Arc::new(PngSnapshotDecoder),
            sink,
        }
    }

    /// PNG decoding with a file sink configured by `config`.
    pub fn with_file_config(config: FileSaveConfig) -> Self {
        Self::with_sink(Arc::new(FileExportSink::new(config)))
    }
}

impl Default for ExportDependencies {
    fn default() -> Self {
        Self::with_file_config(FileSaveConfig::default())
    }
}

/// Decodes snapshots on the blocking pool so the event thread never waits.
pub struct PngSnapshotDecoder;

#[async_trait]
impl SnapshotDecoder for PngSnapshotDecoder {
    async fn decode(&self, snapshot: Snapshot) -> Result<Bitmap, CaptureError> {
        task::spawn_blocking(move || {
            image::load_from_memory(snapshot.as_bytes())
                .map(|decoded| decoded.to_rgba8())
                .map_err(|e| CaptureError::DecodeError(e.to_string()))
        })
        .await
        .map_err(|e| CaptureError::DecodeError(format!("Decode task failed: {}", e)))?
    }
}

/// Writes exports as PNG files into a directory.
pub struct FileExportSink {
    config: FileSaveConfig,
}

impl FileExportSink {
    pub fn new(config: FileSaveConfig) -> Self {
        Self { config }
    }
}

impl ExportSink for FileExportSink {
    fn deliver(
        &self,
        bitmap: &Bitmap,
        suggested_name: &str,
    ) -> Result<Option<PathBuf>, CaptureError> {
        file::save_bitmap(bitmap, suggested_name, &self.config).map(Some)
    }
}
