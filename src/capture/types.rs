//! Data types for region export.

use std::path::PathBuf;
use thiserror::Error;

use crate::util::Rect;

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    /// Requested selection, in viewport coordinates
    pub requested: Rect,
    /// Selection after clamping to the snapshot bounds
    pub cropped: Rect,
    /// Dimensions of the delivered bitmap
    pub width: u32,
    pub height: u32,
    /// Name the bitmap was offered under
    pub name: String,
    /// Where the sink stored it, if it reports a location
    pub saved_path: Option<PathBuf>,
}

/// Outcome of an export request (success, failure or cancellation).
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Success(ExportResult),
    Failed(String),
    Cancelled(String),
}

/// Errors that can occur on the export path.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to save image: {0}")]
    SaveError(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageError(String),

    #[error("Failed to decode snapshot: {0}")]
    DecodeError(String),

    #[error("Export sink rejected image: {0}")]
    SinkError(String),

    #[error("Export cancelled: {0}")]
    Cancelled(String),
}

/// Status of the export manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureStatus {
    /// Nothing in flight.
    Idle,
    /// An export is being decoded, cropped and delivered.
    Decoding,
    /// Last export completed successfully.
    Success,
    /// Last export failed.
    Failed(String),
    /// Last export was invalidated before delivery.
    Cancelled(String),
}
