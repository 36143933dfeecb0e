//! Region export for sketchboard.
//!
//! This module turns a confirmed selection into a delivered image:
//! - Cancellation tickets tied to the capture session
//! - Asynchronous snapshot decoding
//! - Cropping onto an opaque background
//! - Delivery through a pluggable sink (PNG files by default)

pub mod compositor;
pub mod file;
pub mod ticket;
pub mod types;

mod dependencies;
mod manager;
mod pipeline;
#[cfg(test)]
mod tests;

pub use dependencies::{
    ExportDependencies, ExportSink, FileExportSink, PngSnapshotDecoder, SnapshotDecoder,
};
pub use manager::ExportManager;
pub use pipeline::ExportRequest;
pub use ticket::{ExportTicket, SessionEpoch};
pub use types::{CaptureError, CaptureStatus, ExportOutcome, ExportResult};
