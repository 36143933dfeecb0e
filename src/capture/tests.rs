use std::{
    io::Cursor,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use image::{ImageFormat, Rgba};
use tokio::sync::Notify;
use tokio::time::{Duration, sleep};

use super::{
    dependencies::{ExportDependencies, ExportSink, PngSnapshotDecoder, SnapshotDecoder},
    manager::ExportManager,
    pipeline::{ExportRequest, perform_export},
    ticket::SessionEpoch,
    types::{CaptureError, CaptureStatus, ExportOutcome},
};
use crate::draw::{Bitmap, Snapshot};
use crate::util::Rect;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

struct MockDecoder {
    bitmap: Bitmap,
    fail: bool,
    /// When set, decoding signals the first notify and then waits on the second.
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

#[async_trait]
impl SnapshotDecoder for MockDecoder {
    async fn decode(&self, _snapshot: Snapshot) -> Result<Bitmap, CaptureError> {
        if let Some((started, release)) = &self.gate {
            started.notify_one();
            release.notified().await;
        }
        if self.fail {
            Err(CaptureError::DecodeError("corrupt snapshot".to_string()))
        } else {
            Ok(self.bitmap.clone())
        }
    }
}

#[derive(Clone, Default)]
struct MockSink {
    should_fail: bool,
    delivered: Arc<Mutex<Vec<(String, u32, u32)>>>,
}

impl ExportSink for MockSink {
    fn deliver(
        &self,
        bitmap: &Bitmap,
        suggested_name: &str,
    ) -> Result<Option<PathBuf>, CaptureError> {
        self.delivered.lock().unwrap().push((
            suggested_name.to_string(),
            bitmap.width(),
            bitmap.height(),
        ));
        if self.should_fail {
            Err(CaptureError::SinkError("no filesystem access".to_string()))
        } else {
            Ok(Some(PathBuf::from(format!("/tmp/{suggested_name}"))))
        }
    }
}

fn transparent_source() -> Bitmap {
    Bitmap::new(500, 500)
}

fn deps(decoder: MockDecoder, sink: MockSink) -> ExportDependencies {
    ExportDependencies {
        decoder: Arc::new(decoder),
        sink: Arc::new(sink),
    }
}

fn ready_decoder() -> MockDecoder {
    MockDecoder {
        bitmap: transparent_source(),
        fail: false,
        gate: None,
    }
}

fn request(rect: Rect, epoch: &SessionEpoch) -> ExportRequest {
    ExportRequest {
        snapshot: Snapshot::new(vec![0; 4]),
        rect,
        suggested_name: "selection.png".to_string(),
        background: WHITE,
        ticket: epoch.ticket(),
    }
}

async fn wait_for_outcome(manager: &ExportManager) -> Option<ExportOutcome> {
    for _ in 0..20 {
        if let Some(result) = manager.try_take_result() {
            return Some(result);
        }
        sleep(Duration::from_millis(20)).await;
    }
    None
}

#[tokio::test]
async fn perform_export_crops_and_delivers_once() {
    let sink = MockSink::default();
    let epoch = SessionEpoch::new();

    let result = perform_export(
        request(Rect::new(100, 100, 200, 150), &epoch),
        Arc::new(deps(ready_decoder(), sink.clone())),
    )
    .await
    .unwrap();

    assert_eq!(result.cropped, Rect::new(100, 100, 200, 150));
    assert_eq!((result.width, result.height), (200, 150));
    assert_eq!(result.saved_path, Some(PathBuf::from("/tmp/selection.png")));
    assert_eq!(
        *sink.delivered.lock().unwrap(),
        vec![("selection.png".to_string(), 200, 150)]
    );
}

#[tokio::test]
async fn perform_export_clamps_rect_to_snapshot() {
    let sink = MockSink::default();
    let epoch = SessionEpoch::new();

    let result = perform_export(
        request(Rect::new(-20, 10, 100, 50), &epoch),
        Arc::new(deps(ready_decoder(), sink.clone())),
    )
    .await
    .unwrap();

    assert_eq!(result.requested, Rect::new(-20, 10, 100, 50));
    assert_eq!(result.cropped, Rect::new(0, 10, 80, 50));
    assert_eq!((result.width, result.height), (80, 50));
}

#[tokio::test]
async fn stale_ticket_skips_decode_and_delivery() {
    let sink = MockSink::default();
    let epoch = SessionEpoch::new();
    let req = request(Rect::new(0, 0, 10, 10), &epoch);
    epoch.invalidate();

    let err = perform_export(req, Arc::new(deps(ready_decoder(), sink.clone())))
        .await
        .unwrap_err();
    assert!(matches!(err, CaptureError::Cancelled(_)));
    assert!(sink.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn reset_during_decode_discards_result() {
    let sink = MockSink::default();
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let decoder = MockDecoder {
        bitmap: transparent_source(),
        fail: false,
        gate: Some((started.clone(), release.clone())),
    };
    let epoch = SessionEpoch::new();

    let export = tokio::spawn(perform_export(
        request(Rect::new(0, 0, 10, 10), &epoch),
        Arc::new(deps(decoder, sink.clone())),
    ));

    // Cancel arrives while the decode is suspended, then the decode finishes.
    started.notified().await;
    epoch.invalidate();
    release.notify_one();

    let err = export.await.unwrap().unwrap_err();
    match err {
        CaptureError::Cancelled(reason) => assert!(reason.contains("during decode")),
        other => panic!("expected Cancelled, got {other:?}"),
    }
    assert!(sink.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn decode_failure_is_reported() {
    let sink = MockSink::default();
    let decoder = MockDecoder {
        bitmap: transparent_source(),
        fail: true,
        gate: None,
    };
    let epoch = SessionEpoch::new();

    let err = perform_export(
        request(Rect::new(0, 0, 10, 10), &epoch),
        Arc::new(deps(decoder, sink.clone())),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CaptureError::DecodeError(_)));
    assert!(sink.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn png_decoder_round_trips_canvas_snapshot() {
    let mut bitmap = Bitmap::new(8, 4);
    bitmap.put_pixel(1, 1, Rgba([0, 0, 0, 255]));
    let mut buffer = Cursor::new(Vec::new());
    bitmap.write_to(&mut buffer, ImageFormat::Png).unwrap();

    let decoded = PngSnapshotDecoder
        .decode(Snapshot::new(buffer.into_inner()))
        .await
        .unwrap();
    assert_eq!(decoded, bitmap);
}

#[tokio::test]
async fn png_decoder_rejects_garbage() {
    let err = PngSnapshotDecoder
        .decode(Snapshot::new(b"not an image".to_vec()))
        .await
        .unwrap_err();
    assert!(matches!(err, CaptureError::DecodeError(_)));
}

#[tokio::test]
async fn export_manager_creation() {
    let manager = ExportManager::new(&tokio::runtime::Handle::current());
    assert_eq!(manager.get_status().await, CaptureStatus::Idle);
    assert!(manager.take_result().await.is_none());
}

#[tokio::test]
async fn export_manager_records_success() {
    let sink = MockSink::default();
    let manager = ExportManager::with_dependencies(
        &tokio::runtime::Handle::current(),
        deps(ready_decoder(), sink.clone()),
    );
    let epoch = SessionEpoch::new();

    manager
        .request_export(request(Rect::new(100, 100, 200, 150), &epoch))
        .unwrap();

    match wait_for_outcome(&manager).await {
        Some(ExportOutcome::Success(result)) => {
            assert_eq!((result.width, result.height), (200, 150));
        }
        other => panic!("Expected success outcome, got {other:?}"),
    }
    assert_eq!(sink.delivered.lock().unwrap().len(), 1);
    assert_eq!(manager.get_status().await, CaptureStatus::Success);
}

#[tokio::test]
async fn export_manager_records_sink_failure_as_outcome() {
    let sink = MockSink {
        should_fail: true,
        ..MockSink::default()
    };
    let manager = ExportManager::with_dependencies(
        &tokio::runtime::Handle::current(),
        deps(ready_decoder(), sink),
    );
    let epoch = SessionEpoch::new();

    manager
        .request_export(request(Rect::new(0, 0, 10, 10), &epoch))
        .unwrap();

    match wait_for_outcome(&manager).await {
        Some(ExportOutcome::Failed(msg)) => {
            assert!(msg.contains("no filesystem access"), "unexpected: {msg}");
        }
        other => panic!("Expected failure outcome, got {other:?}"),
    }
    assert!(matches!(
        manager.get_status().await,
        CaptureStatus::Failed(_)
    ));
}

#[tokio::test]
async fn export_manager_flush_waits_for_queued_requests() {
    let sink = MockSink::default();
    let manager = ExportManager::with_dependencies(
        &tokio::runtime::Handle::current(),
        deps(ready_decoder(), sink.clone()),
    );
    let epoch = SessionEpoch::new();

    for _ in 0..3 {
        manager
            .request_export(request(Rect::new(0, 0, 5, 5), &epoch))
            .unwrap();
    }
    manager.flush().await;

    assert_eq!(sink.delivered.lock().unwrap().len(), 3);
    manager.reset().await;
    assert_eq!(manager.get_status().await, CaptureStatus::Idle);
}

#[test]
fn request_export_returns_error_when_channel_closed() {
    let manager = ExportManager::with_closed_channel_for_test();
    let epoch = SessionEpoch::new();
    let err = manager
        .request_export(request(Rect::new(0, 0, 1, 1), &epoch))
        .expect_err("should fail when channel closed");
    assert!(
        matches!(err, CaptureError::ImageError(ref msg) if msg.contains("not running")),
        "unexpected error variant: {err:?}"
    );
}
