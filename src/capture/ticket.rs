//! Cancellation tickets for in-flight exports.
//!
//! The controller owns a [`SessionEpoch`]; every queued export carries an
//! [`ExportTicket`] minted from it. Advancing the epoch (new session, cancel,
//! explicit abort) makes all outstanding tickets stale, and the pipeline
//! drops any bitmap whose ticket went stale while it was being decoded.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Shared generation counter for capture sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionEpoch {
    current: Arc<AtomicU64>,
}

impl SessionEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket valid until the next [`SessionEpoch::invalidate`].
    pub fn ticket(&self) -> ExportTicket {
        ExportTicket {
            epoch: Arc::clone(&self.current),
            issued: self.current.load(Ordering::SeqCst),
        }
    }

    /// Makes every ticket issued so far stale.
    pub fn invalidate(&self) {
        let previous = self.current.fetch_add(1, Ordering::SeqCst);
        log::trace!("Export epoch advanced to {}", previous + 1);
    }

    pub fn value(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Proof that an export was requested in the still-current session.
#[derive(Debug, Clone)]
pub struct ExportTicket {
    epoch: Arc<AtomicU64>,
    issued: u64,
}

impl ExportTicket {
    pub fn is_current(&self) -> bool {
        self.epoch.load(Ordering::SeqCst) == self.issued
    }

    /// A ticket that never goes stale, for one-off exports outside a session.
    pub fn detached() -> Self {
        SessionEpoch::new().ticket()
    }
}
