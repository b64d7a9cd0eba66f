//! Animation-frame scheduling capability.
//!
//! ARCHITECTURE
//! ============
//! Tools never call `requestAnimationFrame` directly. They receive a
//! [`FrameScheduler`] at construction, so the browser build can plug in the
//! real display loop (`crate::web::RafScheduler`) while tests and replay
//! tooling drive frames by hand with [`ManualScheduler`].
//!
//! Cancelling is idempotent: cancelling a handle that already fired or was
//! already cancelled does nothing.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;

/// Callback run once before the next repaint.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Opaque id of a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

impl fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// "Run this before the next repaint" / "never mind".
pub trait FrameScheduler {
    /// Queue `callback` for the next frame. Never runs it synchronously.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Drop a queued callback. No-op for unknown, fired or cancelled handles.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Scheduler whose frames fire only when [`ManualScheduler::run_frame`] is called.
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<BTreeMap<FrameHandle, FrameCallback>>,
    next_id: Cell<u64>,
    requested: Cell<usize>,
    cancelled: Cell<usize>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every callback queued before this call, in request order.
    ///
    /// Callbacks requested while the frame runs wait for the next frame.
    /// Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let count = due.len();
        for (handle, callback) in due {
            tracing::trace!(%handle, "running frame callback");
            callback();
        }
        count
    }

    /// Number of callbacks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    #[must_use]
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.borrow().contains_key(&handle)
    }

    /// Total frames requested over the scheduler's lifetime.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.requested.get()
    }

    /// Total effective cancellations (handles that were actually pending).
    #[must_use]
    pub fn cancelled(&self) -> usize {
        self.cancelled.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.requested.set(self.requested.get() + 1);
        self.pending.borrow_mut().insert(handle, callback);
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if self.pending.borrow_mut().remove(&handle).is_some() {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }
}
