//! Concurrency-safe shared state for the GestureCam pipeline.
//!
//! The capture loop writes here; the API server and the event forwarder read.
//! There is no channel between producer and consumers; all communication is
//! through this store. Each logical entity (frame, status, events) sits behind
//! its own lock, held only for the copy-in/copy-out; encoding, classification
//! and device reads always happen outside.

use std::sync::{Mutex, PoisonError};

use gcam_models::{Frame, GestureEvent, StatusSnapshot};

/// Holder for the latest frame, the status snapshot and the pending events.
///
/// All operations are atomic per entity. Reads hand out copies so callers
/// may block (e.g. on JPEG encoding) without lengthening lock hold time. At most one frame and one snapshot exist at a time; the events
/// queue is drained whole on read.
#[derive(Debug, Default)]
pub struct SharedStore {
    frame: Mutex<Option<Frame>>,
    status: Mutex<StatusSnapshot>,
    events: Mutex<Vec<GestureEvent>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published frame, dropping the previous one.
    pub fn publish_frame(&self, frame: Frame) {
        *lock(&self.frame) = Some(frame);
    }

    /// Copy of the latest published frame, if any has been produced yet.
    pub fn latest_frame(&self) -> Option<Frame> {
        lock(&self.frame).clone()
    }

    /// Atomically rewrite the status snapshot.
    ///
    /// The closure runs under the status lock and must not block; callers
    /// pass field assignments only.
    pub fn update_status(&self, f: impl FnOnce(&mut StatusSnapshot)) {
        f(&mut lock(&self.status));
    }

    /// Copy of the current status snapshot.
    pub fn status(&self) -> StatusSnapshot {
        lock(&self.status).clone()
    }

    /// Append an event to the pending queue.
    pub fn push_event(&self, event: GestureEvent) {
        lock(&self.events).push(event);
    }

    /// Take all pending events, leaving the queue empty.
    ///
    /// Ordered, exactly-once: an event appears in precisely one drain.
    pub fn drain_events(&self) -> Vec<GestureEvent> {
        std::mem::take(&mut lock(&self.events))
    }

    /// Number of pending events without draining them.
    pub fn pending_events(&self) -> usize {
        lock(&self.events).len()
    }
}

// The data under a poisoned lock is still a whole frame/snapshot/queue (every
// writer stores fully-built values), so recover instead of propagating.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
