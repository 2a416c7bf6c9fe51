//! Cooperative cancellation shared between the signal adapter and the loop.
//!
//! [`ShutdownToken`] is a cloneable handle around an atomic flag. The
//! signal side calls [`cancel`](ShutdownToken::cancel); the loop checks
//! [`is_cancelled`](ShutdownToken::is_cancelled) at the top of every tick and
//! waits out the rest of the interval with
//! [`wait_timeout`](ShutdownToken::wait_timeout), which returns early on
//! cancellation instead of sleeping through it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded};

struct Inner {
    cancelled: AtomicBool,
    wake_tx: Sender<()>,
    wake_rx: Receiver<()>,
}

/// Cloneable cancellation handle.
#[derive(Clone)]
pub struct ShutdownToken {
    inner: Arc<Inner>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        let (wake_tx, wake_rx) = bounded(1);
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                wake_tx,
                wake_rx,
            }),
        }
    }

    /// Request shutdown. Idempotent, callable from any thread.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        // A full channel already holds a pending wake
        let _ = self.inner.wake_tx.try_send(());
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool { self.inner.cancelled.load(Ordering::Acquire) }

    /// Block for up to `timeout`. Returns `true` if cancelled.
    pub fn wait_timeout(
        &self,
        timeout: Duration,
    ) -> bool {
        if self.is_cancelled() {
            return true;
        }
        if self.inner.wake_rx.recv_timeout(timeout).is_ok() {
            // Leave the wake for any other waiter on a clone
            let _ = self.inner.wake_tx.try_send(());
        }
        self.is_cancelled()
    }
}

impl Default for ShutdownToken {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for ShutdownToken {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ShutdownToken").field("cancelled", &self.is_cancelled()).finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
