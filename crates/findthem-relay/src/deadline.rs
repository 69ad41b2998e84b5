//! Deadlines and per-call cancellation.
//!
//! Every query and publish runs inside its own cancellation scope. When the
//! deadline passes, the in-flight future is dropped and the scope's
//! [`CancelSignal`] fires, so relay clients that spawned background work
//! stop it instead of finishing it after the caller has been told the call
//! timed out. The signal also fires when the scope ends normally or when the
//! caller abandons the call.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// An explicit point in time after which an operation is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(Instant);

impl Deadline {
    /// A deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now() + timeout)
    }

    pub fn instant(self) -> Instant {
        self.0
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }

    pub fn has_elapsed(self) -> bool {
        Instant::now() >= self.0
    }
}

/// Cancellation signal handed to relay clients for the duration of one call.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires, for driving a client outside an executor.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the owning scope has been cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // The scope went away without cancelling: only `never()` does that.
            std::future::pending::<()>().await;
        }
    }
}

/// Owner side of a [`CancelSignal`]. Cancels on drop.
#[derive(Debug)]
pub(crate) struct CancelScope {
    tx: watch::Sender<bool>,
}

impl CancelScope {
    pub(crate) fn new() -> (Self, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancelSignal { rx })
    }

    pub(crate) fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Drop for CancelScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// The deadline passed before the operation completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Elapsed;

/// Runs `op` until it completes or `deadline` passes.
///
/// On expiry the operation's future is dropped and its cancel signal fires
/// before this returns. A deadline that has already passed fails without
/// starting the operation.
pub(crate) async fn run_until<T, F, Fut>(deadline: Deadline, op: F) -> Result<T, Elapsed>
where
    F: FnOnce(CancelSignal) -> Fut,
    Fut: Future<Output = T>,
{
    if deadline.has_elapsed() {
        return Err(Elapsed);
    }
    let (scope, signal) = CancelScope::new();
    match tokio::time::timeout_at(deadline.instant(), op(signal)).await {
        Ok(value) => Ok(value),
        Err(_) => {
            scope.cancel();
            Err(Elapsed)
        }
    }
}
