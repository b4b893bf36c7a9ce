// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative cancellation shared by the scheduler, pool and agent session.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Why a [`CancelSignal`] was tripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelCause {
    /// An operator-initiated cancellation (e.g. Ctrl-C on the CLI).
    UserRequested,
    /// A sibling host in the same chunk failed and `fail_fast` is set.
    FailFast { host: String },
    /// A deadline elapsed.
    Timeout,
}

/// A cheap, cloneable cancellation handle.
///
/// Wraps a [`CancellationToken`] plus the cause that tripped it, set exactly
/// once under a lock so every clone observes the same cause after cancellation.
#[derive(Clone)]
pub struct CancelSignal {
    token: CancellationToken,
    cause: Arc<parking_lot::Mutex<Option<CancelCause>>>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self { token: CancellationToken::new(), cause: Arc::new(parking_lot::Mutex::new(None)) }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    pub fn cause(&self) -> Option<CancelCause> {
        self.cause.lock().clone()
    }

    pub fn cancel(&self, cause: CancelCause) {
        let mut slot = self.cause.lock();
        if slot.is_none() {
            *slot = Some(cause);
        }
        self.token.cancel();
    }

    /// Derive a child signal: cancelling the child never cancels `self`, but
    /// cancelling `self` always cancels every descendant. The scheduler uses
    /// this to scope one token per chunk, so cancelling one chunk's signal
    /// never touches a sibling chunk's already-issued signal.
    ///
    /// The child's own cause cell is independent of its parent's: a cause set
    /// directly on the child is visible via `child.cause()`; a cancellation
    /// that only reached the child through the parent token leaves the
    /// child's `cause()` as `None` (the parent's own handle still reports it).
    pub fn child_token(&self) -> CancelSignal {
        CancelSignal {
            token: self.token.child_token(),
            cause: Arc::new(parking_lot::Mutex::new(None)),
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;
