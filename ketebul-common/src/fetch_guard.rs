//! Stale-response guard
//!
//! Each fetch is tagged with a token when it starts. When a response arrives
//! it is accepted only if its token is still the latest one issued by the
//! tracker; anything older has been superseded and is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Token identifying one outstanding request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues tokens and remembers the latest one
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier token
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Pass `value` through only if `token` is still current
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Option<T> {
        if self.is_current(token) {
            Some(value)
        } else {
            tracing::debug!(
                token = token.0,
                latest = self.latest.load(Ordering::SeqCst),
                "Discarding stale response"
            );
            None
        }
    }

    /// Invalidate every outstanding token (e.g. the view went away)
    pub fn cancel_all(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}
