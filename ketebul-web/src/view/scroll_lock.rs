//! Reference-counted page scroll lock
//!
//! The page stays scroll-locked while at least one guard is alive. Overlapping
//! openers each hold their own guard, so one of them closing never unlocks a
//! page another still needs locked.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Scroll-lock flag for one document; clones share the same counter
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable scrolling until the returned guard is dropped
    pub fn acquire(&self) -> ScrollLockGuard {
        let previous = self.holders.fetch_add(1, Ordering::SeqCst);
        if previous == 0 {
            tracing::trace!("Page scroll disabled");
        }
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }
}

/// RAII holder of a [`ScrollLock`]
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        if self.holders.fetch_sub(1, Ordering::SeqCst) == 1 {
            tracing::trace!("Page scroll restored");
        }
    }
}
