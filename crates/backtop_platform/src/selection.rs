//! Page-wide text-selection suppression
//!
//! Dragging the control across text would otherwise select it. A drag claims
//! suppression with [`TextSelection::suppress`] and holds the returned
//! [`SelectionGuard`] for the duration of the gesture; selection comes back
//! when the last guard is dropped, however the gesture ends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared handle to the host's text-selection switch
#[derive(Clone, Debug, Default)]
pub struct TextSelection {
    claims: Arc<AtomicUsize>,
}

impl TextSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress selection until the returned guard is dropped
    pub fn suppress(&self) -> SelectionGuard {
        let previous = self.claims.fetch_add(1, Ordering::AcqRel);
        if previous == 0 {
            tracing::trace!("text selection suppressed");
        }
        SelectionGuard {
            claims: Arc::clone(&self.claims),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.claims.load(Ordering::Acquire) > 0
    }

    /// Number of outstanding guards
    pub fn claims(&self) -> usize {
        self.claims.load(Ordering::Acquire)
    }
}

/// Releases its suppression claim on drop
#[must_use = "selection is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SelectionGuard {
    claims: Arc<AtomicUsize>,
}

impl Drop for SelectionGuard {
    fn drop(&mut self) {
        if self.claims.fetch_sub(1, Ordering::AcqRel) == 1 {
            tracing::trace!("text selection restored");
        }
    }
}
