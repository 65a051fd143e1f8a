//! Cooperative cancellation for regeneration cycles
//!
//! The host owns the token and decides when a cycle has run long enough.
//! The plugin and the generator only ever ask.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{Result, WebfontError};

/// Shared cancel flag with an optional deadline
///
/// Clones observe the same flag, so a host can keep one clone and hand the
/// other to a running cycle.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// A token that never fires on its own
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that fires once `timeout` has elapsed
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::default(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// `Err(Cancelled)` once the token has fired
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(WebfontError::Cancelled)
        } else {
            Ok(())
        }
    }
}
