//! Caller-side throttling for concurrent uploads.
//!
//! The pipeline itself does not bound concurrency; the orchestration layer
//! acquires a permit per in-flight upload, sized by
//! `UploadLimits::max_concurrent_uploads`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A counting gate over concurrent pipeline invocations.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    permits: Arc<Semaphore>,
}

/// A held permit; dropping it releases the slot.
#[derive(Debug)]
pub struct UploadPermit {
    _permit: OwnedSemaphorePermit,
    waited: Duration,
}

impl UploadPermit {
    /// Time spent waiting for the permit (zero if none was required).
    pub fn waited(&self) -> Duration {
        self.waited
    }
}

impl ConcurrencyGate {
    /// Create a gate allowing `max_concurrent` simultaneous uploads.
    ///
    /// # Panics
    ///
    /// Panics if `max_concurrent == 0`.
    pub fn new(max_concurrent: usize) -> Self {
        assert!(max_concurrent > 0, "max_concurrent must be > 0");
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Acquire one permit, waiting until a slot frees up.
    pub async fn acquire(&self) -> UploadPermit {
        let start = Instant::now();
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .expect("upload semaphore closed");
        UploadPermit {
            _permit: permit,
            waited: start.elapsed(),
        }
    }

    /// Number of currently available slots.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
