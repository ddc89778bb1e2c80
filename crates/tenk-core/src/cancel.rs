//! Cooperative cancellation, checked between items and between chunks.
//!
//! The core pipeline never blocks and has no internal suspension points, so
//! cancellation cannot interrupt work in progress — it is only observed at the
//! two checkpoints the design calls out. `CancellationToken` is cheaply
//! cloneable (an `Arc<AtomicBool>`) so the outer per-filing worker can hold one
//! end while the pipeline holds the other.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
