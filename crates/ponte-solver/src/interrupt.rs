//! Cooperative cancellation for long-running native solves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle over one shared cancellation flag.
///
/// The orchestrator resets the flag at the start of each solve; the
/// backend polls it during its native call and stops when it is set. An
/// interrupted solve must classify as `Interrupted`, not `Failure`.
#[derive(Debug, Clone, Default)]
pub struct Interrupter {
    flag: Arc<AtomicBool>,
}

impl Interrupter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe from any thread or signal context.
    pub fn interrupt(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Poll whether a cancellation was requested.
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear the flag; called at the start of each solve invocation.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
