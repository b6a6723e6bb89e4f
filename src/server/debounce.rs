//! Trailing-edge debounce: of a burst of calls, only the last one runs, after a quiet window.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(window: Duration) -> Arc<Self> {
        Arc::new(Debouncer {
            window,
            generation: AtomicU64::new(0),
        })
    }

    /// Schedule `task`. Any task scheduled earlier that has not started yet is dropped.
    pub fn call<F, Fut>(self: &Arc<Self>, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let this = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(this.window).await;
            if this.generation.load(Ordering::SeqCst) == ticket {
                task().await;
            }
        });
    }
}
