use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Whether the screen that started a request is still there to receive it.
///
/// Controllers check this after every await and before touching state.
#[derive(Debug, Clone)]
pub struct Liveness {
    mounted: Arc<AtomicBool>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Marks the screen gone when the returned guard is dropped.
    pub fn unmount_on_drop(&self) -> UnmountGuard {
        UnmountGuard {
            liveness: self.clone(),
        }
    }
}

/// Runs `work` on its own task and waits for it.
///
/// The waiting side holds the unmount guard. If it is dropped first (a client
/// hanging up on a request), `work` keeps running but finds the screen gone
/// once its own await returns.
pub async fn run_mounted<T, F, Fut>(work: F) -> Result<T, tokio::task::JoinError>
where
    F: FnOnce(Liveness) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let liveness = Liveness::new();
    let _unmount = liveness.unmount_on_drop();
    tokio::spawn(work(liveness.clone())).await
}

pub struct UnmountGuard {
    liveness: Liveness,
}

impl Drop for UnmountGuard {
    fn drop(&mut self) {
        self.liveness.unmount();
    }
}
