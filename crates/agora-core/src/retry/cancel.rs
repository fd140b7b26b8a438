//! Cooperative cancellation for in-flight retry loops
//!
//! The console UI can navigate away while an upgrade confirmation is still
//! polling; handing the executor a [`CancelToken`] lets the owner abort
//! the remaining attempts instead of stranding a timer chain.

use tokio::sync::watch;

/// Create a linked cancellation handle/token pair
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// Owner side: signals cancellation to every linked token
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// Create another token linked to this handle
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }
}

/// Borrower side: observed by retry loops between and during attempts
///
/// Dropping the handle without calling `cancel` never cancels the token;
/// a detached token simply can no longer be cancelled.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Whether cancellation has been signalled
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is signalled
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // Handle dropped without cancelling: stay pending forever.
                std::future::pending::<()>().await;
            }
        }
    }
}
