use std::future::Future;
use tokio::sync::watch;

/// Create a linked pair of cancellation handle and token.
///
/// Calling `CancellationHandle::cancel` makes every clone of the token observe cancellation.
pub fn cancellation() -> (CancellationHandle, CancellationToken) {
    let (tx, rx) = watch::channel(false);
    (CancellationHandle { tx }, CancellationToken { rx })
}

// -------------------------------------------------------------------------------------------------
// CancellationHandle
// -------------------------------------------------------------------------------------------------
pub struct CancellationHandle {
    tx: watch::Sender<bool>,
}

impl CancellationHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

// -------------------------------------------------------------------------------------------------
// CancellationToken
// -------------------------------------------------------------------------------------------------
#[derive(Clone, Debug)]
pub struct CancellationToken {
    rx: watch::Receiver<bool>,
}

impl CancellationToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        CancellationToken { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until cancellation is requested.
    ///
    /// If the handle is dropped without cancelling, this never completes.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            let cancelled = *rx.borrow_and_update();
            if cancelled {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Run the given future to completion unless cancellation is requested first, in which case
    /// `None` is returned and the future is dropped.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.cancelled() => None,
            out = fut => Some(out),
        }
    }
}

impl Default for CancellationToken {
    /// Equivalent to `CancellationToken::never()`.
    fn default() -> Self {
        Self::never()
    }
}
