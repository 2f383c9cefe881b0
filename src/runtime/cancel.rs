use std::future::Future;

use tokio::sync::watch;

/// Marker returned when a guarded operation was interrupted by cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

/// Owning side of a run-scoped cancellation flag.
///
/// Dropping the source cancels every token derived from it.
#[derive(Debug)]
pub struct CancelSource {
    tx: watch::Sender<bool>,
}

impl CancelSource {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for CancelSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CancelSource {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}

/// Cloneable observer of a [`CancelSource`].
#[derive(Clone, Debug)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Checked at the top of every tick before touching shared visual state.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// `Err(Cancelled)` once cancelled, for `?` before a synchronous surface write.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Resolves once the run is cancelled (or its source is gone).
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Run `fut` unless cancellation arrives first.
    pub async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(Cancelled),
            out = fut => Ok(out),
        }
    }

    /// Cancellable delay.
    pub async fn sleep_ms(&self, ms: u64) -> Result<(), Cancelled> {
        self.guard(tokio::time::sleep(std::time::Duration::from_millis(ms)))
            .await
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/cancel.rs"]
mod tests;
