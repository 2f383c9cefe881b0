use std::cell::RefCell;
use std::convert::Infallible;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{Instant, sleep_until};

use crate::surface::{LayerId, MapSurface};

/// Run-scoped store of short-lived layers (comet particles).
///
/// Entries are removed by [`Transients::sweep`] once their lifetime elapsed. A cancelled run simply
/// drops the store; the next run clears every layer anyway.
#[derive(Debug, Default)]
pub struct Transients {
    entries: RefCell<Vec<(Instant, LayerId)>>,
    added: Notify,
}

impl Transients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, id: LayerId, lifetime: Duration) {
        self.entries.borrow_mut().push((Instant::now() + lifetime, id));
        self.added.notify_one();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.entries.borrow().iter().map(|(at, _)| *at).min()
    }

    fn remove_expired<S: MapSurface>(&self, surface: &S) {
        let now = Instant::now();
        let expired: Vec<LayerId> = {
            let mut entries = self.entries.borrow_mut();
            let (gone, keep): (Vec<_>, Vec<_>) = entries.drain(..).partition(|(at, _)| *at <= now);
            *entries = keep;
            gone.into_iter().map(|(_, id)| id).collect()
        };
        for id in expired {
            surface.remove_layer(id);
        }
    }

    /// Remove entries as they expire. Never returns; drop it to stop sweeping.
    pub async fn sweep<S: MapSurface>(&self, surface: &S) -> Infallible {
        loop {
            self.remove_expired(surface);
            match self.next_deadline() {
                Some(deadline) => {
                    tokio::select! {
                        _ = sleep_until(deadline) => {}
                        _ = self.added.notified() => {}
                    }
                }
                None => self.added.notified().await,
            }
        }
    }

    /// Wait for every outstanding entry to expire, removing each on time.
    pub async fn drain<S: MapSurface>(&self, surface: &S) {
        while let Some(deadline) = self.next_deadline() {
            sleep_until(deadline).await;
            self.remove_expired(surface);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/transients.rs"]
mod tests;
