use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Source of animation frames (the `requestAnimationFrame` of this crate).
///
/// Timestamps are milliseconds, monotonically non-decreasing. Loops that await the same frame
/// observe the same timestamp.
pub trait FrameSource {
    fn next_frame(&self) -> impl Future<Output = f64>;
}

impl<T: FrameSource + ?Sized> FrameSource for &T {
    fn next_frame(&self) -> impl Future<Output = f64> {
        (**self).next_frame()
    }
}

impl<T: FrameSource + ?Sized> FrameSource for std::rc::Rc<T> {
    fn next_frame(&self) -> impl Future<Output = f64> {
        (**self).next_frame()
    }
}

/// Fixed-rate frame grid on the tokio clock.
///
/// Frame `k` fires at `origin + k * period`; awaiting `next_frame` always waits for the next grid
/// point strictly after "now".
#[derive(Clone, Debug)]
pub struct Ticker {
    origin: Instant,
    period: Duration,
}

impl Ticker {
    pub const DEFAULT_FPS: u32 = 60;

    pub fn new(fps: u32) -> Self {
        Self::with_origin(Instant::now(), fps)
    }

    pub fn with_origin(origin: Instant, fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            origin,
            period: Duration::from_nanos(1_000_000_000 / u64::from(fps)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Milliseconds between the origin and `at`.
    pub fn millis_at(&self, at: Instant) -> f64 {
        at.saturating_duration_since(self.origin).as_nanos() as f64 / 1_000_000.0
    }

    /// Milliseconds elapsed since the origin.
    pub fn now_millis(&self) -> f64 {
        self.millis_at(Instant::now())
    }

    fn next_grid_point(&self, now: Instant) -> Instant {
        let period_ns = self.period.as_nanos().max(1);
        let elapsed_ns = now.saturating_duration_since(self.origin).as_nanos();
        let k = elapsed_ns / period_ns + 1;
        let offset = u64::try_from(k * period_ns).unwrap_or(u64::MAX);
        self.origin + Duration::from_nanos(offset)
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FPS)
    }
}

impl FrameSource for Ticker {
    fn next_frame(&self) -> impl Future<Output = f64> {
        let at = self.next_grid_point(Instant::now());
        let ms = self.millis_at(at);
        async move {
            sleep_until(at).await;
            ms
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/frames.rs"]
mod tests;
