use crate::animation::clock::{Advance, AnimationClock, ClockTick};
use crate::runtime::cancel::CancelToken;
use crate::runtime::frames::FrameSource;
use crate::runtime::playback::Playback;

/// How a driven clock loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockExit {
    /// The terminal tick was delivered.
    Completed,
    /// Cancellation was observed; no tick fired after it.
    Cancelled,
}

/// Feed frames into `clock` until it finishes or the run is cancelled.
///
/// Paused frames still tick (with zero delta). The terminal `(1, total, ts, 0)` tick follows the
/// last regular tick of the finishing frame.
pub async fn drive_clock<F, T>(
    frames: &F,
    clock: &mut AnimationClock,
    playback: &Playback,
    cancel: &CancelToken,
    mut on_tick: T,
) -> ClockExit
where
    F: FrameSource,
    T: FnMut(ClockTick),
{
    loop {
        let Ok(timestamp) = cancel.guard(frames.next_frame()).await else {
            return ClockExit::Cancelled;
        };
        if cancel.is_cancelled() {
            return ClockExit::Cancelled;
        }

        let state = playback.snapshot();
        match clock.advance(timestamp, state.paused, state.speed) {
            Advance::Running(tick) => on_tick(tick),
            Advance::Finished { last, terminal } => {
                on_tick(last);
                on_tick(terminal);
                return ClockExit::Completed;
            }
            Advance::Done => return ClockExit::Completed,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
