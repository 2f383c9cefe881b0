use crate::animation::pacing::ClockDuration;

/// One progress sample handed to tick consumers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockTick {
    /// Fraction of the path covered, in `[0, 1]`.
    pub progress: f64,
    /// `total_distance * progress`, in meters.
    pub distance: f64,
    /// Frame timestamp in milliseconds.
    pub timestamp: f64,
    /// Active milliseconds since the previous frame (0 while paused).
    pub delta: f64,
}

/// Result of feeding one frame into an [`AnimationClock`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    /// Progress is still below 1.
    Running(ClockTick),
    /// Progress reached 1 on this frame. `last` is the regular tick for the frame, `terminal` the
    /// closing `(1, total, timestamp, 0)` tick.
    Finished { last: ClockTick, terminal: ClockTick },
    /// The clock already finished; nothing to emit.
    Done,
}

/// Converts frame timestamps into progress for one path, independent of frame rate.
///
/// Only active (unpaused) time accumulates; resuming continues from the exact accumulated value.
/// Progress never decreases, even when a speed drop stretches a paced duration mid-flight.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    duration: ClockDuration,
    total_distance: f64,
    start_time: Option<f64>,
    last_timestamp: Option<f64>,
    elapsed_active: f64,
    reached: f64,
    finished: bool,
}

impl AnimationClock {
    pub fn new(duration: ClockDuration, total_distance: f64) -> Self {
        Self {
            duration,
            total_distance: total_distance.max(0.0),
            start_time: None,
            last_timestamp: None,
            elapsed_active: 0.0,
            reached: 0.0,
            finished: false,
        }
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// Milliseconds of unpaused time seen so far.
    pub fn elapsed_active(&self) -> f64 {
        self.elapsed_active
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Progress for the currently accumulated active time at the given speed, floored at the
    /// furthest progress already emitted.
    pub fn progress(&self, speed: f64) -> f64 {
        let duration = self.duration.resolve(speed);
        let raw = if duration > 0.0 {
            (self.elapsed_active / duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        raw.max(self.reached)
    }

    /// Feed one frame.
    pub fn advance(&mut self, timestamp: f64, paused: bool, speed: f64) -> Advance {
        if self.finished {
            return Advance::Done;
        }
        self.start_time.get_or_insert(timestamp);
        let last = *self.last_timestamp.get_or_insert(timestamp);

        let delta = if paused {
            0.0
        } else {
            (timestamp - last).max(0.0)
        };
        self.elapsed_active += delta;
        self.last_timestamp = Some(timestamp);

        let progress = self.progress(speed);
        self.reached = progress;
        let tick = ClockTick {
            progress,
            distance: self.total_distance * progress,
            timestamp,
            delta,
        };
        if progress < 1.0 {
            return Advance::Running(tick);
        }

        self.finished = true;
        Advance::Finished {
            last: tick,
            terminal: ClockTick {
                progress: 1.0,
                distance: self.total_distance,
                timestamp,
                delta: 0.0,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
