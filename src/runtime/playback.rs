use tokio::sync::watch;

/// Pause flag and speed multiplier shared by every loop of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    pub paused: bool,
    pub speed: f64,
}

impl PlaybackState {
    pub const MIN_SPEED: f64 = 0.5;
    pub const MAX_SPEED: f64 = 3.0;
    /// One scroll-wheel notch.
    pub const SPEED_STEP: f64 = 0.1;

    pub fn clamp_speed(speed: f64) -> f64 {
        if speed.is_finite() {
            speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED)
        } else {
            1.0
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            paused: false,
            speed: 1.0,
        }
    }
}

/// Controller side: pause/resume and speed changes.
#[derive(Debug)]
pub struct PlaybackHandle {
    tx: watch::Sender<PlaybackState>,
}

impl PlaybackHandle {
    pub fn new(speed: f64) -> Self {
        let (tx, _rx) = watch::channel(PlaybackState {
            paused: false,
            speed: PlaybackState::clamp_speed(speed),
        });
        Self { tx }
    }

    pub fn state(&self) -> PlaybackState {
        *self.tx.borrow()
    }

    pub fn watch(&self) -> Playback {
        Playback {
            rx: self.tx.subscribe(),
        }
    }

    pub fn pause(&self) {
        self.tx.send_modify(|s| s.paused = true);
    }

    pub fn resume(&self) {
        self.tx.send_modify(|s| s.paused = false);
    }

    /// Flip the paused flag; returns the new value.
    pub fn toggle(&self) -> bool {
        let mut paused = false;
        self.tx.send_modify(|s| {
            s.paused = !s.paused;
            paused = s.paused;
        });
        paused
    }

    /// Clamped into `[MIN_SPEED, MAX_SPEED]`; returns the applied value.
    pub fn set_speed(&self, speed: f64) -> f64 {
        let speed = PlaybackState::clamp_speed(speed);
        self.tx.send_modify(|s| s.speed = speed);
        speed
    }

    /// Add `delta` and round to one decimal before clamping.
    pub fn nudge_speed(&self, delta: f64) -> f64 {
        let current = self.state().speed;
        let next = ((current + delta) * 10.0).round() / 10.0;
        self.set_speed(next)
    }

    /// Replace the whole state, e.g. when a new run starts unpaused.
    pub fn reset(&self, speed: f64) {
        self.tx.send_replace(PlaybackState {
            paused: false,
            speed: PlaybackState::clamp_speed(speed),
        });
    }
}

impl Default for PlaybackHandle {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Read side, cloned into every loop.
#[derive(Clone, Debug)]
pub struct Playback {
    rx: watch::Receiver<PlaybackState>,
}

impl Playback {
    /// Current state; read once per tick.
    pub fn snapshot(&self) -> PlaybackState {
        *self.rx.borrow()
    }

    pub fn is_paused(&self) -> bool {
        self.rx.borrow().paused
    }

    pub fn speed(&self) -> f64 {
        self.rx.borrow().speed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/playback.rs"]
mod tests;
