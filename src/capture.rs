//! Screen-capture control around a run.
//!
//! Recording itself is a collaborator behind [`CaptureSink`]; this module only owns the state
//! machine and the start-then-animate handoff.

use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::foundation::error::{FlypathError, FlypathResult};

/// Delay between capture start and the programmatic run start.
pub const CAPTURE_LEAD: Duration = Duration::from_millis(100);

pub trait CaptureSink {
    /// Acquire the capture source and begin recording.
    fn start(&self) -> impl Future<Output = FlypathResult<()>>;
    fn pause(&self) -> FlypathResult<()>;
    fn resume(&self) -> FlypathResult<()>;
    /// Finish and flush the recording.
    fn stop(&self) -> FlypathResult<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Paused,
}

/// Recorder state machine: `Idle -> Recording <-> Paused -> Idle`.
///
/// Requests that do not fit the current state are ignored and reported as `Ok(false)`.
#[derive(Debug)]
pub struct Recorder<C> {
    sink: C,
    state: RecorderState,
}

impl<C: CaptureSink> Recorder<C> {
    pub fn new(sink: C) -> Self {
        Self {
            sink,
            state: RecorderState::Idle,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn sink(&self) -> &C {
        &self.sink
    }

    pub fn is_recording(&self) -> bool {
        self.state != RecorderState::Idle
    }

    /// A sink that fails to start leaves the recorder idle.
    pub async fn start(&mut self) -> FlypathResult<bool> {
        if self.state != RecorderState::Idle {
            return Ok(false);
        }
        self.sink.start().await?;
        self.state = RecorderState::Recording;
        debug!("capture started");
        Ok(true)
    }

    pub fn pause(&mut self) -> FlypathResult<bool> {
        if self.state != RecorderState::Recording {
            return Ok(false);
        }
        self.sink.pause()?;
        self.state = RecorderState::Paused;
        Ok(true)
    }

    pub fn resume(&mut self) -> FlypathResult<bool> {
        if self.state != RecorderState::Paused {
            return Ok(false);
        }
        self.sink.resume()?;
        self.state = RecorderState::Recording;
        Ok(true)
    }

    /// Pause when recording, resume when paused.
    pub fn toggle_pause(&mut self) -> FlypathResult<bool> {
        match self.state {
            RecorderState::Recording => self.pause(),
            RecorderState::Paused => self.resume(),
            RecorderState::Idle => Ok(false),
        }
    }

    /// Stop from either active state. The recorder is idle afterwards even if the sink failed.
    pub fn stop(&mut self) -> FlypathResult<bool> {
        if self.state == RecorderState::Idle {
            return Ok(false);
        }
        self.state = RecorderState::Idle;
        if let Err(err) = self.sink.stop() {
            warn!(%err, "capture did not stop cleanly");
            return Err(err);
        }
        debug!("capture stopped");
        Ok(true)
    }

    /// Start capturing, wait [`CAPTURE_LEAD`], then run `then`.
    pub async fn start_then<T, Fut>(&mut self, then: impl FnOnce() -> Fut) -> FlypathResult<T>
    where
        Fut: Future<Output = T>,
    {
        if !self.start().await? {
            return Err(FlypathError::validation("capture is already running"));
        }
        tokio::time::sleep(CAPTURE_LEAD).await;
        Ok(then().await)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureEventKind {
    Start,
    Pause,
    Resume,
    Stop,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptureEvent {
    pub at_ms: f64,
    pub kind: CaptureEventKind,
}

/// Sink that only records when capture calls happened, for headless runs.
#[derive(Debug)]
pub struct CaptureLog {
    origin: Instant,
    events: RefCell<Vec<CaptureEvent>>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<CaptureEvent> {
        self.events.borrow().clone()
    }

    fn push(&self, kind: CaptureEventKind) {
        let at_ms = self.origin.elapsed().as_nanos() as f64 / 1_000_000.0;
        self.events.borrow_mut().push(CaptureEvent { at_ms, kind });
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSink for CaptureLog {
    fn start(&self) -> impl Future<Output = FlypathResult<()>> {
        self.push(CaptureEventKind::Start);
        std::future::ready(Ok(()))
    }

    fn pause(&self) -> FlypathResult<()> {
        self.push(CaptureEventKind::Pause);
        Ok(())
    }

    fn resume(&self) -> FlypathResult<()> {
        self.push(CaptureEventKind::Resume);
        Ok(())
    }

    fn stop(&self) -> FlypathResult<()> {
        self.push(CaptureEventKind::Stop);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/capture.rs"]
mod tests;
