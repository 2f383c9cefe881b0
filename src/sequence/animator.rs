use std::cell::RefCell;
use std::rc::Rc;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::camera::focus::{FocusRequest, FocusSlot, focus};
use crate::foundation::error::{FlypathError, FlypathResult};
use crate::plan::model::WaypointGroup;
use crate::runtime::cancel::CancelSource;
use crate::runtime::frames::FrameSource;
use crate::runtime::playback::PlaybackHandle;
use crate::sequence::registry::RunRegistry;
use crate::sequence::run::{Run, RunPhase};
use crate::settings::{Appearance, RunSettings};
use crate::surface::{LayerUpdate, MapSurface};

pub const NOTHING_TO_ANIMATE: &str = "There is nothing to animate: no group has a path.";

/// Owner of the surface between runs.
///
/// Holds the controls that outlive a single run (playback, focus, appearance) and guarantees that
/// at most one run is live: [`Animator::start`] cancels the previous run and clears the surface
/// before handing out the next one.
pub struct Animator<S, F> {
    surface: Rc<S>,
    frames: Rc<F>,
    settings: RunSettings,
    playback: PlaybackHandle,
    phase: Rc<watch::Sender<RunPhase>>,
    focus: FocusSlot,
    current: Option<CancelSource>,
    registry: Rc<RefCell<RunRegistry>>,
    runs: u64,
}

impl<S: MapSurface, F: FrameSource> Animator<S, F> {
    pub fn new(surface: Rc<S>, frames: Rc<F>, settings: RunSettings) -> FlypathResult<Self> {
        settings.validate()?;
        let (phase, _) = watch::channel(RunPhase::Idle);
        Ok(Self {
            surface,
            frames,
            playback: PlaybackHandle::new(settings.speed),
            registry: Rc::new(RefCell::new(RunRegistry::new(settings.appearance))),
            settings,
            phase: Rc::new(phase),
            focus: FocusSlot::new(),
            current: None,
            runs: 0,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Replace the settings. Style and camera changes apply from the next run.
    pub fn set_settings(&mut self, settings: RunSettings) -> FlypathResult<()> {
        settings.validate()?;
        self.playback.set_speed(settings.speed);
        self.settings = settings;
        Ok(())
    }

    pub fn playback(&self) -> &PlaybackHandle {
        &self.playback
    }

    pub fn phase(&self) -> watch::Receiver<RunPhase> {
        self.phase.subscribe()
    }

    pub fn registry(&self) -> Rc<RefCell<RunRegistry>> {
        Rc::clone(&self.registry)
    }

    /// Cancel whatever runs, reset the surface and return a fresh run over `groups`.
    ///
    /// Fails with an input error when no group has at least two points; shorter groups next to a
    /// valid one are skipped by the run itself.
    pub fn start(&mut self, groups: Vec<WaypointGroup>) -> FlypathResult<Run<S, F>> {
        if groups.iter().all(|g| g.waypoints.len() < 2) {
            return Err(FlypathError::input(NOTHING_TO_ANIMATE));
        }
        self.cancel();
        self.surface.clear_layers();
        self.registry = Rc::new(RefCell::new(RunRegistry::new(self.settings.appearance)));
        self.playback.resume();

        let cancel = CancelSource::new();
        let token = cancel.token();
        self.current = Some(cancel);
        self.runs += 1;
        info!(run_id = self.runs, groups = groups.len(), "starting run");

        Ok(Run {
            id: self.runs,
            surface: Rc::clone(&self.surface),
            frames: Rc::clone(&self.frames),
            settings: self.settings.clone(),
            groups,
            playback: self.playback.watch(),
            cancel: token,
            registry: Rc::clone(&self.registry),
            phase: Rc::clone(&self.phase),
            started: Instant::now(),
            timeline: RefCell::new(Vec::new()),
        })
    }

    /// Cancel the live run, if any, and stop camera motion. Layers stay until the next start.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!(run_id = self.runs, "cancelling run");
            previous.cancel();
        }
        if let Err(err) = self.surface.stop() {
            warn!(%err, "stopping the surface failed");
        }
        self.phase.send_replace(RunPhase::Idle);
    }

    pub fn pause(&self) {
        self.playback.pause();
    }

    pub fn resume(&self) {
        self.playback.resume();
    }

    /// Flip pause; returns the new paused state.
    pub fn toggle_pause(&self) -> bool {
        self.playback.toggle()
    }

    pub fn set_speed(&self, speed: f64) -> f64 {
        self.playback.set_speed(speed)
    }

    /// Step the speed by `delta` (scroll wheel). Ignored while pacing is time-based.
    pub fn nudge_speed(&self, delta: f64) -> f64 {
        if self.settings.pacing.is_time_based() {
            return self.playback.state().speed;
        }
        self.playback.nudge_speed(delta)
    }

    /// Apply `appearance` to every animated line still on the surface and to groups mounted later
    /// in the current run. Returns how many lines were restyled.
    pub fn restyle(&mut self, appearance: Appearance) -> FlypathResult<usize> {
        appearance.validate()?;
        self.settings.appearance = appearance;
        let lines = {
            let mut registry = self.registry.borrow_mut();
            registry.set_appearance(appearance);
            registry.lines()
        };
        let restyled = lines
            .into_iter()
            .filter(|id| {
                self.surface.update_layer(
                    *id,
                    LayerUpdate::Restyle {
                        weight: appearance.weight,
                        opacity: appearance.opacity,
                        dash: appearance.dash_pattern(),
                    },
                )
            })
            .count();
        debug!(restyled, "appearance updated");
        Ok(restyled)
    }

    /// Queue `request` and fly it. Completion is reported through [`Animator::focus_slot`].
    pub async fn focus(&self, request: FocusRequest) -> Option<FocusRequest> {
        self.focus.request(request);
        focus(&*self.surface, &self.focus).await
    }

    pub fn focus_slot(&self) -> &FocusSlot {
        &self.focus
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/animator.rs"]
mod tests;
