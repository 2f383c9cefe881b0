use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::animation::clock::AnimationClock;
use crate::animation::driver::{ClockExit, drive_clock};
use crate::animation::pacing::{GroupPacing, resolve_duration};
use crate::camera::follow::follow_path;
use crate::camera::transition::{final_overview, pre_roll_ms, show_group};
use crate::geo::path::GeoPath;
use crate::plan::model::WaypointGroup;
use crate::render::{PathRenderer, TickCx, Transients};
use crate::runtime::cancel::{CancelToken, Cancelled};
use crate::runtime::frames::FrameSource;
use crate::runtime::playback::Playback;
use crate::sequence::registry::RunRegistry;
use crate::settings::RunSettings;
use crate::surface::{Layer, MapSurface};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    Preparing,
    /// Camera moving to the current group.
    Transitioning,
    /// Settle and pre-roll delays before the first frame.
    Settling,
    Animating,
    FinalOverview,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// One timeline entry. `at_ms` is measured on the tokio clock from run creation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RunEvent {
    pub at_ms: f64,
    #[serde(flatten)]
    pub kind: RunEventKind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEventKind {
    Phase { phase: RunPhase },
    MarkersPlaced { count: usize },
    GroupSkipped { group: String, points: usize },
    /// `duration_ms` is resolved at the speed in effect when the group started.
    GroupStarted { group: String, duration_ms: f64 },
    GroupFinished { group: String },
    Overview { flown: bool },
    Cancelled,
}

/// Terminal state of a run. The sequencer reports here instead of failing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RunReport {
    pub run_id: u64,
    pub outcome: RunOutcome,
    pub groups_animated: usize,
    pub groups_skipped: usize,
    pub timeline: Vec<RunEvent>,
}

impl RunReport {
    pub fn is_completed(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }

    /// Ids of the groups that finished animating, in order.
    pub fn finished_groups(&self) -> Vec<&str> {
        self.timeline
            .iter()
            .filter_map(|e| match &e.kind {
                RunEventKind::GroupFinished { group } => Some(group.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// One animation run over an immutable snapshot of groups.
///
/// Created by [`crate::sequence::Animator::start`]; consumed by [`Run::execute`].
pub struct Run<S, F> {
    pub(crate) id: u64,
    pub(crate) surface: Rc<S>,
    pub(crate) frames: Rc<F>,
    pub(crate) settings: RunSettings,
    pub(crate) groups: Vec<WaypointGroup>,
    pub(crate) playback: Playback,
    pub(crate) cancel: CancelToken,
    pub(crate) registry: Rc<RefCell<RunRegistry>>,
    pub(crate) phase: Rc<watch::Sender<RunPhase>>,
    pub(crate) started: Instant,
    pub(crate) timeline: RefCell<Vec<RunEvent>>,
}

impl<S: MapSurface, F: FrameSource> Run<S, F> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Animate every group in order, then fly the overview.
    ///
    /// Never fails: surface errors are logged where they happen and cancellation ends the run
    /// with [`RunOutcome::Cancelled`].
    #[tracing::instrument(name = "run", skip(self), fields(run_id = self.id, groups = self.groups.len()))]
    pub async fn execute(self) -> RunReport {
        let outcome = match self.sequence().await {
            Ok(()) => {
                self.enter(RunPhase::Idle);
                RunOutcome::Completed
            }
            Err(Cancelled) => {
                self.record(RunEventKind::Cancelled);
                RunOutcome::Cancelled
            }
        };
        info!(?outcome, "run finished");

        let timeline = self.timeline.take();
        let count = |pick: fn(&RunEventKind) -> bool| timeline.iter().filter(|e| pick(&e.kind)).count();
        RunReport {
            run_id: self.id,
            outcome,
            groups_animated: count(|k| matches!(k, RunEventKind::GroupFinished { .. })),
            groups_skipped: count(|k| matches!(k, RunEventKind::GroupSkipped { .. })),
            timeline,
        }
    }

    async fn sequence(&self) -> Result<(), Cancelled> {
        self.cancel.check()?;
        self.enter(RunPhase::Preparing);
        let paths: Vec<GeoPath> = self
            .groups
            .iter()
            .map(|g| GeoPath::new(g.points()))
            .collect();
        let total_distance: f64 = paths
            .iter()
            .filter(|p| p.len() >= 2)
            .map(GeoPath::total_distance)
            .sum();
        let group_count = self.groups.len();

        if self.settings.show_markers {
            self.cancel.check()?;
            self.place_markers();
        }

        let transients = Transients::new();
        let groups = async {
            for (group, path) in self.groups.iter().zip(&paths) {
                if path.len() < 2 {
                    debug!(group = %group.id, points = path.len(), "skipping group without a path");
                    self.record(RunEventKind::GroupSkipped {
                        group: group.id.clone(),
                        points: path.len(),
                    });
                    continue;
                }
                let pacing = GroupPacing {
                    override_ms: group.duration,
                    distance: path.total_distance(),
                    total_distance,
                    group_count,
                };
                self.animate_group(group, path, pacing, &transients).await?;
            }
            self.overview(&paths).await
        };

        tokio::select! {
            biased;
            result = groups => result?,
            never = transients.sweep(&*self.surface) => match never {},
        }
        self.cancel.guard(transients.drain(&*self.surface)).await
    }

    fn place_markers(&self) {
        let mut count = 0;
        for group in &self.groups {
            for (i, wp) in group.marker_waypoints().iter().enumerate() {
                self.surface.add_layer(Layer::WaypointMarker {
                    at: wp.position(),
                    index: i + 1,
                    label: format!("{}. {}", i + 1, wp.name),
                    color: group.color,
                });
                count += 1;
            }
        }
        self.record(RunEventKind::MarkersPlaced { count });
    }

    async fn animate_group(
        &self,
        group: &WaypointGroup,
        path: &GeoPath,
        pacing: GroupPacing,
        transients: &Transients,
    ) -> Result<(), Cancelled> {
        let zoom = self.settings.zoom_style;
        let show_markers = self.settings.show_markers;
        let surface = &*self.surface;

        if let Some(bounds) = path.bounds() {
            debug!(group = %group.id, "moving camera to group");
            self.enter(RunPhase::Transitioning);
            show_group(surface, bounds, zoom, show_markers, &self.cancel).await?;
        }
        self.enter(RunPhase::Settling);
        self.cancel.sleep_ms(pre_roll_ms(show_markers)).await?;

        let duration = resolve_duration(pacing, self.settings.pacing, zoom);
        let appearance = self.registry.borrow().appearance();
        let mut renderer = PathRenderer::mount(
            self.settings.animation_style,
            surface,
            path,
            group.color,
            &appearance,
        );
        self.registry
            .borrow_mut()
            .register(&group.id, renderer.layers());
        self.enter(RunPhase::Animating);
        self.record(RunEventKind::GroupStarted {
            group: group.id.clone(),
            duration_ms: duration.resolve(self.playback.speed()),
        });

        let marquee = renderer.marquee();
        let mut clock = AnimationClock::new(duration, path.total_distance());
        let primary = drive_clock(
            &*self.frames,
            &mut clock,
            &self.playback,
            &self.cancel,
            |tick| {
                let cx = TickCx {
                    speed: self.playback.speed(),
                    path,
                    transients,
                };
                renderer.advance(surface, tick, cx);
            },
        );
        let children = async {
            let follow = async {
                if zoom.follows() {
                    follow_path(
                        &*self.frames,
                        surface,
                        path,
                        duration,
                        self.settings.look_ahead,
                        &self.playback,
                        &self.cancel,
                    )
                    .await;
                }
            };
            let flow = async {
                if let Some(marquee) = marquee {
                    marquee.run(surface, &self.playback, &self.cancel).await;
                }
            };
            tokio::join!(follow, flow);
            std::future::pending::<Infallible>().await
        };

        let exit = tokio::select! {
            biased;
            exit = primary => exit,
            never = children => match never {},
        };
        match exit {
            ClockExit::Completed => {
                renderer.finish(surface);
                debug!(group = %group.id, "group finished");
                self.record(RunEventKind::GroupFinished {
                    group: group.id.clone(),
                });
                Ok(())
            }
            ClockExit::Cancelled => Err(Cancelled),
        }
    }

    async fn overview(&self, paths: &[GeoPath]) -> Result<(), Cancelled> {
        let bounds = paths
            .iter()
            .filter(|p| p.len() >= 2)
            .filter_map(GeoPath::bounds)
            .reduce(|a, b| a.union(b));
        let Some(bounds) = bounds else {
            return Ok(());
        };
        self.enter(RunPhase::FinalOverview);
        let flown = final_overview(&*self.surface, bounds, self.settings.zoom_style, &self.cancel).await?;
        self.record(RunEventKind::Overview { flown });
        Ok(())
    }

    /// Publish `phase` unless this run was already cancelled; a newer run may own the watch.
    fn enter(&self, phase: RunPhase) {
        if self.cancel.is_cancelled() {
            return;
        }
        debug!(?phase, "run phase");
        self.phase.send_replace(phase);
        self.record(RunEventKind::Phase { phase });
    }

    fn record(&self, kind: RunEventKind) {
        let at_ms = self.started.elapsed().as_nanos() as f64 / 1_000_000.0;
        self.timeline.borrow_mut().push(RunEvent { at_ms, kind });
    }
}
