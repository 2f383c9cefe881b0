use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

use crate::animation::clock::ClockTick;
use crate::foundation::core::{Color, LatLng};
use crate::geo::path::GeoPath;
use crate::render::draw::{GrowingLine, mount_traveler};
use crate::runtime::cancel::CancelToken;
use crate::runtime::playback::Playback;
use crate::settings::Appearance;
use crate::surface::{Layer, LayerId, LayerUpdate, LineStyle, MapSurface};

/// Cadence of the dash-offset marquee.
pub const MARQUEE_PERIOD: Duration = Duration::from_millis(30);

/// `flow`: faint full-path guide, dashed overlay growing with progress, and a marquee.
#[derive(Debug)]
pub struct FlowRenderer {
    guide: LayerId,
    line: GrowingLine,
    traveler: LayerId,
}

impl FlowRenderer {
    pub fn mount<S: MapSurface>(
        surface: &S,
        path: &GeoPath,
        color: Color,
        appearance: &Appearance,
    ) -> Self {
        let w = appearance.weight;
        let guide = surface.add_layer(Layer::Line {
            points: path.points().to_vec(),
            style: LineStyle::solid(color, w, appearance.opacity * 0.2),
        });
        let line = GrowingLine::mount(
            surface,
            LineStyle::solid(color, w, appearance.opacity).dashed(vec![w * 2.0, w * 3.0]),
        );
        let traveler = mount_traveler(surface, path, color);
        Self {
            guide,
            line,
            traveler,
        }
    }

    pub fn advance<S: MapSurface>(&mut self, surface: &S, path: &GeoPath, tick: ClockTick, at: LatLng) {
        if !surface.has_layer(self.traveler) {
            return;
        }
        if self.line.grow(surface, path, tick.distance, at) {
            surface.update_layer(self.traveler, LayerUpdate::MoveTo(at));
        }
    }

    pub fn marquee(&self) -> Marquee {
        Marquee {
            line: self.line.id(),
        }
    }

    pub fn line(&self) -> LayerId {
        self.line.id()
    }

    pub fn guide(&self) -> LayerId {
        self.guide
    }

    pub fn traveler(&self) -> LayerId {
        self.traveler
    }
}

/// Dash-offset animation of a flow overlay, ticking on its own interval.
#[derive(Clone, Copy, Debug)]
pub struct Marquee {
    line: LayerId,
}

impl Marquee {
    /// Shift the dash offset by the live speed every period.
    ///
    /// Freezes while paused. Returns once the run is cancelled or the line is gone; otherwise it
    /// runs until its owner drops it.
    pub async fn run<S: MapSurface>(self, surface: &S, playback: &Playback, cancel: &CancelToken) {
        let mut ticks = interval(MARQUEE_PERIOD);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut offset = 0.0;
        loop {
            if cancel.guard(ticks.tick()).await.is_err() || cancel.is_cancelled() {
                return;
            }
            let state = playback.snapshot();
            if state.paused {
                continue;
            }
            offset -= state.speed;
            if !surface.update_layer(self.line, LayerUpdate::DashOffset(offset)) {
                return;
            }
        }
    }
}
