//! Path styles: what a group looks like while its clock runs.
//!
//! Every renderer is mounted once per group, fed one [`ClockTick`] per frame by the sequencer and
//! finished when the clock completes. Renderers never own timing; they only translate progress into
//! layer updates and check that their layers still exist before touching them.

pub mod comet;
pub mod draw;
pub mod flow;
pub mod pulse;
pub mod transients;

use crate::animation::clock::ClockTick;
use crate::foundation::core::Color;
use crate::geo::path::GeoPath;
use crate::settings::Appearance;
use crate::surface::{LayerId, MapSurface};

pub use comet::CometRenderer;
pub use draw::DrawRenderer;
pub use flow::{FlowRenderer, Marquee};
pub use pulse::PulseRenderer;
pub use transients::Transients;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    /// Line grows behind a traveler. Older names are accepted.
    #[default]
    #[serde(alias = "jump", alias = "trail")]
    Draw,
    /// Like `draw`, over a faint dashed preview of the whole path.
    Reveal,
    Flow,
    Comet,
    Pulse,
}

/// Per-tick context shared by every renderer.
#[derive(Clone, Copy)]
pub struct TickCx<'a> {
    pub speed: f64,
    pub path: &'a GeoPath,
    pub transients: &'a Transients,
}

/// Long-lived layers a group mounted, kept in the run registry for later restyling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GroupLayers {
    pub line: Option<LayerId>,
    pub traveler: LayerId,
    pub guide: Option<LayerId>,
}

#[derive(Debug)]
pub enum PathRenderer {
    Draw(DrawRenderer),
    Flow(FlowRenderer),
    Comet(CometRenderer),
    Pulse(PulseRenderer),
}

impl PathRenderer {
    pub fn mount<S: MapSurface>(
        style: AnimationStyle,
        surface: &S,
        path: &GeoPath,
        color: Color,
        appearance: &Appearance,
    ) -> Self {
        match style {
            AnimationStyle::Draw => {
                Self::Draw(DrawRenderer::mount(surface, path, color, appearance, false))
            }
            AnimationStyle::Reveal => {
                Self::Draw(DrawRenderer::mount(surface, path, color, appearance, true))
            }
            AnimationStyle::Flow => Self::Flow(FlowRenderer::mount(surface, path, color, appearance)),
            AnimationStyle::Comet => {
                Self::Comet(CometRenderer::mount(surface, path, color, appearance))
            }
            AnimationStyle::Pulse => {
                Self::Pulse(PulseRenderer::mount(surface, path, color, appearance))
            }
        }
    }

    pub fn advance<S: MapSurface>(&mut self, surface: &S, tick: ClockTick, cx: TickCx<'_>) {
        let Some(at) = cx.path.point_at_distance(tick.distance) else {
            return;
        };
        match self {
            Self::Draw(r) => r.advance(surface, cx.path, tick, at),
            Self::Flow(r) => r.advance(surface, cx.path, tick, at),
            Self::Comet(r) => r.advance(surface, at, cx.transients),
            Self::Pulse(r) => r.advance(surface, cx.path, tick, at, cx.speed),
        }
    }

    /// Release per-group resources that outlive the last tick.
    pub fn finish<S: MapSurface>(&mut self, surface: &S) {
        if let Self::Pulse(r) = self {
            r.finish(surface);
        }
    }

    pub fn layers(&self) -> GroupLayers {
        match self {
            Self::Draw(r) => GroupLayers {
                line: Some(r.line()),
                traveler: r.traveler(),
                guide: r.guide(),
            },
            Self::Flow(r) => GroupLayers {
                line: Some(r.line()),
                traveler: r.traveler(),
                guide: Some(r.guide()),
            },
            Self::Comet(r) => GroupLayers {
                line: None,
                traveler: r.traveler(),
                guide: None,
            },
            Self::Pulse(r) => GroupLayers {
                line: Some(r.line()),
                traveler: r.traveler(),
                guide: None,
            },
        }
    }

    /// The concurrent dash animation, for styles that have one.
    pub fn marquee(&self) -> Option<Marquee> {
        match self {
            Self::Flow(r) => Some(r.marquee()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderers.rs"]
mod tests;
