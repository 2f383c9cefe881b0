use crate::animation::clock::ClockTick;
use crate::animation::ease::Ease;
use crate::foundation::core::{Color, LatLng};
use crate::geo::path::GeoPath;
use crate::render::draw::{GrowingLine, mount_traveler};
use crate::settings::Appearance;
use crate::surface::{CircleStyle, Layer, LayerId, LayerUpdate, LineStyle, MapSurface};

/// Spawn cadence at speed 1.0.
pub const PULSE_INTERVAL_MS: f64 = 400.0;
pub const PULSE_LIFETIME_MS: f64 = 1500.0;
const RING_OPACITY: f64 = 0.8;

#[derive(Debug)]
struct Ring {
    id: LayerId,
    born: f64,
}

/// `pulse`: growing line plus expanding rings.
///
/// Rings live entirely inside the primary tick: spawned, eased and removed from `advance`, all
/// keyed on active (unpaused) time, so a paused frame leaves them untouched.
#[derive(Debug)]
pub struct PulseRenderer {
    line: GrowingLine,
    traveler: LayerId,
    color: Color,
    weight: f64,
    rings: Vec<Ring>,
    last_pulse: Option<f64>,
    active: f64,
}

impl PulseRenderer {
    pub fn mount<S: MapSurface>(
        surface: &S,
        path: &GeoPath,
        color: Color,
        appearance: &Appearance,
    ) -> Self {
        let line = GrowingLine::mount(
            surface,
            LineStyle::solid(color, appearance.weight, appearance.opacity),
        );
        Self {
            line,
            traveler: mount_traveler(surface, path, color),
            color,
            weight: appearance.weight,
            rings: Vec::new(),
            last_pulse: None,
            active: 0.0,
        }
    }

    pub fn advance<S: MapSurface>(
        &mut self,
        surface: &S,
        path: &GeoPath,
        tick: ClockTick,
        at: LatLng,
        speed: f64,
    ) {
        if !self.line.grow(surface, path, tick.distance, at) {
            return;
        }
        surface.update_layer(self.traveler, LayerUpdate::MoveTo(at));

        self.active += tick.delta.max(0.0);
        if tick.delta <= 0.0 && self.last_pulse.is_some() {
            return;
        }
        let now = self.active;
        let interval = PULSE_INTERVAL_MS / speed.max(f64::EPSILON);
        if self
            .last_pulse
            .is_none_or(|last| now - last > interval)
        {
            self.last_pulse = Some(now);
            let id = surface.add_layer(Layer::Circle {
                at,
                style: CircleStyle {
                    color: self.color,
                    radius: self.weight,
                    weight: self.weight / 2.0,
                    opacity: RING_OPACITY,
                    fill_opacity: 0.2,
                },
            });
            self.rings.push(Ring {
                id,
                born: now,
            });
        }

        let w = self.weight;
        self.rings.retain(|ring| {
            let p = (now - ring.born) / PULSE_LIFETIME_MS;
            if p >= 1.0 {
                surface.remove_layer(ring.id);
                return false;
            }
            let opacity = Ease::Linear.tween(RING_OPACITY, 0.0, p);
            surface.update_layer(
                ring.id,
                LayerUpdate::Circle {
                    radius: Ease::OutQuad.tween(w, w * 6.0, p),
                    opacity,
                    fill_opacity: opacity * 0.5,
                },
            )
        });
    }

    /// Remove rings still alive at completion.
    pub fn finish<S: MapSurface>(&mut self, surface: &S) {
        for ring in self.rings.drain(..) {
            surface.remove_layer(ring.id);
        }
    }

    pub fn live_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn line(&self) -> LayerId {
        self.line.id()
    }

    pub fn traveler(&self) -> LayerId {
        self.traveler
    }
}
