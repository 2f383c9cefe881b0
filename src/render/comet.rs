use std::time::Duration;

use crate::foundation::core::{Color, LatLng};
use crate::geo::path::GeoPath;
use crate::render::draw::mount_traveler;
use crate::render::transients::Transients;
use crate::settings::Appearance;
use crate::surface::{CircleStyle, Layer, LayerId, LayerUpdate, MapSurface};

pub const PARTICLE_LIFETIME: Duration = Duration::from_millis(800);

/// `comet`: no persistent line, one fading particle per tick behind the traveler.
#[derive(Debug)]
pub struct CometRenderer {
    traveler: LayerId,
    color: Color,
    radius: f64,
}

impl CometRenderer {
    pub fn mount<S: MapSurface>(
        surface: &S,
        path: &GeoPath,
        color: Color,
        appearance: &Appearance,
    ) -> Self {
        Self {
            traveler: mount_traveler(surface, path, color),
            color,
            radius: appearance.weight + 2.0,
        }
    }

    pub fn advance<S: MapSurface>(&mut self, surface: &S, at: LatLng, transients: &Transients) {
        if !surface.update_layer(self.traveler, LayerUpdate::MoveTo(at)) {
            return;
        }
        let particle = surface.add_layer(Layer::Circle {
            at,
            style: CircleStyle {
                color: self.color,
                radius: self.radius,
                weight: 0.0,
                opacity: 1.0,
                fill_opacity: 1.0,
            },
        });
        transients.add(particle, PARTICLE_LIFETIME);
    }

    pub fn traveler(&self) -> LayerId {
        self.traveler
    }
}
