use crate::animation::clock::ClockTick;
use crate::foundation::core::{Color, LatLng};
use crate::geo::path::GeoPath;
use crate::settings::Appearance;
use crate::surface::{Layer, LayerId, LayerUpdate, LineStyle, MapSurface};

/// Line that grows behind the traveler.
///
/// Every path vertex the traveler passed since the previous tick is appended before the current
/// position, so corners are never cut at low frame rates.
#[derive(Debug)]
pub(crate) struct GrowingLine {
    id: LayerId,
    next_vertex: usize,
    last: Option<LatLng>,
}

impl GrowingLine {
    pub(crate) fn mount<S: MapSurface>(surface: &S, style: LineStyle) -> Self {
        let id = surface.add_layer(Layer::Line {
            points: Vec::new(),
            style,
        });
        Self {
            id,
            next_vertex: 0,
            last: None,
        }
    }

    pub(crate) fn id(&self) -> LayerId {
        self.id
    }

    /// Returns `false` once the layer is gone.
    pub(crate) fn grow<S: MapSurface>(
        &mut self,
        surface: &S,
        path: &GeoPath,
        distance: f64,
        at: LatLng,
    ) -> bool {
        if !surface.has_layer(self.id) {
            return false;
        }
        let table = path.cumulative();
        while self.next_vertex < table.len() && table[self.next_vertex] < distance {
            let vertex = path.points()[self.next_vertex];
            self.push(surface, vertex);
            self.next_vertex += 1;
        }
        self.push(surface, at);
        true
    }

    fn push<S: MapSurface>(&mut self, surface: &S, p: LatLng) {
        if self.last == Some(p) {
            return;
        }
        if surface.update_layer(self.id, LayerUpdate::ExtendLine(p)) {
            self.last = Some(p);
        }
    }
}

pub(crate) fn mount_traveler<S: MapSurface>(surface: &S, path: &GeoPath, color: Color) -> LayerId {
    let at = path.first().unwrap_or(LatLng::new(0.0, 0.0));
    surface.add_layer(Layer::Traveler { at, color })
}

/// `draw`, and `reveal` when a guide is present.
#[derive(Debug)]
pub struct DrawRenderer {
    line: GrowingLine,
    traveler: LayerId,
    guide: Option<LayerId>,
}

impl DrawRenderer {
    pub fn mount<S: MapSurface>(
        surface: &S,
        path: &GeoPath,
        color: Color,
        appearance: &Appearance,
        reveal: bool,
    ) -> Self {
        let guide = reveal.then(|| {
            let style = LineStyle::solid(
                color,
                (appearance.weight - 2.0).max(1.0),
                appearance.opacity * 0.2,
            )
            .dashed(vec![5.0, 10.0]);
            surface.add_layer(Layer::Line {
                points: path.points().to_vec(),
                style,
            })
        });
        let mut style = LineStyle::solid(color, appearance.weight, appearance.opacity);
        style.dash = appearance.dash_pattern();
        let line = GrowingLine::mount(surface, style);
        let traveler = mount_traveler(surface, path, color);
        Self {
            line,
            traveler,
            guide,
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

    pub fn line(&self) -> LayerId {
        self.line.id()
    }

    pub fn traveler(&self) -> LayerId {
        self.traveler
    }

    pub fn guide(&self) -> Option<LayerId> {
        self.guide
    }
}
