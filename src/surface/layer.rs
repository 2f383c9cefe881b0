use crate::foundation::core::{Color, LatLng};

/// Handle to a layer on a [`MapSurface`](crate::surface::MapSurface).
///
/// Ids are never reused by a surface, so a stale id from a cancelled run cannot alias a fresh layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct LayerId(pub u64);

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LineStyle {
    pub color: Color,
    pub weight: f64,
    pub opacity: f64,
    /// Dash pattern in pixels; `None` draws a solid line.
    pub dash: Option<Vec<f64>>,
    pub dash_offset: f64,
}

impl LineStyle {
    pub fn solid(color: Color, weight: f64, opacity: f64) -> Self {
        Self {
            color,
            weight,
            opacity,
            dash: None,
            dash_offset: 0.0,
        }
    }

    pub fn dashed(mut self, pattern: Vec<f64>) -> Self {
        self.dash = Some(pattern);
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CircleStyle {
    pub color: Color,
    pub radius: f64,
    /// Stroke weight.
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Line {
        points: Vec<LatLng>,
        style: LineStyle,
    },
    /// The moving point of the current group.
    Traveler { at: LatLng, color: Color },
    /// Numbered stop; `label` is the tooltip text (`"<n>. <name>"`).
    WaypointMarker {
        at: LatLng,
        index: usize,
        label: String,
        color: Color,
    },
    Circle { at: LatLng, style: CircleStyle },
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Line { .. } => LayerKind::Line,
            Self::Traveler { .. } => LayerKind::Traveler,
            Self::WaypointMarker { .. } => LayerKind::WaypointMarker,
            Self::Circle { .. } => LayerKind::Circle,
        }
    }

    /// Apply `update` in place. Returns `false` when the update does not fit this layer kind.
    pub fn apply(&mut self, update: LayerUpdate) -> bool {
        match (self, update) {
            (Self::Line { points, .. }, LayerUpdate::ExtendLine(p)) => {
                points.push(p);
                true
            }
            (Self::Line { style, .. }, LayerUpdate::DashOffset(offset)) => {
                style.dash_offset = offset;
                true
            }
            (
                Self::Line { style, .. },
                LayerUpdate::Restyle {
                    weight,
                    opacity,
                    dash,
                },
            ) => {
                style.weight = weight;
                style.opacity = opacity;
                style.dash = dash;
                true
            }
            (
                Self::Traveler { at, .. }
                | Self::WaypointMarker { at, .. }
                | Self::Circle { at, .. },
                LayerUpdate::MoveTo(p),
            ) => {
                *at = p;
                true
            }
            (
                Self::Circle { style, .. },
                LayerUpdate::Circle {
                    radius,
                    opacity,
                    fill_opacity,
                },
            ) => {
                style.radius = radius;
                style.opacity = opacity;
                style.fill_opacity = fill_opacity;
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Line,
    Traveler,
    WaypointMarker,
    Circle,
}

/// Incremental change to an existing layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerUpdate {
    ExtendLine(LatLng),
    MoveTo(LatLng),
    DashOffset(f64),
    /// Keeps color and dash offset.
    Restyle {
        weight: f64,
        opacity: f64,
        dash: Option<Vec<f64>>,
    },
    Circle {
        radius: f64,
        opacity: f64,
        fill_opacity: f64,
    },
}
