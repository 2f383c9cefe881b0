use crate::foundation::core::{Color, GeoBounds, LatLng};

/// A resolved stop. Immutable once produced by a lookup.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Waypoint {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Waypoint {
    pub fn new(id: impl Into<String>, name: impl Into<String>, at: LatLng) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat: at.lat,
            lng: at.lng,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// One independently animated path.
///
/// `waypoints` is the full path (possibly road-routed or a border ring); `user_waypoints`, when
/// present, are the stops the user entered and only drive marker placement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaypointGroup {
    pub id: String,
    pub name: String,
    pub color: Color,
    pub waypoints: Vec<Waypoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_waypoints: Option<Vec<Waypoint>>,
    /// Milliseconds; overrides every computed duration for this group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl WaypointGroup {
    pub fn points(&self) -> Vec<LatLng> {
        self.waypoints.iter().map(Waypoint::position).collect()
    }

    /// Stops that get numbered markers.
    pub fn marker_waypoints(&self) -> &[Waypoint] {
        self.user_waypoints.as_deref().unwrap_or(&self.waypoints)
    }
}

/// A successfully traced border, kept for focus shortcuts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompletedBorder {
    pub name: String,
    pub bounds: GeoBounds,
    pub center: LatLng,
}

/// Editor-side trip: an ordered list of place names.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TripGroup {
    pub id: String,
    pub name: String,
    pub color: Color,
    pub stops: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    #[default]
    Name,
    Postal,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BorderLocation {
    pub name: String,
    #[serde(default)]
    pub kind: LocationKind,
    /// Seconds; used only under manual border timing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

impl BorderLocation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LocationKind::Name,
            duration_secs: None,
        }
    }
}

/// Editor-side border group: every location becomes its own animated group.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BorderGroup {
    pub id: String,
    pub name: String,
    pub color: Color,
    pub locations: Vec<BorderLocation>,
}

/// Whether per-location durations are honored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderTiming {
    #[default]
    Uniform,
    Manual,
}
