use std::collections::BTreeMap;
use std::future::{Future, ready};

use crate::foundation::core::{GeoBounds, LatLng};
use crate::foundation::error::{FlypathError, FlypathResult};
use crate::plan::model::{BorderLocation, LocationKind, Waypoint};
use crate::plan::{BorderSource, BorderTrace, Geocoder, RouteSource};

/// Outline entry; bounds and center default to those of the ring.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BorderEntry {
    pub ring: Vec<LatLng>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<GeoBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LatLng>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RouteEntry {
    pub from: String,
    pub to: String,
    pub path: Vec<LatLng>,
}

/// Static in-memory lookup table implementing every planning collaborator.
///
/// Names match exactly first, then ASCII case-insensitively with surrounding whitespace ignored.
/// Routes are directional; a reversed entry is used backwards when no forward entry exists.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Gazetteer {
    pub places: BTreeMap<String, LatLng>,
    pub borders: BTreeMap<String, BorderEntry>,
    pub postal: BTreeMap<String, BorderEntry>,
    pub routes: Vec<RouteEntry>,
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn find<'a, V>(table: &'a BTreeMap<String, V>, name: &str) -> Option<&'a V> {
    table
        .get(name)
        .or_else(|| table.iter().find(|(k, _)| same_name(k, name)).map(|(_, v)| v))
}

impl Gazetteer {
    pub fn with_place(mut self, name: impl Into<String>, at: LatLng) -> Self {
        self.places.insert(name.into(), at);
        self
    }

    pub fn with_border(mut self, name: impl Into<String>, ring: Vec<LatLng>) -> Self {
        self.borders.insert(
            name.into(),
            BorderEntry {
                ring,
                bounds: None,
                center: None,
            },
        );
        self
    }

    pub fn with_route(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        path: Vec<LatLng>,
    ) -> Self {
        self.routes.push(RouteEntry {
            from: from.into(),
            to: to.into(),
            path,
        });
        self
    }

    fn lookup_place(&self, name: &str) -> Option<LatLng> {
        find(&self.places, name)
            .copied()
            .or_else(|| find(&self.borders, name).and_then(entry_center))
    }

    fn lookup_border(&self, location: &BorderLocation) -> FlypathResult<BorderTrace> {
        let table = match location.kind {
            LocationKind::Name => &self.borders,
            LocationKind::Postal => &self.postal,
        };
        let entry = find(table, &location.name).ok_or_else(|| {
            FlypathError::lookup(format!("no boundary data for '{}'", location.name))
        })?;
        let bounds = entry
            .bounds
            .or_else(|| GeoBounds::from_points(entry.ring.iter().copied()))
            .ok_or_else(|| {
                FlypathError::lookup(format!("empty boundary for '{}'", location.name))
            })?;
        Ok(BorderTrace {
            ring: entry.ring.clone(),
            bounds,
            center: entry.center.unwrap_or_else(|| bounds.center()),
        })
    }

    fn lookup_route(&self, from: &Waypoint, to: &Waypoint) -> FlypathResult<Vec<LatLng>> {
        if let Some(r) = self
            .routes
            .iter()
            .find(|r| same_name(&r.from, &from.name) && same_name(&r.to, &to.name))
        {
            return Ok(r.path.clone());
        }
        if let Some(r) = self
            .routes
            .iter()
            .find(|r| same_name(&r.from, &to.name) && same_name(&r.to, &from.name))
        {
            return Ok(r.path.iter().rev().copied().collect());
        }
        Err(FlypathError::lookup(format!(
            "no route from '{}' to '{}'",
            from.name, to.name
        )))
    }
}

fn entry_center(entry: &BorderEntry) -> Option<LatLng> {
    entry.center.or_else(|| {
        entry
            .bounds
            .or_else(|| GeoBounds::from_points(entry.ring.iter().copied()))
            .map(GeoBounds::center)
    })
}

impl Geocoder for Gazetteer {
    fn locate(&self, name: &str) -> impl Future<Output = FlypathResult<Option<LatLng>>> {
        ready(Ok(self.lookup_place(name)))
    }
}

impl BorderSource for Gazetteer {
    fn trace(&self, location: &BorderLocation) -> impl Future<Output = FlypathResult<BorderTrace>> {
        ready(self.lookup_border(location))
    }
}

impl RouteSource for Gazetteer {
    fn route(
        &self,
        from: &Waypoint,
        to: &Waypoint,
    ) -> impl Future<Output = FlypathResult<Vec<LatLng>>> {
        ready(self.lookup_route(from, to))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/gazetteer.rs"]
mod tests;
