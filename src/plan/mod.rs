//! Turning editor input into animatable groups.
//!
//! The lookups themselves (geocoding, border tracing, routing) are collaborators behind the
//! traits below; the planners only decide what to keep, skip or stitch.

pub mod file;
pub mod gazetteer;
pub mod model;
pub mod planner;

use std::future::Future;

use crate::foundation::core::{GeoBounds, LatLng};
use crate::foundation::error::FlypathResult;
use crate::plan::model::{BorderLocation, Waypoint};

/// Place name to coordinates. `Ok(None)` is a miss.
pub trait Geocoder {
    fn locate(&self, name: &str) -> impl Future<Output = FlypathResult<Option<LatLng>>>;
}

/// Traced outline of an administrative or postal area.
#[derive(Clone, Debug, PartialEq)]
pub struct BorderTrace {
    pub ring: Vec<LatLng>,
    pub bounds: GeoBounds,
    pub center: LatLng,
}

pub trait BorderSource {
    fn trace(&self, location: &BorderLocation) -> impl Future<Output = FlypathResult<BorderTrace>>;
}

/// Road geometry for one leg between two resolved stops.
pub trait RouteSource {
    fn route(
        &self,
        from: &Waypoint,
        to: &Waypoint,
    ) -> impl Future<Output = FlypathResult<Vec<LatLng>>>;
}
