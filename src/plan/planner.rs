use std::collections::HashMap;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::foundation::core::LatLng;
use crate::foundation::error::{FlypathError, FlypathResult};
use crate::plan::model::{
    BorderGroup, BorderTiming, CompletedBorder, TripGroup, Waypoint, WaypointGroup,
};
use crate::plan::{BorderSource, Geocoder, RouteSource};

pub const NO_TRIP_GROUPS: &str =
    "Please add at least one group with two or more locations to create a route.";
pub const NO_RESOLVED_TRIPS: &str =
    "Could not find coordinates for enough locations to form any path.";
pub const NO_BORDER_GROUPS: &str = "Please add at least one group with a country or city name.";
pub const NO_RESOLVED_BORDERS: &str =
    "Could not generate a border path for any of the provided locations.";

/// Pause between consecutive sequential lookups, for services with rate limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Throttle {
    gap: Duration,
}

impl Throttle {
    pub const fn new(gap: Duration) -> Self {
        Self { gap }
    }

    pub const fn none() -> Self {
        Self {
            gap: Duration::ZERO,
        }
    }

    pub fn gap(&self) -> Duration {
        self.gap
    }

    async fn pause(&self) {
        if !self.gap.is_zero() {
            tokio::time::sleep(self.gap).await;
        }
    }
}

/// Border planning output: the groups to animate plus the traced areas for focus requests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BorderPlan {
    pub groups: Vec<WaypointGroup>,
    pub borders: Vec<CompletedBorder>,
}

/// Direct mode: geocode every stop and connect them with straight segments.
///
/// Misses and lookup failures drop the stop; groups left with fewer than two stops are dropped.
#[tracing::instrument(skip_all, fields(groups = groups.len()))]
pub async fn plan_trips<G: Geocoder>(
    geocoder: &G,
    groups: &[TripGroup],
    throttle: Throttle,
) -> FlypathResult<Vec<WaypointGroup>> {
    let candidates: Vec<&TripGroup> = groups.iter().filter(|g| g.stops.len() >= 2).collect();
    if candidates.is_empty() {
        return Err(FlypathError::input(NO_TRIP_GROUPS));
    }

    let mut resolved: HashMap<&str, Option<LatLng>> = HashMap::new();
    for group in &candidates {
        for name in &group.stops {
            if resolved.contains_key(name.as_str()) {
                continue;
            }
            if !resolved.is_empty() {
                throttle.pause().await;
            }
            let hit = match geocoder.locate(name).await {
                Ok(hit) => hit,
                Err(err) => {
                    warn!(%err, location = %name, "geocoding failed; dropping stop");
                    None
                }
            };
            if hit.is_none() {
                debug!(location = %name, "no coordinates found");
            }
            resolved.insert(name.as_str(), hit);
        }
    }

    let mut out = Vec::new();
    for group in candidates {
        let waypoints: Vec<Waypoint> = group
            .stops
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let at = resolved.get(name.as_str()).copied().flatten()?;
                Some(Waypoint::new(format!("{}-wp-{}", group.id, i + 1), name, at))
            })
            .collect();
        if waypoints.len() < 2 {
            warn!(group = %group.name, "fewer than two stops resolved; skipping group");
            continue;
        }
        out.push(WaypointGroup {
            id: group.id.clone(),
            name: group.name.clone(),
            color: group.color,
            user_waypoints: Some(waypoints.clone()),
            waypoints,
            duration: None,
        });
    }

    if out.is_empty() {
        return Err(FlypathError::input(NO_RESOLVED_TRIPS));
    }
    Ok(out)
}

/// Road mode: like [`plan_trips`], then replace each group's path with routed geometry.
#[tracing::instrument(skip_all, fields(groups = groups.len()))]
pub async fn plan_roads<G, R>(
    geocoder: &G,
    router: &R,
    groups: &[TripGroup],
    throttle: Throttle,
) -> FlypathResult<Vec<WaypointGroup>>
where
    G: Geocoder,
    R: RouteSource,
{
    let mut planned = plan_trips(geocoder, groups, throttle).await?;
    let count = planned.len();
    for (i, group) in planned.iter_mut().enumerate() {
        let stops = group.user_waypoints.clone().unwrap_or_default();
        group.waypoints = route_stops(router, &stops).await;
        if i + 1 < count {
            throttle.pause().await;
        }
    }
    Ok(planned)
}

/// Fetch every leg concurrently and stitch them into one path.
pub async fn route_stops<R: RouteSource>(router: &R, stops: &[Waypoint]) -> Vec<Waypoint> {
    if stops.len() < 2 {
        return stops.to_vec();
    }
    let legs = join_all(
        stops
            .windows(2)
            .enumerate()
            .map(|(i, pair)| route_leg(router, &pair[0], &pair[1], i)),
    )
    .await;
    stitch_legs(stops, legs)
}

async fn route_leg<R: RouteSource>(
    router: &R,
    from: &Waypoint,
    to: &Waypoint,
    leg: usize,
) -> Vec<Waypoint> {
    let straight = || vec![from.clone(), to.clone()];
    match router.route(from, to).await {
        Ok(points) if !points.is_empty() => points
            .into_iter()
            .enumerate()
            .map(|(i, at)| {
                Waypoint::new(
                    format!("route-pt-{leg}-{i}"),
                    format!("Route Point {leg}-{i}"),
                    at,
                )
            })
            .collect(),
        Ok(_) => {
            warn!(from = %from.name, to = %to.name, "empty route; using a direct path");
            straight()
        }
        Err(err) => {
            warn!(%err, from = %from.name, to = %to.name, "routing failed; using a direct path");
            straight()
        }
    }
}

/// Concatenate legs, dropping the duplicated joint point, then pin both ends to the user's stops.
pub fn stitch_legs(stops: &[Waypoint], legs: Vec<Vec<Waypoint>>) -> Vec<Waypoint> {
    let mut path: Vec<Waypoint> = Vec::new();
    for (i, leg) in legs.into_iter().enumerate() {
        if leg.is_empty() {
            continue;
        }
        let skip = usize::from(i > 0);
        path.extend(leg.into_iter().skip(skip));
    }

    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return path;
    };
    if path.is_empty() {
        return stops.to_vec();
    }
    path[0] = first.clone();
    let end = path.len() - 1;
    path[end] = last.clone();
    path
}

/// Close `ring` by repeating its first point when the ends differ. Returns whether a point was
/// added.
pub fn close_ring(ring: &mut Vec<LatLng>) -> bool {
    match (ring.first().copied(), ring.last().copied()) {
        (Some(first), Some(last)) if first != last => {
            ring.push(first);
            true
        }
        _ => false,
    }
}

/// Border mode: trace every location of every group; each traced location is its own group.
///
/// Failed lookups are skipped with a warning.
#[tracing::instrument(skip_all, fields(groups = groups.len(), timing = ?timing))]
pub async fn plan_borders<B: BorderSource>(
    source: &B,
    groups: &[BorderGroup],
    timing: BorderTiming,
    throttle: Throttle,
) -> FlypathResult<BorderPlan> {
    let candidates: Vec<&BorderGroup> =
        groups.iter().filter(|g| !g.locations.is_empty()).collect();
    if candidates.is_empty() {
        return Err(FlypathError::input(NO_BORDER_GROUPS));
    }

    let mut plan = BorderPlan::default();
    for group in candidates {
        let count = group.locations.len();
        for (i, location) in group.locations.iter().enumerate() {
            match source.trace(location).await {
                Ok(trace) if trace.ring.len() >= 2 => {
                    let mut ring = trace.ring;
                    close_ring(&mut ring);
                    let waypoints = ring
                        .into_iter()
                        .enumerate()
                        .map(|(n, at)| {
                            Waypoint::new(
                                format!("border-pt-{n}"),
                                format!("Border Point {}", n + 1),
                                at,
                            )
                        })
                        .collect();
                    let duration = match timing {
                        BorderTiming::Manual => location.duration_secs.map(|s| s * 1000.0),
                        BorderTiming::Uniform => None,
                    };
                    plan.borders.push(CompletedBorder {
                        name: location.name.clone(),
                        bounds: trace.bounds,
                        center: trace.center,
                    });
                    plan.groups.push(WaypointGroup {
                        id: format!("{}-{}", group.id, i),
                        name: format!("{}: {}", group.name, location.name),
                        color: group.color,
                        waypoints,
                        user_waypoints: None,
                        duration,
                    });
                }
                Ok(_) => {
                    warn!(location = %location.name, group = %group.name, "border ring too short; skipping");
                }
                Err(err) => {
                    warn!(%err, location = %location.name, group = %group.name, "skipping border");
                }
            }
            if i + 1 < count {
                throttle.pause().await;
            }
        }
    }

    if plan.groups.is_empty() {
        return Err(FlypathError::input(NO_RESOLVED_BORDERS));
    }
    Ok(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/plan/planner.rs"]
mod tests;
