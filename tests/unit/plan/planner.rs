use super::*;
use crate::foundation::core::Color;
use crate::plan::gazetteer::Gazetteer;
use crate::plan::model::BorderLocation;
use std::cell::Cell;
use std::future::{Future, ready};

fn color() -> Color {
    Color::parse_hex("#3b82f6").unwrap()
}

fn trip(id: &str, stops: &[&str]) -> TripGroup {
    TripGroup {
        id: id.to_string(),
        name: format!("Trip {id}"),
        color: color(),
        stops: stops.iter().map(|s| s.to_string()).collect(),
    }
}

fn gazetteer() -> Gazetteer {
    Gazetteer::default()
        .with_place("A", LatLng::new(0.0, 0.0))
        .with_place("B", LatLng::new(0.0, 1.0))
        .with_place("C", LatLng::new(0.0, 2.0))
        .with_route(
            "A",
            "B",
            vec![
                LatLng::new(0.1, 0.0),
                LatLng::new(0.2, 0.5),
                LatLng::new(0.1, 1.0),
            ],
        )
        .with_border(
            "Tri",
            vec![
                LatLng::new(0.0, 0.0),
                LatLng::new(1.0, 0.0),
                LatLng::new(0.0, 1.0),
            ],
        )
        .with_border("Dot", vec![LatLng::new(5.0, 5.0)])
}

struct CountingGeocoder<'a> {
    inner: &'a Gazetteer,
    calls: Cell<usize>,
}

impl Geocoder for CountingGeocoder<'_> {
    fn locate(&self, name: &str) -> impl Future<Output = FlypathResult<Option<LatLng>>> {
        self.calls.set(self.calls.get() + 1);
        if name == "Broken" {
            return ready(Err(FlypathError::lookup("service unavailable")));
        }
        ready(Ok(self.inner.places.get(name).copied()))
    }
}

#[tokio::test]
async fn trips_need_two_named_stops() {
    let err = plan_trips(&gazetteer(), &[trip("1", &["A"])], Throttle::none())
        .await
        .unwrap_err();
    assert!(matches!(err, FlypathError::Input(_)));
    assert_eq!(err.user_message(), NO_TRIP_GROUPS);
}

#[tokio::test]
async fn misses_and_failures_drop_stops_not_the_run() {
    let g = gazetteer();
    let geocoder = CountingGeocoder {
        inner: &g,
        calls: Cell::new(0),
    };
    let groups = [
        trip("1", &["A", "Nowhere", "B"]),
        trip("2", &["Broken", "C"]),
        trip("3", &["A", "C"]),
    ];
    let planned = plan_trips(&geocoder, &groups, Throttle::none())
        .await
        .unwrap();

    assert_eq!(planned.len(), 2);
    assert_eq!(planned[0].id, "1");
    assert_eq!(planned[0].waypoints.len(), 2);
    assert_eq!(planned[0].user_waypoints.as_ref(), Some(&planned[0].waypoints));
    assert_eq!(planned[1].id, "3");
    // Each distinct name is looked up once.
    assert_eq!(geocoder.calls.get(), 5);
}

#[tokio::test]
async fn nothing_resolved_is_an_input_error() {
    let err = plan_trips(&gazetteer(), &[trip("1", &["X", "Y"])], Throttle::none())
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), NO_RESOLVED_TRIPS);
}

#[tokio::test]
async fn roads_stitch_legs_and_pin_endpoints() {
    let planned = plan_roads(
        &gazetteer(),
        &gazetteer(),
        &[trip("1", &["A", "B", "C"])],
        Throttle::none(),
    )
    .await
    .unwrap();
    let group = &planned[0];
    let pts = group.points();

    // A->B routed (3 points), B->C falls back to a straight leg whose first point is dropped.
    assert_eq!(pts.len(), 4);
    assert_eq!(pts[0], LatLng::new(0.0, 0.0));
    assert_eq!(pts[1], LatLng::new(0.2, 0.5));
    assert_eq!(pts[3], LatLng::new(0.0, 2.0));
    assert_eq!(group.marker_waypoints().len(), 3);
}

#[test]
fn stitching_without_any_leg_returns_the_stops() {
    let stops = vec![
        Waypoint::new("a", "A", LatLng::new(0.0, 0.0)),
        Waypoint::new("b", "B", LatLng::new(0.0, 1.0)),
    ];
    assert_eq!(stitch_legs(&stops, vec![Vec::new()]), stops);
}

#[test]
fn rings_close_once() {
    let mut ring = vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(1.0, 0.0),
        LatLng::new(0.0, 1.0),
    ];
    assert!(close_ring(&mut ring));
    assert_eq!(ring.len(), 4);
    assert_eq!(ring[3], ring[0]);
    assert!(!close_ring(&mut ring));
    assert_eq!(ring.len(), 4);
}

fn border_group(locations: Vec<BorderLocation>) -> BorderGroup {
    BorderGroup {
        id: "g".to_string(),
        name: "Regions".to_string(),
        color: color(),
        locations,
    }
}

#[tokio::test]
async fn borders_skip_failures_and_close_rings() {
    let group = border_group(vec![
        BorderLocation::named("Nowhere"),
        BorderLocation {
            duration_secs: Some(4.0),
            ..BorderLocation::named("Tri")
        },
        BorderLocation::named("Dot"),
    ]);
    let plan = plan_borders(
        &gazetteer(),
        &[group.clone()],
        BorderTiming::Manual,
        Throttle::none(),
    )
    .await
    .unwrap();

    assert_eq!(plan.groups.len(), 1);
    let g = &plan.groups[0];
    assert_eq!(g.id, "g-1");
    assert_eq!(g.name, "Regions: Tri");
    assert_eq!(g.waypoints.len(), 4);
    assert_eq!(g.duration, Some(4000.0));
    assert_eq!(plan.borders[0].name, "Tri");

    let uniform = plan_borders(&gazetteer(), &[group], BorderTiming::Uniform, Throttle::none())
        .await
        .unwrap();
    assert_eq!(uniform.groups[0].duration, None);
}

#[tokio::test]
async fn border_input_errors() {
    let err = plan_borders(
        &gazetteer(),
        &[border_group(Vec::new())],
        BorderTiming::Uniform,
        Throttle::none(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.user_message(), NO_BORDER_GROUPS);

    let err = plan_borders(
        &gazetteer(),
        &[border_group(vec![BorderLocation::named("Nowhere")])],
        BorderTiming::Uniform,
        Throttle::none(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.user_message(), NO_RESOLVED_BORDERS);
}

#[tokio::test(start_paused = true)]
async fn throttle_spaces_sequential_lookups() {
    let started = tokio::time::Instant::now();
    plan_trips(
        &gazetteer(),
        &[trip("1", &["A", "B", "C"])],
        Throttle::new(Duration::from_secs(1)),
    )
    .await
    .unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(2));
}
