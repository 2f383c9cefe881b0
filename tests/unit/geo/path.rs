use super::*;
use crate::geo::distance::distance_meters;

fn pts(raw: &[(f64, f64)]) -> Vec<LatLng> {
    raw.iter().map(|&(lat, lng)| LatLng::new(lat, lng)).collect()
}

fn assert_close(a: f64, b: f64, eps: f64) {
    let diff = (a - b).abs();
    assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
}

#[test]
fn table_is_monotonic_and_starts_at_zero() {
    let p = pts(&[(0.0, 0.0), (0.0, 1.0), (0.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);
    let table = path_cumulative_distance(&p);
    assert_eq!(table.len(), p.len());
    assert_eq!(table[0], 0.0);
    assert!(table.windows(2).all(|w| w[0] <= w[1]));
    // Duplicate points add nothing.
    assert_eq!(table[1], table[2]);
    assert_eq!(table[3], table[4]);
    assert!(table.iter().all(|d| d.is_finite()));
}

#[test]
fn endpoints_map_to_first_and_last_points() {
    let path = GeoPath::new(pts(&[(10.0, 10.0), (11.0, 12.0), (9.0, 14.0)]));
    let total = path.total_distance();
    assert_eq!(path.point_at_distance(0.0), path.first());
    assert_eq!(path.point_at_distance(-5.0), path.first());
    assert_eq!(path.point_at_distance(total), path.last());
    assert_eq!(path.point_at_distance(total * 2.0), path.last());
    assert_eq!(path.point_at_distance(f64::NAN), path.first());
}

#[test]
fn midpoint_of_two_equal_segments_is_the_joint() {
    let path = GeoPath::new(pts(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]));
    let total = path.total_distance();
    assert_close(total, 2.0 * 111_194.93, 2.0);
    assert_eq!(path.point_at_distance(total / 2.0), Some(LatLng::new(0.0, 1.0)));
}

#[test]
fn interpolated_points_stay_on_their_segment() {
    let path = GeoPath::new(pts(&[
        (0.0, 0.0),
        (0.5, 0.5),
        (0.5, 0.5),
        (1.0, 2.0),
        (-1.0, 3.0),
    ]));
    let table = path.cumulative();
    let total = path.total_distance();
    for step in 0..=200 {
        let d = total * f64::from(step) / 200.0;
        let p = path.point_at_distance(d).unwrap();
        let end = table.partition_point(|&c| c < d).max(1).min(path.len() - 1);
        let start_pt = path.points()[end - 1];
        let from_start = distance_meters(start_pt, p);
        let seg_len = table[end] - table[end - 1];
        // Planar interpolation in degrees is not exactly geodesic, allow a small slack.
        assert!(from_start <= seg_len * 1.01 + 1e-6, "step {step}");
    }
}

#[test]
fn point_at_distance_is_continuous() {
    let path = GeoPath::new(pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 3.0)]));
    let total = path.total_distance();
    let steps = 2000;
    let mut prev = path.point_at_distance(0.0).unwrap();
    for i in 1..=steps {
        let p = path
            .point_at_distance(total * f64::from(i) / f64::from(steps))
            .unwrap();
        let jump = distance_meters(prev, p);
        assert!(jump <= total / f64::from(steps) * 1.05 + 1.0, "jump {jump} at {i}");
        prev = p;
    }
}

#[test]
fn degenerate_paths() {
    let empty = GeoPath::new(vec![]);
    assert!(empty.is_degenerate());
    assert_eq!(empty.point_at_distance(10.0), None);
    assert_eq!(empty.total_distance(), 0.0);

    let single = GeoPath::new(pts(&[(3.0, 4.0)]));
    assert!(single.is_degenerate());
    assert_eq!(single.point_at_distance(10.0), Some(LatLng::new(3.0, 4.0)));

    let stuck = GeoPath::new(pts(&[(3.0, 4.0), (3.0, 4.0)]));
    assert_eq!(stuck.total_distance(), 0.0);
    assert_eq!(stuck.point_at_progress(0.5), Some(LatLng::new(3.0, 4.0)));
}

#[test]
fn path_across_antimeridian_passes_through_180() {
    let path = GeoPath::new(pts(&[(0.0, 179.0), (0.0, -179.0)]));
    let mid = path.point_at_progress(0.5).unwrap();
    assert!(mid.lng.abs() > 179.9);
    assert_close(mid.lat, 0.0, 1e-12);
}
