use crate::foundation::core::{GeoBounds, LatLng};
use crate::geo::distance::{distance_meters, interpolate};

/// Cumulative distance table for `points`: entry `i` is the path length from point 0 to point `i`.
///
/// Zero-length segments contribute nothing; the table is monotonically non-decreasing and starts at
/// zero. An empty input yields an empty table.
pub fn path_cumulative_distance(points: &[LatLng]) -> Vec<f64> {
    let mut table = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            let seg = distance_meters(points[i - 1], *p);
            if seg.is_finite() && seg > 0.0 {
                acc += seg;
            }
        }
        table.push(acc);
    }
    table
}

/// Point at `target` meters along the polyline described by `points` and its cumulative `table`.
///
/// Returns `None` only for an empty path. Targets at or before the start map to the first point,
/// targets at or past the end map to the last point.
pub fn point_at_distance(points: &[LatLng], table: &[f64], target: f64) -> Option<LatLng> {
    let first = *points.first()?;
    let last = *points.last()?;
    debug_assert_eq!(points.len(), table.len());

    // NaN lands here as well.
    if !(target > 0.0) {
        return Some(first);
    }
    let total = table.last().copied().unwrap_or(0.0);
    if target >= total {
        return Some(last);
    }

    // First index whose cumulative distance reaches the target. Since table[0] == 0 < target, the
    // index is >= 1 and the segment ending there has positive length.
    let end = table.partition_point(|&c| c < target);
    if end == 0 || end >= points.len() {
        return Some(last);
    }
    let start = end - 1;
    let seg_len = table[end] - table[start];
    if seg_len <= 0.0 {
        return Some(points[end]);
    }

    let ratio = (target - table[start]) / seg_len;
    Some(interpolate(points[start], points[end], ratio))
}

/// Immutable polyline plus its precomputed cumulative distance table.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoPath {
    points: Vec<LatLng>,
    cumulative: Vec<f64>,
}

impl GeoPath {
    pub fn new(points: Vec<LatLng>) -> Self {
        let cumulative = path_cumulative_distance(&points);
        Self { points, cumulative }
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Total length in meters.
    pub fn total_distance(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than two points: nothing to animate.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    pub fn first(&self) -> Option<LatLng> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<LatLng> {
        self.points.last().copied()
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.points.iter().copied())
    }

    pub fn point_at_distance(&self, target: f64) -> Option<LatLng> {
        point_at_distance(&self.points, &self.cumulative, target)
    }

    /// Point at a progress fraction of the total length.
    pub fn point_at_progress(&self, progress: f64) -> Option<LatLng> {
        self.point_at_distance(self.total_distance() * progress.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geo/path.rs"]
mod tests;
