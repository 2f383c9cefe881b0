use crate::foundation::core::LatLng;

/// Mean Earth radius in meters (spherical model, same as Leaflet's `CRS.Earth`).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points using the haversine formula.
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Wrap a longitude into `(-180, 180]`.
pub fn normalize_lng(lng: f64) -> f64 {
    if !lng.is_finite() {
        return lng;
    }
    let mut x = lng % 360.0;
    if x <= -180.0 {
        x += 360.0;
    } else if x > 180.0 {
        x -= 360.0;
    }
    x
}

/// Interpolate between two points at `ratio` (clamped to `[0, 1]`).
///
/// Latitude is blended linearly. Longitude takes the short way across the antimeridian: when the
/// raw delta exceeds 180 degrees the end longitude is shifted by 360 before blending, and the
/// result is wrapped back into `(-180, 180]`.
pub fn interpolate(from: LatLng, to: LatLng, ratio: f64) -> LatLng {
    let t = ratio.clamp(0.0, 1.0);

    let mut to_lng = to.lng;
    let lng_diff = to.lng - from.lng;
    if lng_diff > 180.0 {
        to_lng -= 360.0;
    } else if lng_diff < -180.0 {
        to_lng += 360.0;
    }

    LatLng {
        lat: from.lat + (to.lat - from.lat) * t,
        lng: normalize_lng(from.lng + (to_lng - from.lng) * t),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geo/distance.rs"]
mod tests;
