//! Geometry on latitude/longitude polylines.

pub mod distance;
pub mod path;
