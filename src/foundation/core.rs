use crate::foundation::error::{FlypathError, FlypathResult};

/// Geographic position in degrees. Serialized as `[lat, lng]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite and inside the usual degree ranges.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Per-axis linear blend toward `to`. No antimeridian handling.
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            lat: self.lat * (1.0 - t) + to.lat * t,
            lng: self.lng * (1.0 - t) + to.lng * t,
        }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self {
        [p.lat, p.lng]
    }
}

/// Axis-aligned geographic box. Serialized as `[south, north, west, east]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct GeoBounds {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl GeoBounds {
    /// Validated constructor (`south <= north`, `west <= east`).
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> FlypathResult<Self> {
        if !(south <= north && west <= east) {
            return Err(FlypathError::validation(
                "GeoBounds requires south <= north and west <= east",
            ));
        }
        Ok(Self {
            south,
            north,
            west,
            east,
        })
    }

    /// Tight bounds around `points`, or `None` when empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = Self {
            south: first.lat,
            north: first.lat,
            west: first.lng,
            east: first.lng,
        };
        for p in it {
            b.extend(p);
        }
        Some(b)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south = self.south.min(p.lat);
        self.north = self.north.max(p.lat);
        self.west = self.west.min(p.lng);
        self.east = self.east.max(p.lng);
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            south: self.south.min(other.south),
            north: self.north.max(other.north),
            west: self.west.min(other.west),
            east: self.east.max(other.east),
        }
    }

    pub fn center(self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    pub fn contains(self, p: LatLng) -> bool {
        (self.south..=self.north).contains(&p.lat) && (self.west..=self.east).contains(&p.lng)
    }
}

impl From<[f64; 4]> for GeoBounds {
    fn from([south, north, west, east]: [f64; 4]) -> Self {
        Self {
            south,
            north,
            west,
            east,
        }
    }
}

impl From<GeoBounds> for [f64; 4] {
    fn from(b: GeoBounds) -> Self {
        [b.south, b.north, b.west, b.east]
    }
}

/// RGB color parsed from `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn parse_hex(s: &str) -> FlypathResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(FlypathError::validation(format!(
                "color must be #rrggbb, got '{s}'"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| FlypathError::validation(format!("invalid hex color '{s}'")))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = FlypathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Palette cycled through when new groups are created.
pub const PATH_COLORS: [&str; 8] = [
    "#06b6d4", "#3b82f6", "#84cc16", "#f59e0b", "#ef4444", "#a855f7", "#ec4899", "#f97316",
];

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
