//! Geographic coordinate type and distance metrics.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Volunteers creep toward their
//! shelter in steps that shrink geometrically, and the per-tick jitter is a
//! few ten-thousandths of a degree, so single precision would round the last
//! few metres of approach away.

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Linear interpolation toward `target` by fraction `t`, per coordinate.
    ///
    /// `t = 0` returns `self`, `t = 1` returns `target`.
    #[inline]
    pub fn lerp(self, target: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (target.lat - self.lat) * t,
            lon: self.lon + (target.lon - self.lon) * t,
        }
    }

    /// Shift both coordinates by the given amounts.
    #[inline]
    pub fn offset(self, d_lat: f64, d_lon: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + d_lat,
            lon: self.lon + d_lon,
        }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// Both coordinates are finite.  Any metric is meaningless otherwise.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Latitude in `[-90, 90]` and longitude in `[-180, 180]`.  `false` for
    /// NaN.
    #[inline]
    pub fn in_wgs84_range(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Distance metrics ──────────────────────────────────────────────────────────

/// The distance function supplied by the map layer.
///
/// The arrival threshold is expressed in whatever unit the metric returns, so
/// a `Haversine` simulation uses metres and a `Planar` one uses coordinate
/// units.  Swap the metric at compile time via `Simulation<M>`.
pub trait DistanceMetric {
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64;
}

/// Great-circle distance in metres.  The default metric.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    #[inline]
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        a.distance_m(b)
    }
}

/// Euclidean distance treating `(lat, lon)` as flat `(y, x)` coordinates.
///
/// Useful for projected maps and for tests that want exact geometry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Planar;

impl DistanceMetric for Planar {
    #[inline]
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        (a.lat - b.lat).hypot(a.lon - b.lon)
    }
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    #[inline]
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        (**self).distance(a, b)
    }
}
