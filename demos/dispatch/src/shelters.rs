//! Shelter placement for the demo: run-file entries, `--shelter` flags, and
//! a fallback set around Sydney's CBD.

use relief_core::GeoPoint;
use serde::Deserialize;

/// One `[[shelters]]` entry in the run file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Placement {
    pub lat:  f64,
    pub lon:  f64,
    /// Overrides `sim.shelter_need` for this shelter.
    #[serde(default)]
    pub need: Option<u32>,
}

impl Placement {
    pub fn at(location: GeoPoint) -> Self {
        Self { lat: location.lat, lon: location.lon, need: None }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// The location, if it is a finite WGS-84 coordinate.
    pub fn validate(&self) -> Result<GeoPoint, String> {
        let location = self.location();
        if !location.is_finite() {
            return Err(format!("coordinate is not finite: {},{}", self.lat, self.lon));
        }
        if !location.in_wgs84_range() {
            return Err(format!("coordinate out of range: {},{}", self.lat, self.lon));
        }
        Ok(location)
    }
}

/// Used when neither the run file nor the command line places a shelter.
pub fn default_shelters() -> Vec<Placement> {
    [
        GeoPoint::new(-33.8688, 151.2093), // Town Hall
        GeoPoint::new(-33.8720, 151.2050), // Darling Harbour
        GeoPoint::new(-33.8650, 151.2140), // The Domain
    ]
    .into_iter()
    .map(Placement::at)
    .collect()
}

/// `clap` value parser for `--shelter LAT,LON`.
pub fn parse_point(raw: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {raw:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude {lon:?}: {e}"))?;
    Placement::at(GeoPoint::new(lat, lon)).validate()
}
