/// Geographic coordinates in degrees (WGS84).
///
/// Longitude is expected pre-normalized into [-180, 180], latitude into
/// [-90, 90]; producers (map widget, geolocation) deliver both in range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeodeticPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeodeticPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Planar coordinates in meters, relative to one projection zone.
///
/// Values from different zones are not comparable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectedPoint {
    pub easting: f64,
    pub northing: f64,
}

impl ProjectedPoint {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }

    pub fn is_finite(self) -> bool {
        self.easting.is_finite() && self.northing.is_finite()
    }
}
