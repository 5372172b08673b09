use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::zone::{Hemisphere, Zone};

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);
/// WGS84 second eccentricity squared.
pub const WGS84_EP2: f64 = (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);

/// Transverse-Mercator scale factor on the central meridian.
pub const SCALE_FACTOR: f64 = 0.9996;
/// False easting applied to every zone (meters).
pub const FALSE_EASTING: f64 = 500_000.0;
/// False northing applied in the southern hemisphere (meters).
pub const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// A transform produced a non-finite coordinate.
///
/// This happens extremely close to the poles or far outside the zone's
/// intended 6° domain; callers must not build geometry from such a point.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionError {
    pub zone: Zone,
    pub message: String,
}

impl ProjectionError {
    fn new(zone: Zone, message: impl Into<String>) -> Self {
        Self {
            zone,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "projection failed in zone {}: {}", self.zone, self.message)
    }
}

impl std::error::Error for ProjectionError {}

/// Ellipsoidal transverse-Mercator projector for one zone.
///
/// An explicit value constructed per zone and passed to whoever needs the
/// transform; there is no process-wide projection registry. Inside the
/// zone's 6° span `inverse(forward(p))` reproduces `p` within 1e-6 degrees;
/// no invariant is claimed outside that domain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TransverseMercator {
    zone: Zone,
}

impl TransverseMercator {
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }

    pub fn zone(self) -> Zone {
        self.zone
    }

    fn false_northing(self) -> f64 {
        match self.zone.hemisphere {
            Hemisphere::North => 0.0,
            Hemisphere::South => FALSE_NORTHING_SOUTH,
        }
    }

    /// Geographic degrees to projected meters (Snyder series).
    pub fn forward(self, point: GeodeticPoint) -> Result<ProjectedPoint, ProjectionError> {
        let phi = point.lat.to_radians();
        let dlam = (point.lon - self.zone.central_meridian_deg()).to_radians();

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = phi.tan();

        let n = WGS84_A / (1.0 - WGS84_E2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = WGS84_EP2 * cos_phi * cos_phi;
        let a = cos_phi * dlam;
        let m = meridian_arc(phi);

        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a3 * a;
        let a5 = a4 * a;
        let a6 = a5 * a;

        let easting = SCALE_FACTOR
            * n
            * (a
                + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * WGS84_EP2) * a5 / 120.0)
            + FALSE_EASTING;

        let northing = SCALE_FACTOR
            * (m + n
                * tan_phi
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * WGS84_EP2) * a6 / 720.0))
            + self.false_northing();

        let projected = ProjectedPoint::new(easting, northing);
        if !projected.is_finite() {
            return Err(ProjectionError::new(
                self.zone,
                format!("forward of ({}, {}) is non-finite", point.lon, point.lat),
            ));
        }
        Ok(projected)
    }

    /// Projected meters back to geographic degrees (footpoint-latitude series).
    pub fn inverse(self, point: ProjectedPoint) -> Result<GeodeticPoint, ProjectionError> {
        let x = point.easting - FALSE_EASTING;
        let y = point.northing - self.false_northing();

        let m = y / SCALE_FACTOR;
        let mu = m / (WGS84_A * MERIDIAN_SCALE);
        let phi1 = footpoint_latitude(mu);

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = phi1.tan();

        let denom = 1.0 - WGS84_E2 * sin_phi1 * sin_phi1;
        let n1 = WGS84_A / denom.sqrt();
        let r1 = WGS84_A * (1.0 - WGS84_E2) / (denom * denom.sqrt());
        let c1 = WGS84_EP2 * cos_phi1 * cos_phi1;
        let t1 = tan_phi1 * tan_phi1;
        let d = x / (n1 * SCALE_FACTOR);

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let phi = phi1
            - (n1 * tan_phi1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * WGS84_EP2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * WGS84_EP2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);

        let dlam = (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * WGS84_EP2 + 24.0 * t1 * t1)
                * d5
                / 120.0)
            / cos_phi1;

        let geodetic = GeodeticPoint::new(
            self.zone.central_meridian_deg() + dlam.to_degrees(),
            phi.to_degrees(),
        );
        if !geodetic.lon.is_finite() || !geodetic.lat.is_finite() {
            return Err(ProjectionError::new(
                self.zone,
                format!(
                    "inverse of ({}, {}) is non-finite",
                    point.easting, point.northing
                ),
            ));
        }
        Ok(geodetic)
    }
}

// Series coefficient for the meridian arc normalization.
const MERIDIAN_SCALE: f64 = 1.0
    - WGS84_E2 / 4.0
    - 3.0 * WGS84_E2 * WGS84_E2 / 64.0
    - 5.0 * WGS84_E2 * WGS84_E2 * WGS84_E2 / 256.0;

/// Meridian arc length from the equator to latitude `phi` (radians), meters.
fn meridian_arc(phi: f64) -> f64 {
    let e2 = WGS84_E2;
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    WGS84_A
        * (MERIDIAN_SCALE * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
}

/// Latitude whose meridian arc matches the rectifying latitude `mu`.
fn footpoint_latitude(mu: f64) -> f64 {
    let sqrt_1_e2 = (1.0 - WGS84_E2).sqrt();
    let e1 = (1.0 - sqrt_1_e2) / (1.0 + sqrt_1_e2);
    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_3 * e1;

    mu + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin()
}

#[cfg(test)]
mod tests {
    use super::{FALSE_EASTING, FALSE_NORTHING_SOUTH, TransverseMercator};
    use crate::point::{GeodeticPoint, ProjectedPoint};
    use crate::zone::{Hemisphere, Zone};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    /// Deterministic pseudo-random sequence in [0, 1).
    struct Lcg(u64);

    impl Lcg {
        fn next_unit(&mut self) -> f64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.0 >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    #[test]
    fn central_meridian_maps_to_false_easting() {
        let zone = Zone::resolve(GeodeticPoint::new(10.0, 50.0));
        let tm = TransverseMercator::new(zone);
        let projected = tm.forward(GeodeticPoint::new(9.0, 0.0)).unwrap();
        assert_close(projected.easting, FALSE_EASTING, 1e-6);
        assert_close(projected.northing, 0.0, 1e-6);
    }

    #[test]
    fn easting_grows_eastward_northing_northward() {
        let tm = TransverseMercator::new(Zone::resolve(GeodeticPoint::new(10.0, 50.0)));
        let west = tm.forward(GeodeticPoint::new(8.0, 50.0)).unwrap();
        let east = tm.forward(GeodeticPoint::new(10.0, 50.0)).unwrap();
        assert!(west.easting < FALSE_EASTING);
        assert!(east.easting > FALSE_EASTING);

        let south = tm.forward(GeodeticPoint::new(9.0, 49.0)).unwrap();
        let north = tm.forward(GeodeticPoint::new(9.0, 51.0)).unwrap();
        assert!(south.northing < north.northing);
    }

    #[test]
    fn one_degree_of_latitude_spans_roughly_110km() {
        let tm = TransverseMercator::new(Zone::resolve(GeodeticPoint::new(9.0, 0.5)));
        let projected = tm.forward(GeodeticPoint::new(9.0, 1.0)).unwrap();
        assert!(
            projected.northing > 110_000.0 && projected.northing < 111_000.0,
            "northing {}",
            projected.northing
        );
    }

    #[test]
    fn southern_hemisphere_carries_false_northing() {
        let zone = Zone::resolve(GeodeticPoint::new(9.0, -1.0));
        assert_eq!(zone.hemisphere, Hemisphere::South);
        let tm = TransverseMercator::new(zone);
        let projected = tm.forward(GeodeticPoint::new(9.0, -1.0)).unwrap();
        assert!(projected.northing < FALSE_NORTHING_SOUTH);
        assert!(projected.northing > FALSE_NORTHING_SOUTH - 120_000.0);
    }

    #[test]
    fn round_trip_1000_random_in_zone_points() {
        let mut rng = Lcg(0x5eed_cafe);
        for _ in 0..1000 {
            let lon = -180.0 + 360.0 * rng.next_unit();
            let lat = -80.0 + 160.0 * rng.next_unit();
            let point = GeodeticPoint::new(lon, lat);

            let tm = TransverseMercator::new(Zone::resolve(point));
            let projected = tm.forward(point).unwrap();
            let back = tm.inverse(projected).unwrap();

            assert_close(back.lon, point.lon, 1e-6);
            assert_close(back.lat, point.lat, 1e-6);
        }
    }

    #[test]
    fn non_finite_input_reports_projection_error() {
        let tm = TransverseMercator::new(Zone::resolve(GeodeticPoint::new(9.0, 50.0)));
        assert!(tm.forward(GeodeticPoint::new(9.0, f64::NAN)).is_err());
        assert!(
            tm.inverse(ProjectedPoint::new(f64::INFINITY, 0.0))
                .is_err()
        );
    }
}
