use crate::point::GeodeticPoint;

/// Hemisphere of a projection zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hemisphere::North => write!(f, "N"),
            Hemisphere::South => write!(f, "S"),
        }
    }
}

/// A 6°-wide longitude band plus hemisphere, selecting one instance of the
/// transverse-Mercator projection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Zone {
    pub number: u8,
    pub hemisphere: Hemisphere,
}

impl Zone {
    /// Resolve the zone containing a geographic point.
    ///
    /// Pure and total over in-range inputs. Points exactly on a 6° meridian
    /// boundary belong to the zone to the east; lon = +180 clamps to zone 60.
    /// Latitude 0 is assigned the northern hemisphere.
    pub fn resolve(point: GeodeticPoint) -> Zone {
        let raw = ((point.lon + 180.0) / 6.0).floor() as i32 + 1;
        let number = raw.clamp(1, 60) as u8;
        let hemisphere = if point.lat >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        };
        Zone { number, hemisphere }
    }

    /// Central meridian of the zone, degrees east.
    pub fn central_meridian_deg(self) -> f64 {
        f64::from(self.number) * 6.0 - 183.0
    }

    /// Western and eastern edge of the zone's 6° longitude span, degrees.
    pub fn lon_span_deg(self) -> (f64, f64) {
        let west = f64::from(self.number) * 6.0 - 186.0;
        (west, west + 6.0)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.number, self.hemisphere)
    }
}

#[cfg(test)]
mod tests {
    use super::{Hemisphere, Zone};
    use crate::point::GeodeticPoint;

    #[test]
    fn known_fixture_zone_32_north() {
        let zone = Zone::resolve(GeodeticPoint::new(10.0, 50.0));
        assert_eq!(zone.number, 32);
        assert_eq!(zone.hemisphere, Hemisphere::North);
    }

    #[test]
    fn monotonic_across_boundaries() {
        let mut prev = 0u8;
        let mut lon = -180.0;
        while lon <= 180.0 {
            let number = Zone::resolve(GeodeticPoint::new(lon, 45.0)).number;
            assert!(number >= prev, "zone regressed at lon {lon}");
            prev = number;
            lon += 0.5;
        }
    }

    #[test]
    fn boundary_meridian_belongs_to_eastern_zone() {
        // 12°E is the edge between zones 32 and 33.
        assert_eq!(Zone::resolve(GeodeticPoint::new(12.0, 50.0)).number, 33);
        assert_eq!(
            Zone::resolve(GeodeticPoint::new(12.0 - 1e-9, 50.0)).number,
            32
        );
    }

    #[test]
    fn wraps_to_zones_1_and_60_at_antimeridian() {
        assert_eq!(Zone::resolve(GeodeticPoint::new(-180.0, 0.0)).number, 1);
        assert_eq!(Zone::resolve(GeodeticPoint::new(180.0, 0.0)).number, 60);
        assert_eq!(Zone::resolve(GeodeticPoint::new(179.999, 0.0)).number, 60);
    }

    #[test]
    fn equator_is_north() {
        assert_eq!(
            Zone::resolve(GeodeticPoint::new(0.0, 0.0)).hemisphere,
            Hemisphere::North
        );
        assert_eq!(
            Zone::resolve(GeodeticPoint::new(0.0, -1e-9)).hemisphere,
            Hemisphere::South
        );
    }

    #[test]
    fn central_meridian_and_span() {
        let zone = Zone::resolve(GeodeticPoint::new(10.0, 50.0));
        assert_eq!(zone.central_meridian_deg(), 9.0);
        assert_eq!(zone.lon_span_deg(), (6.0, 12.0));
    }
}
