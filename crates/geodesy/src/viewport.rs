use crate::point::GeodeticPoint;

/// A read-only snapshot of the map widget's visible bounds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub south_west: GeodeticPoint,
    pub north_east: GeodeticPoint,
}

impl Viewport {
    pub fn new(south_west: GeodeticPoint, north_east: GeodeticPoint) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Midpoint of the bounds; the projection zone is resolved from here.
    pub fn center(self) -> GeodeticPoint {
        GeodeticPoint::new(
            0.5 * (self.south_west.lon + self.north_east.lon),
            0.5 * (self.south_west.lat + self.north_east.lat),
        )
    }
}
