use geodesy::GeodeticPoint;

/// Orientation of a grid line in projected space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Constant northing, varying easting.
    Horizontal,
    /// Constant easting, varying northing.
    Vertical,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }
}

/// One densified grid line, ready for geographic rendering.
///
/// `value` is the snapped projected coordinate the line sits on (easting for
/// vertical lines, northing for horizontal). Vertices are in monotonic
/// sample order and always number at least two.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLineFeature {
    pub direction: Direction,
    pub value: f64,
    pub vertices: Vec<GeodeticPoint>,
}

/// An ordered set of grid lines from one generation pass.
///
/// Order is stable for identical inputs; rendering does not depend on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridFeatureCollection {
    pub features: Vec<GridLineFeature>,
}

impl GridFeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn lines(&self, direction: Direction) -> impl Iterator<Item = &GridLineFeature> {
        self.features
            .iter()
            .filter(move |f| f.direction == direction)
    }
}
