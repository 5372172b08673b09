use geodesy::{GeodeticPoint, ProjectedPoint, ProjectionError, TransverseMercator, Viewport};
use tracing::warn;

use crate::feature::{Direction, GridFeatureCollection, GridLineFeature};
use crate::spec::GridSpec;

/// Forward/inverse transform seam used by the generator.
///
/// The production implementation is `geodesy::TransverseMercator`; tests
/// substitute failing doubles to exercise the drop-line policy.
pub trait Projector {
    fn forward(&self, point: GeodeticPoint) -> Result<ProjectedPoint, ProjectionError>;
    fn inverse(&self, point: ProjectedPoint) -> Result<GeodeticPoint, ProjectionError>;
}

impl Projector for TransverseMercator {
    fn forward(&self, point: GeodeticPoint) -> Result<ProjectedPoint, ProjectionError> {
        TransverseMercator::forward(*self, point)
    }

    fn inverse(&self, point: ProjectedPoint) -> Result<GeodeticPoint, ProjectionError> {
        TransverseMercator::inverse(*self, point)
    }
}

/// A generation cycle failed as a whole.
///
/// Fatal to that cycle only; the previously displayed grid stays up.
#[derive(Debug)]
pub struct GridGenerationFailure {
    pub message: String,
    pub source: Option<ProjectionError>,
}

impl GridGenerationFailure {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    fn corner(message: impl Into<String>, source: ProjectionError) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }
}

impl std::fmt::Display for GridGenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GridGenerationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as _)
    }
}

/// Build a snapped, densified grid covering `viewport`.
///
/// The projected bounding rectangle is snapped outward to multiples of the
/// step, then one line is emitted per grid value, sampled at step/10 and
/// inverse-projected so it renders as the correct curve on a geographic
/// canvas. A line whose samples fail to inverse-project is dropped and
/// logged; the rest of the grid still comes back.
///
/// Output is deterministic: identical inputs produce identical collections.
pub fn generate(
    viewport: Viewport,
    projector: &impl Projector,
    spec: GridSpec,
) -> Result<GridFeatureCollection, GridGenerationFailure> {
    let step = spec.step_meters;
    if !step.is_finite() || step <= 0.0 {
        return Err(GridGenerationFailure::new(format!(
            "grid step must be positive and finite, got {step}"
        )));
    }

    let sw = projector
        .forward(viewport.south_west)
        .map_err(|e| GridGenerationFailure::corner("south-west corner failed to project", e))?;
    let ne = projector
        .forward(viewport.north_east)
        .map_err(|e| GridGenerationFailure::corner("north-east corner failed to project", e))?;

    // Degenerate or inverted extent: nothing to draw, not an error.
    if sw.easting >= ne.easting || sw.northing >= ne.northing {
        return Ok(GridFeatureCollection::new());
    }

    // Snap outward to step multiples.
    let start_x = (sw.easting / step).floor() * step;
    let start_y = (sw.northing / step).floor() * step;
    let end_x = (ne.easting / step).ceil() * step;
    let end_y = (ne.northing / step).ceil() * step;

    let cols = ((end_x - start_x) / step).round() as i64;
    let rows = ((end_y - start_y) / step).round() as i64;
    let sample_step = spec.sample_step();
    let x_samples = ((end_x - start_x) / sample_step).round() as i64;
    let y_samples = ((end_y - start_y) / sample_step).round() as i64;

    let mut collection = GridFeatureCollection::new();

    // Vertical lines (constant easting), west to east.
    for i in 0..=cols {
        let x = start_x + i as f64 * step;
        let samples = (0..=y_samples).map(|j| ProjectedPoint::new(x, start_y + j as f64 * sample_step));
        match densify(projector, samples) {
            Ok(vertices) => collection.features.push(GridLineFeature {
                direction: Direction::Vertical,
                value: x,
                vertices,
            }),
            Err(err) => warn!("dropping vertical grid line at easting {x}: {err}"),
        }
    }

    // Horizontal lines (constant northing), south to north.
    for i in 0..=rows {
        let y = start_y + i as f64 * step;
        let samples = (0..=x_samples).map(|j| ProjectedPoint::new(start_x + j as f64 * sample_step, y));
        match densify(projector, samples) {
            Ok(vertices) => collection.features.push(GridLineFeature {
                direction: Direction::Horizontal,
                value: y,
                vertices,
            }),
            Err(err) => warn!("dropping horizontal grid line at northing {y}: {err}"),
        }
    }

    Ok(collection)
}

fn densify(
    projector: &impl Projector,
    samples: impl Iterator<Item = ProjectedPoint>,
) -> Result<Vec<GeodeticPoint>, ProjectionError> {
    samples.map(|p| projector.inverse(p)).collect()
}
