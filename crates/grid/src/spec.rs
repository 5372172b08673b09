/// Grid configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridSpec {
    /// Spacing between grid lines in projected meters. Must be positive.
    pub step_meters: f64,
}

/// 100 km, the primary grid interval.
pub const DEFAULT_STEP_METERS: f64 = 100_000.0;

/// Samples per step when densifying a line for geographic rendering.
pub const SAMPLES_PER_STEP: f64 = 10.0;

impl GridSpec {
    pub fn new(step_meters: f64) -> Self {
        Self { step_meters }
    }

    /// Sub-step used for line densification.
    pub fn sample_step(self) -> f64 {
        self.step_meters / SAMPLES_PER_STEP
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            step_meters: DEFAULT_STEP_METERS,
        }
    }
}
