use grid::GridFeatureCollection;

/// Display seam owned by the map widget.
///
/// `replace_grid` must be replace-in-place: remove any previously displayed
/// grid layer atomically before adding the new one, so stale and fresh lines
/// are never shown together and repeated calls never trip a duplicate-layer
/// registration error.
pub trait OverlayRenderer {
    fn replace_grid(&mut self, collection: GridFeatureCollection);
}

/// Renderer double that records every replacement, newest last.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub replacements: Vec<GridFeatureCollection>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn displayed(&self) -> Option<&GridFeatureCollection> {
        self.replacements.last()
    }
}

impl OverlayRenderer for RecordingRenderer {
    fn replace_grid(&mut self, collection: GridFeatureCollection) {
        self.replacements.push(collection);
    }
}
