use geodesy::{GeodeticPoint, Viewport};

/// Discrete events delivered by the map widget.
///
/// `Loaded` arrives once, before the first `MoveEnd`; no other ordering is
/// assumed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MapEvent {
    /// The map finished loading with an initial viewport.
    Loaded(Viewport),
    /// A pan/zoom interaction settled on a new viewport.
    MoveEnd(Viewport),
}

impl MapEvent {
    pub fn viewport(self) -> Viewport {
        match self {
            MapEvent::Loaded(viewport) | MapEvent::MoveEnd(viewport) => viewport,
        }
    }
}

/// Why a one-shot geolocation fix did not produce a position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    PermissionDenied,
    PositionUnavailable,
}

impl std::fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeolocationError::PermissionDenied => write!(f, "geolocation permission denied"),
            GeolocationError::PositionUnavailable => write!(f, "position unavailable"),
        }
    }
}

impl std::error::Error for GeolocationError {}

/// Result of the browser's one-shot geolocation request.
pub type GeolocationFix = Result<GeodeticPoint, GeolocationError>;
