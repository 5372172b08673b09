use geodesy::{TransverseMercator, Viewport, Zone};
use grid::{generate, GridFeatureCollection, GridGenerationFailure, GridSpec};
use tracing::{debug, info, warn};

use crate::events::{GeolocationFix, MapEvent};
use crate::renderer::OverlayRenderer;

/// Where the machine is between events.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Computing,
}

/// Identifies one in-flight generation.
///
/// Completing with a superseded ticket discards the result: latest viewport
/// wins, a stale generation never overwrites a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationTicket {
    seq: u64,
    viewport: Viewport,
    projector: TransverseMercator,
}

impl GenerationTicket {
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn zone(&self) -> Zone {
        self.projector.zone()
    }
}

/// How a completion was applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The collection replaced the displayed grid.
    Applied,
    /// The ticket was superseded; its result was discarded.
    Abandoned,
    /// Generation failed; the previously displayed grid was retained.
    Failed,
}

/// Keeps the grid overlay in step with a continuously-changing viewport.
///
/// Owns the zone/projector pair and the currently-displayed collection
/// exclusively; both change only on transition edges. The machine runs for
/// the lifetime of the map instance and has no terminal state.
#[derive(Debug)]
pub struct ViewportSync {
    state: SyncState,
    latest_seq: u64,
    spec: GridSpec,
    projector: Option<TransverseMercator>,
    current: Option<GridFeatureCollection>,
    seen_viewport: bool,
}

impl ViewportSync {
    pub fn new(spec: GridSpec) -> Self {
        Self {
            state: SyncState::Idle,
            latest_seq: 0,
            spec,
            projector: None,
            current: None,
            seen_viewport: false,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The collection currently handed to the renderer, if any.
    pub fn current_grid(&self) -> Option<&GridFeatureCollection> {
        self.current.as_ref()
    }

    pub fn zone(&self) -> Option<Zone> {
        self.projector.map(TransverseMercator::zone)
    }

    /// Seed the initial zone from a one-shot geolocation fix.
    ///
    /// Best effort: a failed fix just means the zone comes from the first
    /// viewport event instead. Ignored once a viewport has been observed.
    pub fn seed_zone(&mut self, fix: GeolocationFix) {
        if self.seen_viewport {
            return;
        }
        match fix {
            Ok(point) => {
                let zone = Zone::resolve(point);
                info!("seeding projection zone {zone} from geolocation");
                self.projector = Some(TransverseMercator::new(zone));
            }
            Err(err) => debug!("geolocation unavailable ({err}), waiting for first viewport"),
        }
    }

    /// Start a generation cycle for the event's viewport.
    ///
    /// Issues a fresh ticket every time; an earlier ticket still in flight is
    /// thereby superseded. Re-resolves the zone from the viewport center and
    /// swaps in a new projector when it changed.
    pub fn observe(&mut self, event: MapEvent) -> GenerationTicket {
        let viewport = event.viewport();
        self.seen_viewport = true;

        let zone = Zone::resolve(viewport.center());
        if self.projector.map(TransverseMercator::zone) != Some(zone) {
            info!("projection zone is now {zone}");
            self.projector = Some(TransverseMercator::new(zone));
        }

        let sw_zone = Zone::resolve(viewport.south_west);
        let ne_zone = Zone::resolve(viewport.north_east);
        if sw_zone.number != ne_zone.number {
            // Multi-zone viewports are not handled; the whole grid is
            // generated in the center zone's projection.
            debug!("viewport spans zones {sw_zone} to {ne_zone}, using {zone}");
        }

        self.latest_seq += 1;
        self.state = SyncState::Computing;

        GenerationTicket {
            seq: self.latest_seq,
            viewport,
            projector: TransverseMercator::new(zone),
        }
    }

    /// Run the generator for a ticket's viewport.
    pub fn generate(
        &self,
        ticket: &GenerationTicket,
    ) -> Result<GridFeatureCollection, GridGenerationFailure> {
        generate(ticket.viewport, &ticket.projector, self.spec)
    }

    /// Apply a finished generation, unless the ticket was superseded.
    pub fn complete(
        &mut self,
        ticket: GenerationTicket,
        result: Result<GridFeatureCollection, GridGenerationFailure>,
        renderer: &mut dyn OverlayRenderer,
    ) -> CompletionOutcome {
        if ticket.seq != self.latest_seq {
            debug!(
                "discarding superseded generation {} (latest is {})",
                ticket.seq, self.latest_seq
            );
            return CompletionOutcome::Abandoned;
        }

        self.state = SyncState::Idle;
        match result {
            Ok(collection) => {
                self.current = Some(collection.clone());
                renderer.replace_grid(collection);
                CompletionOutcome::Applied
            }
            Err(err) => {
                // Keep whatever was displayed; a blank overlay is worse than
                // a stale one.
                warn!("grid generation failed, retaining previous grid: {err}");
                CompletionOutcome::Failed
            }
        }
    }

    /// Observe, generate and complete in one synchronous pass.
    pub fn process(
        &mut self,
        event: MapEvent,
        renderer: &mut dyn OverlayRenderer,
    ) -> CompletionOutcome {
        let ticket = self.observe(event);
        let result = self.generate(&ticket);
        self.complete(ticket, result, renderer)
    }
}
