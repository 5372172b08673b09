use tracing::debug;

use crate::events::MapEvent;
use crate::renderer::OverlayRenderer;
use crate::sync::{CompletionOutcome, ViewportSync};

/// Opaque handle for one registered event handler.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// The map widget's subscription surface for `load`/`move-end` delivery.
pub trait MapEventSource {
    fn subscribe(&mut self) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Binds a `ViewportSync` to a map instance's event stream.
///
/// Holds at most one live subscription: `initialize` replaces (never stacks)
/// an existing registration, and dropping the controller unregisters it, so
/// no handler outlives the overlay and re-initialization cannot accumulate
/// duplicates.
pub struct OverlayController<S: MapEventSource> {
    source: S,
    subscription: Option<SubscriptionId>,
    sync: ViewportSync,
}

impl<S: MapEventSource> OverlayController<S> {
    pub fn new(source: S, sync: ViewportSync) -> Self {
        Self {
            source,
            subscription: None,
            sync,
        }
    }

    /// Register for map events, replacing any previous registration.
    pub fn initialize(&mut self) {
        if let Some(old) = self.subscription.take() {
            debug!("replacing map event subscription {old:?}");
            self.source.unsubscribe(old);
        }
        self.subscription = Some(self.source.subscribe());
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn sync(&self) -> &ViewportSync {
        &self.sync
    }

    pub fn sync_mut(&mut self) -> &mut ViewportSync {
        &mut self.sync
    }

    /// Entry point the host calls when the map delivers an event.
    pub fn on_event(
        &mut self,
        event: MapEvent,
        renderer: &mut dyn OverlayRenderer,
    ) -> CompletionOutcome {
        self.sync.process(event, renderer)
    }

    /// Unregister without dropping the controller.
    pub fn teardown(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.source.unsubscribe(id);
        }
    }
}

impl<S: MapEventSource> Drop for OverlayController<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    use geodesy::{GeodeticPoint, Viewport};
    use grid::GridSpec;

    use super::{MapEventSource, OverlayController, SubscriptionId};
    use crate::events::MapEvent;
    use crate::renderer::RecordingRenderer;
    use crate::sync::{CompletionOutcome, ViewportSync};

    /// Map widget double that tracks live registrations.
    #[derive(Debug, Default, Clone)]
    struct FakeMapEvents {
        inner: Rc<RefCell<FakeMapEventsInner>>,
    }

    #[derive(Debug, Default)]
    struct FakeMapEventsInner {
        next_id: u64,
        live: HashSet<SubscriptionId>,
        max_live: usize,
    }

    impl FakeMapEvents {
        fn live_count(&self) -> usize {
            self.inner.borrow().live.len()
        }

        fn max_live(&self) -> usize {
            self.inner.borrow().max_live
        }
    }

    impl MapEventSource for FakeMapEvents {
        fn subscribe(&mut self) -> SubscriptionId {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = SubscriptionId(inner.next_id);
            inner.live.insert(id);
            let live = inner.live.len();
            inner.max_live = inner.max_live.max(live);
            id
        }

        fn unsubscribe(&mut self, id: SubscriptionId) {
            self.inner.borrow_mut().live.remove(&id);
        }
    }

    fn controller(source: FakeMapEvents) -> OverlayController<FakeMapEvents> {
        OverlayController::new(source, ViewportSync::new(GridSpec::default()))
    }

    #[test]
    fn initialize_registers_exactly_one_handler() {
        let source = FakeMapEvents::default();
        let mut ctl = controller(source.clone());
        assert!(!ctl.is_subscribed());

        ctl.initialize();
        assert!(ctl.is_subscribed());
        assert_eq!(source.live_count(), 1);
    }

    #[test]
    fn reinitialize_replaces_never_stacks() {
        let source = FakeMapEvents::default();
        let mut ctl = controller(source.clone());

        ctl.initialize();
        ctl.initialize();
        ctl.initialize();

        assert_eq!(source.live_count(), 1);
        assert_eq!(source.max_live(), 1);
    }

    #[test]
    fn drop_unsubscribes() {
        let source = FakeMapEvents::default();
        {
            let mut ctl = controller(source.clone());
            ctl.initialize();
            assert_eq!(source.live_count(), 1);
        }
        assert_eq!(source.live_count(), 0);
    }

    #[test]
    fn teardown_is_idempotent() {
        let source = FakeMapEvents::default();
        let mut ctl = controller(source.clone());
        ctl.initialize();
        ctl.teardown();
        ctl.teardown();
        assert_eq!(source.live_count(), 0);
        assert!(!ctl.is_subscribed());
    }

    #[test]
    fn events_flow_through_to_the_renderer() {
        let source = FakeMapEvents::default();
        let mut ctl = controller(source);
        ctl.initialize();

        let mut renderer = RecordingRenderer::new();
        let viewport = Viewport::new(
            GeodeticPoint::new(10.5, 47.5),
            GeodeticPoint::new(12.5, 48.9),
        );
        let outcome = ctl.on_event(MapEvent::Loaded(viewport), &mut renderer);

        assert_eq!(outcome, CompletionOutcome::Applied);
        assert_eq!(renderer.replacements.len(), 1);
        assert!(ctl.sync().current_grid().is_some());
    }
}
