use std::sync::Arc;

use async_channel::{Receiver, Sender};
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    api::{DirectionsAPI, MapSurface},
    engine::{RenderOutcome, RouteRenderingEngine, RouteVariantSelector},
    entities::{ActiveRoute, Coordinates, Variant},
    error::Error,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    RouteLoaded,
    VariantChanged(Variant),
}

/// A rider's map view: one engine, one variant selector, and the route the
/// rider picked last.
///
/// Route loads and variant changes arrive as events; every event renders the
/// view's current route and variant, so the order events are drained in never
/// changes what ends up on the map.
pub struct RouteView<P, S> {
    engine: Arc<RouteRenderingEngine<P, S>>,
    selector: Mutex<RouteVariantSelector>,
    route: Mutex<Option<ActiveRoute>>,
    default_center: Coordinates,
    loads_tx: Sender<()>,
    loads_rx: Receiver<()>,
    variants_rx: Receiver<Variant>,
}

impl<P, S> RouteView<P, S>
where
    P: DirectionsAPI + Send + Sync + 'static,
    S: MapSurface + Send + 'static,
{
    pub fn new(engine: RouteRenderingEngine<P, S>, default_center: Coordinates) -> Self {
        let selector = RouteVariantSelector::new();
        let variants_rx = selector.subscribe();
        let (loads_tx, loads_rx) = async_channel::unbounded();

        Self {
            engine: Arc::new(engine),
            selector: Mutex::new(selector),
            route: Mutex::new(None),
            default_center,
            loads_tx,
            loads_rx,
            variants_rx,
        }
    }

    pub fn engine(&self) -> &RouteRenderingEngine<P, S> {
        &self.engine
    }

    pub async fn variant(&self) -> Variant {
        self.selector.lock().await.current()
    }

    /// Replaces the active route wholesale.
    #[tracing::instrument(skip(self, route), fields(route_id = %route.route_id))]
    pub async fn load_route(&self, route: ActiveRoute) {
        *self.route.lock().await = Some(route);

        if let Err(err) = self.loads_tx.try_send(()) {
            tracing::warn!("dropping route load: {}", err);
        }
    }

    pub async fn select_variant(&self, variant: Variant) -> bool {
        self.selector.lock().await.set_variant(variant)
    }

    pub async fn toggle_variant(&self) -> Variant {
        self.selector.lock().await.toggle()
    }

    /// Waits for the next event and starts rendering for it. The render's
    /// token is issued before this returns; the provider round trip runs on
    /// the returned task. Returns `None` once the view is closed.
    pub async fn step(&self) -> Option<JoinHandle<Result<RenderOutcome, Error>>> {
        let event = tokio::select! {
            Ok(()) = self.loads_rx.recv() => ViewEvent::RouteLoaded,
            Ok(variant) = self.variants_rx.recv() => ViewEvent::VariantChanged(variant),
            else => return None,
        };

        tracing::debug!(?event, "view event");

        let variant = self.variant().await;
        let route = self.route.lock().await.clone().unwrap_or_default();

        let handle = match self.engine.begin(&route, variant).await {
            Some(pending) => {
                let engine = self.engine.clone();
                tokio::spawn(async move { engine.finish(pending).await })
            }
            None => tokio::spawn(async { Ok::<_, Error>(RenderOutcome::Skipped) }),
        };

        Some(handle)
    }

    /// Drains events until the view is closed.
    pub async fn run(&self) {
        while let Some(handle) = self.step().await {
            tokio::spawn(async move {
                match handle.await {
                    Ok(Ok(outcome)) => tracing::debug!(?outcome, "render finished"),
                    Ok(Err(err)) => tracing::warn!("render failed: {}", err),
                    Err(err) => tracing::error!("render task failed: {}", err),
                }
            });
        }
    }

    /// Centres the map on the rider, or on the default centre when their
    /// location is unknown.
    pub async fn center(&self, located: Result<Coordinates, Error>) -> Coordinates {
        let center = match located {
            Ok(position) => position,
            Err(err) => {
                tracing::warn!("centering on default location: {}", err);
                self.default_center
            }
        };

        self.engine.with_surface(|surface| surface.set_center(center)).await;

        center
    }

    /// Stops accepting events and takes everything off the map.
    pub async fn close(&self) {
        self.loads_tx.close();
        self.selector.lock().await.close();
        self.engine.clear().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::geolocation_unavailable_error;
    use crate::map::MemorySurface;
    use crate::testing::{route, stop, three_stop_route, Reply, StubDirections};

    fn view(stub: StubDirections) -> RouteView<StubDirections, MemorySurface> {
        RouteView::new(
            RouteRenderingEngine::new(stub, MemorySurface::new()),
            Coordinates::new(33.4757032, -86.94038),
        )
    }

    async fn next(view: &RouteView<StubDirections, MemorySurface>) -> Result<RenderOutcome, Error> {
        view.step().await.unwrap().await.unwrap()
    }

    #[tokio::test]
    async fn loading_a_route_renders_the_current_variant() {
        let view = view(StubDirections::new());

        view.load_route(three_stop_route()).await;

        assert_eq!(next(&view).await, Ok(RenderOutcome::Rendered { legs: 2 }));
        assert_eq!(view.engine().provider().calls().len(), 1);
    }

    #[tokio::test]
    async fn switching_variant_rerenders() {
        let view = view(StubDirections::new());

        view.load_route(three_stop_route()).await;
        next(&view).await.unwrap();

        assert!(view.select_variant(Variant::DropOff).await);
        assert_eq!(next(&view).await, Ok(RenderOutcome::Rendered { legs: 3 }));

        view.engine()
            .with_surface(|surface| {
                assert_eq!(surface.attached_overlays()[0].style.stroke_color, "#9b8dc4");
                assert_eq!(surface.attached_markers().len(), 3);
            })
            .await;
    }

    #[tokio::test]
    async fn switching_to_an_empty_variant_is_skipped() {
        let view = view(StubDirections::new());

        view.load_route(route(vec![stop("A", 0.0, 0.0), stop("B", 1.0, 1.0)], vec![]))
            .await;
        next(&view).await.unwrap();

        assert!(view.select_variant(Variant::DropOff).await);
        assert_eq!(next(&view).await, Ok(RenderOutcome::Skipped));
        assert_eq!(view.engine().marker_count().await, 1);
    }

    #[tokio::test]
    async fn queued_events_settle_on_latest_state() {
        let stub = StubDirections::new();
        let release_first = stub.then_gated(Reply::Echo);
        let view = view(stub);

        view.load_route(three_stop_route()).await;
        view.toggle_variant().await;
        view.toggle_variant().await;

        let first = view.step().await.unwrap();
        let second = view.step().await.unwrap();
        let third = view.step().await.unwrap();

        assert_eq!(third.await.unwrap(), Ok(RenderOutcome::Rendered { legs: 2 }));
        assert_eq!(second.await.unwrap(), Ok(RenderOutcome::Superseded));

        release_first.send(()).unwrap();
        assert_eq!(first.await.unwrap(), Ok(RenderOutcome::Superseded));

        assert_eq!(view.variant().await, Variant::PickUp);
        view.engine()
            .with_surface(|surface| {
                assert_eq!(surface.attached_overlays().len(), 1);
                assert_eq!(surface.attached_overlays()[0].style.stroke_color, "#332266");
            })
            .await;
    }

    #[tokio::test]
    async fn geolocation_failure_falls_back_to_default_center() {
        let view = view(StubDirections::new());

        let center = view.center(Err(geolocation_unavailable_error())).await;
        assert_eq!(center, Coordinates::new(33.4757032, -86.94038));

        let here = Coordinates::new(33.5, -86.8);
        assert_eq!(view.center(Ok(here)).await, here);
        assert_eq!(view.engine().with_surface(|s| s.center()).await, Some(here));
    }

    #[tokio::test]
    async fn closed_view_stops_and_clears() {
        let view = view(StubDirections::new());

        view.load_route(three_stop_route()).await;
        next(&view).await.unwrap();
        view.close().await;

        assert!(view.step().await.is_none());
        assert_eq!(view.engine().active_overlay().await, None);

        view.run().await;
    }
}
