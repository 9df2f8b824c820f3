mod popup;
mod selector;

pub use popup::popup_text;
pub use selector::RouteVariantSelector;

use std::time::Duration;

use async_channel::{Receiver, Sender};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::{
    api::{DirectionsAPI, MapSurface, OverlayHandle},
    entities::{
        ActiveRoute, DirectionsRequest, DirectionsResult, StopList, TravelMode, Variant, Waypoint,
    },
    error::{provider_error, timeout_error, Error},
    map::{MarkerPool, OverlayConfig, PathOverlayManager},
};

#[derive(Clone, Debug, PartialEq)]
pub enum RenderState {
    Idle,
    Requesting {
        token: u64,
    },
    Rendered {
        token: u64,
        legs: usize,
        rendered_at: DateTime<Utc>,
    },
}

impl RenderState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting { .. } => "requesting",
            Self::Rendered { .. } => "rendered",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    /// The stop list could not form a path; nothing was requested.
    Skipped,
    /// A later render was issued before this one completed.
    Superseded,
    Rendered { legs: usize },
}

/// Failures surfaced to the rider.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    DirectionsFailed { variant: Variant, reason: String },
}

/// A directions request that has been issued a token but not yet sent.
#[derive(Clone, Debug)]
pub struct PendingRender {
    token: u64,
    variant: Variant,
    stops: StopList,
    request: DirectionsRequest,
}

impl PendingRender {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn request(&self) -> &DirectionsRequest {
        &self.request
    }
}

struct Inner<S> {
    surface: S,
    overlay: PathOverlayManager,
    markers: MarkerPool,
    state: RenderState,
    latest: u64,
}

/// Keeps one map view's path overlay and stop markers in step with the most
/// recently requested route variant.
///
/// Every render takes a token; a provider completion is applied only if its
/// token is still the latest issued, so results land in call order no matter
/// when the provider answers.
pub struct RouteRenderingEngine<P, S> {
    provider: P,
    inner: Mutex<Inner<S>>,
    timeout: Option<Duration>,
    notices_tx: Sender<Notice>,
    notices_rx: Receiver<Notice>,
}

impl<P, S> RouteRenderingEngine<P, S>
where
    P: DirectionsAPI,
    S: MapSurface,
{
    pub fn new(provider: P, surface: S) -> Self {
        let (notices_tx, notices_rx) = async_channel::unbounded();

        Self {
            provider,
            inner: Mutex::new(Inner {
                surface,
                overlay: PathOverlayManager::new(),
                markers: MarkerPool::new(),
                state: RenderState::Idle,
                latest: 0,
            }),
            timeout: None,
            notices_tx,
            notices_rx,
        }
    }

    /// Fails directions requests that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn notices(&self) -> Receiver<Notice> {
        self.notices_rx.clone()
    }

    pub async fn state(&self) -> RenderState {
        self.inner.lock().await.state.clone()
    }

    pub async fn active_overlay(&self) -> Option<OverlayHandle> {
        self.inner.lock().await.overlay.active()
    }

    pub async fn marker_count(&self) -> usize {
        self.inner.lock().await.markers.len()
    }

    /// Opens the popup of the marker at `index`.
    pub async fn open_marker(&self, index: usize) -> bool {
        let mut inner = self.inner.lock().await;
        let inner = &mut *inner;

        inner.markers.open(&mut inner.surface, index)
    }

    pub async fn with_surface<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.lock().await.surface)
    }

    #[tracing::instrument(skip(self, route), fields(route_id = %route.route_id))]
    pub async fn render(&self, route: &ActiveRoute, variant: Variant) -> Result<RenderOutcome, Error> {
        match self.begin(route, variant).await {
            Some(pending) => self.finish(pending).await,
            None => Ok(RenderOutcome::Skipped),
        }
    }

    /// Issues the next token and builds the directions request from a copy of
    /// the variant's stops. Any render still in flight is superseded, even when
    /// the new stop list turns out to be unrenderable.
    pub async fn begin(&self, route: &ActiveRoute, variant: Variant) -> Option<PendingRender> {
        let mut inner = self.inner.lock().await;

        inner.latest += 1;
        let token = inner.latest;

        let stops = route.stops(variant).clone();

        let (origin, waypoints, destination) = match stops.endpoints() {
            Some(endpoints) => endpoints,
            None => {
                tracing::debug!(stops = stops.len(), "{} stops not renderable", variant.name());

                if let RenderState::Requesting { .. } = inner.state {
                    inner.state = RenderState::Idle;
                }

                return None;
            }
        };

        let request = DirectionsRequest {
            origin: origin.coordinates(),
            destination: destination.coordinates(),
            waypoints: waypoints.iter().map(Waypoint::from).collect(),
            travel_mode: TravelMode::Driving,
            optimize_waypoints: true,
        };

        inner.state = RenderState::Requesting { token };
        tracing::info!(token, "requesting {} directions", variant.name());

        Some(PendingRender {
            token,
            variant,
            stops,
            request,
        })
    }

    /// Sends the request and applies the result if it is still the latest.
    /// Prior overlay and markers stay on the map until a newer result replaces them.
    #[tracing::instrument(skip(self, pending), fields(token = pending.token))]
    pub async fn finish(&self, pending: PendingRender) -> Result<RenderOutcome, Error> {
        let PendingRender {
            token,
            variant,
            stops,
            request,
        } = pending;

        let result = self.request(request).await;

        let mut inner = self.inner.lock().await;

        if inner.latest != token {
            tracing::debug!(latest = inner.latest, "discarding stale directions");
            return Ok(RenderOutcome::Superseded);
        }

        let route = match result {
            Ok(result) if result.is_ok() => match result.into_route() {
                Some(route) => Ok(route),
                None => Err(provider_error("OK with no route")),
            },
            Ok(DirectionsResult { status, .. }) => Err(provider_error(&status)),
            Err(err) => Err(err),
        };

        let route = match route {
            Ok(route) => route,
            Err(err) => {
                inner.state = RenderState::Idle;
                drop(inner);

                tracing::error!("{}", err.message);
                self.report(Notice::DirectionsFailed {
                    variant,
                    reason: err.message.clone(),
                });

                return Err(err);
            }
        };

        let legs = route.legs.len();
        let leg_starts = route.leg_starts();
        let config = OverlayConfig::new(variant, route);

        let inner = &mut *inner;
        inner.overlay.replace(&mut inner.surface, &config);
        inner
            .markers
            .reconcile(&mut inner.surface, &leg_starts, popup_text(&stops, variant));
        inner.state = RenderState::Rendered {
            token,
            legs,
            rendered_at: Utc::now(),
        };

        tracing::info!(legs, "rendered {} route", variant.name());

        Ok(RenderOutcome::Rendered { legs })
    }

    /// Removes the overlay and markers and abandons any render in flight.
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        let inner = &mut *inner;

        inner.latest += 1;
        inner.overlay.clear(&mut inner.surface);
        inner.markers.clear(&mut inner.surface);
        inner.surface.close_popup();
        inner.state = RenderState::Idle;
    }

    async fn request(&self, request: DirectionsRequest) -> Result<DirectionsResult, Error> {
        let call = self.provider.route(request);

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| timeout_error())?,
            None => call.await,
        }
    }

    fn report(&self, notice: Notice) {
        if let Err(err) = self.notices_tx.try_send(notice) {
            tracing::warn!("dropping notice: {}", err);
        }
    }
}
