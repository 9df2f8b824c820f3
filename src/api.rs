use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Coordinates, DirectionsRequest, DirectionsResult};
use crate::error::Error;
use crate::map::OverlayConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayHandle(Uuid);

impl OverlayHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(Uuid);

impl MarkerHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Computes a drivable path through an ordered set of points. Implementations
/// return the provider's status verbatim; interpreting it is the caller's job.
#[async_trait]
pub trait DirectionsAPI {
    async fn route(&self, request: DirectionsRequest) -> Result<DirectionsResult, Error>;
}

/// The drawable surface of a map view. Every object on it is addressed by an
/// opaque handle issued by the surface itself.
pub trait MapSurface {
    fn attach_overlay(&mut self, config: &OverlayConfig) -> OverlayHandle;
    fn detach_overlay(&mut self, handle: OverlayHandle);

    fn create_marker(&mut self, label: &str) -> MarkerHandle;
    fn attach_marker(&mut self, handle: MarkerHandle);
    fn detach_marker(&mut self, handle: MarkerHandle);
    fn release_marker(&mut self, handle: MarkerHandle);
    fn set_marker_position(&mut self, handle: MarkerHandle, position: Coordinates);

    /// Binds the popup shown when the marker is clicked, replacing any earlier binding.
    fn bind_popup(&mut self, handle: MarkerHandle, content: String);
    fn open_popup(&mut self, handle: MarkerHandle, content: &str);
    fn close_popup(&mut self);

    fn set_center(&mut self, center: Coordinates);
}
