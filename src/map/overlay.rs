use crate::api::{MapSurface, OverlayHandle};
use crate::entities::{DirectionsRoute, Variant};

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayStyle {
    pub stroke_color: &'static str,
    pub stroke_opacity: f64,
    pub stroke_weight: u32,
}

impl OverlayStyle {
    /// Pick-up and drop-off paths use different strokes so a quick toggle is visible.
    pub fn for_variant(variant: Variant) -> Self {
        let stroke_color = match variant {
            Variant::PickUp => "#332266",
            Variant::DropOff => "#9b8dc4",
        };

        Self {
            stroke_color,
            stroke_opacity: 0.6,
            stroke_weight: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub style: OverlayStyle,
    pub route: DirectionsRoute,
    /// Stop markers are drawn by the marker pool, never by the overlay.
    pub suppress_markers: bool,
}

impl OverlayConfig {
    pub fn new(variant: Variant, route: DirectionsRoute) -> Self {
        Self {
            style: OverlayStyle::for_variant(variant),
            route,
            suppress_markers: true,
        }
    }
}

/// Owns the single path overlay of a map view.
#[derive(Debug, Default)]
pub struct PathOverlayManager {
    active: Option<OverlayHandle>,
}

impl PathOverlayManager {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn active(&self) -> Option<OverlayHandle> {
        self.active
    }

    /// Tears down the current overlay before attaching the new one.
    pub fn replace<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        config: &OverlayConfig,
    ) -> OverlayHandle {
        self.clear(surface);

        let handle = surface.attach_overlay(config);
        self.active = Some(handle);

        handle
    }

    pub fn clear<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(handle) = self.active.take() {
            surface.detach_overlay(handle);
        }
    }
}
