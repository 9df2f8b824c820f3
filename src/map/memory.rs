use std::collections::HashMap;

use crate::api::{MapSurface, MarkerHandle, OverlayHandle};
use crate::entities::Coordinates;
use crate::map::{OverlayConfig, OverlayStyle};

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayRecord {
    pub style: OverlayStyle,
    pub path: Vec<Coordinates>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerRecord {
    pub label: String,
    pub position: Option<Coordinates>,
    pub attached: bool,
    pub popup: Option<String>,
}

/// A map surface that only keeps state in memory. It backs headless hosts and
/// records enough history to check what a viewer would have seen.
#[derive(Debug, Default)]
pub struct MemorySurface {
    overlays: HashMap<OverlayHandle, OverlayRecord>,
    markers: HashMap<MarkerHandle, MarkerRecord>,
    open_popup: Option<(MarkerHandle, String)>,
    center: Option<Coordinates>,
    mutations: usize,
    peak_attached_overlays: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self, handle: OverlayHandle) -> Option<&OverlayRecord> {
        self.overlays.get(&handle)
    }

    pub fn attached_overlays(&self) -> Vec<&OverlayRecord> {
        self.overlays.values().collect()
    }

    /// Most overlays ever attached at the same time.
    pub fn peak_attached_overlays(&self) -> usize {
        self.peak_attached_overlays
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&MarkerRecord> {
        self.markers.get(&handle)
    }

    /// Attached markers ordered by label.
    pub fn attached_markers(&self) -> Vec<&MarkerRecord> {
        let mut attached: Vec<&MarkerRecord> =
            self.markers.values().filter(|m| m.attached).collect();

        attached.sort_by_key(|m| m.label.parse::<usize>().unwrap_or(usize::MAX));
        attached
    }

    /// Markers created and not yet released, attached or not.
    pub fn live_markers(&self) -> usize {
        self.markers.len()
    }

    pub fn open_popup_content(&self) -> Option<&str> {
        self.open_popup.as_ref().map(|(_, content)| content.as_str())
    }

    pub fn center(&self) -> Option<Coordinates> {
        self.center
    }

    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// Simulates a rider clicking a marker.
    pub fn click(&mut self, handle: MarkerHandle) -> bool {
        let content = match self.markers.get(&handle) {
            Some(MarkerRecord {
                attached: true,
                popup: Some(content),
                ..
            }) => content.clone(),
            _ => return false,
        };

        self.open_popup(handle, &content);
        true
    }
}

impl MapSurface for MemorySurface {
    fn attach_overlay(&mut self, config: &OverlayConfig) -> OverlayHandle {
        let handle = OverlayHandle::new();

        self.mutations += 1;
        self.overlays.insert(
            handle,
            OverlayRecord {
                style: config.style.clone(),
                path: config.route.path(),
            },
        );
        self.peak_attached_overlays = self.peak_attached_overlays.max(self.overlays.len());

        tracing::debug!(?handle, color = config.style.stroke_color, "attached overlay");
        handle
    }

    fn detach_overlay(&mut self, handle: OverlayHandle) {
        self.mutations += 1;

        if self.overlays.remove(&handle).is_none() {
            tracing::warn!(?handle, "detaching unknown overlay");
        }
    }

    fn create_marker(&mut self, label: &str) -> MarkerHandle {
        let handle = MarkerHandle::new();

        self.mutations += 1;
        self.markers.insert(
            handle,
            MarkerRecord {
                label: label.into(),
                position: None,
                attached: false,
                popup: None,
            },
        );

        handle
    }

    fn attach_marker(&mut self, handle: MarkerHandle) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            self.mutations += 1;
            marker.attached = true;
        }
    }

    fn detach_marker(&mut self, handle: MarkerHandle) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            self.mutations += 1;
            marker.attached = false;
        }

        if matches!(&self.open_popup, Some((anchor, _)) if *anchor == handle) {
            self.open_popup = None;
        }
    }

    fn release_marker(&mut self, handle: MarkerHandle) {
        self.mutations += 1;
        self.markers.remove(&handle);
    }

    fn set_marker_position(&mut self, handle: MarkerHandle, position: Coordinates) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            self.mutations += 1;
            marker.position = Some(position);
        }
    }

    fn bind_popup(&mut self, handle: MarkerHandle, content: String) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            self.mutations += 1;
            marker.popup = Some(content);
        }
    }

    fn open_popup(&mut self, handle: MarkerHandle, content: &str) {
        self.mutations += 1;
        self.open_popup = Some((handle, content.into()));
    }

    fn close_popup(&mut self) {
        self.mutations += 1;
        self.open_popup = None;
    }

    fn set_center(&mut self, center: Coordinates) {
        self.mutations += 1;
        self.center = Some(center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detaching_anchor_closes_its_popup() {
        let mut surface = MemorySurface::new();
        let marker = surface.create_marker("1");

        surface.attach_marker(marker);
        surface.bind_popup(marker, "Elm St".into());
        assert!(surface.click(marker));

        surface.detach_marker(marker);

        assert_eq!(surface.open_popup_content(), None);
        assert!(!surface.click(marker));
    }

    #[test]
    fn opening_a_popup_replaces_the_open_one() {
        let mut surface = MemorySurface::new();
        let first = surface.create_marker("1");
        let second = surface.create_marker("2");

        surface.open_popup(first, "first");
        surface.open_popup(second, "second");
        assert_eq!(surface.open_popup_content(), Some("second"));

        surface.close_popup();
        assert_eq!(surface.open_popup_content(), None);
    }
}
