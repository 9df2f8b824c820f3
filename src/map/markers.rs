use crate::api::{MapSurface, MarkerHandle};
use crate::entities::Coordinates;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedMarker {
    pub index: usize,
    pub handle: MarkerHandle,
    pub popup: String,
}

/// Stop markers of a map view, indexed by position along the path.
#[derive(Debug, Default)]
pub struct MarkerPool {
    markers: Vec<RenderedMarker>,
}

impl MarkerPool {
    pub fn new() -> Self {
        Self { markers: vec![] }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn markers(&self) -> &[RenderedMarker] {
        &self.markers
    }

    /// Places one marker per position, reusing markers by index. Markers past
    /// the end of `positions` are detached and released.
    pub fn reconcile<S, F>(&mut self, surface: &mut S, positions: &[Coordinates], popup: F)
    where
        S: MapSurface + ?Sized,
        F: Fn(usize) -> String,
    {
        for (index, position) in positions.iter().enumerate() {
            let content = popup(index);

            let handle = match self.markers.get_mut(index) {
                Some(marker) => {
                    marker.popup = content.clone();
                    marker.handle
                }
                None => {
                    let handle = surface.create_marker(&(index + 1).to_string());
                    self.markers.push(RenderedMarker {
                        index,
                        handle,
                        popup: content.clone(),
                    });
                    handle
                }
            };

            surface.set_marker_position(handle, *position);
            surface.attach_marker(handle);
            surface.bind_popup(handle, content);
        }

        for marker in self.markers.drain(positions.len()..) {
            surface.detach_marker(marker.handle);
            surface.release_marker(marker.handle);
        }
    }

    /// Opens the popup of the marker at `index`, as a click on it would.
    pub fn open<S: MapSurface + ?Sized>(&self, surface: &mut S, index: usize) -> bool {
        match self.markers.get(index) {
            Some(marker) => {
                surface.open_popup(marker.handle, &marker.popup);
                true
            }
            None => false,
        }
    }

    pub fn clear<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        for marker in self.markers.drain(..) {
            surface.detach_marker(marker.handle);
            surface.release_marker(marker.handle);
        }
    }
}
