mod markers;
mod memory;
mod overlay;

pub use markers::{MarkerPool, RenderedMarker};
pub use memory::{MarkerRecord, MemorySurface, OverlayRecord};
pub use overlay::{OverlayConfig, OverlayStyle, PathOverlayManager};
