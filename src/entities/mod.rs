mod directions;
mod location;
mod route;
mod school;
mod stop;

pub use directions::{DirectionsRequest, DirectionsResult, DirectionsRoute, Leg, TravelMode, Waypoint};
pub use location::Coordinates;
pub use route::{ActiveRoute, Variant};
pub use school::{RouteSummary, School};
pub use stop::{Stop, StopList};
