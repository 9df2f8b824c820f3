use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Stop};

pub const STATUS_OK: &str = "OK";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
            Self::Transit => "transit",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub location: Coordinates,
    pub stopover: bool,
}

impl From<&Stop> for Waypoint {
    fn from(stop: &Stop) -> Self {
        Self {
            location: stop.coordinates(),
            stopover: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub waypoints: Vec<Waypoint>,
    pub travel_mode: TravelMode,
    pub optimize_waypoints: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub start_location: Coordinates,
    pub end_location: Coordinates,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRoute {
    pub legs: Vec<Leg>,
    /// Order the provider visited the waypoints in, when it was allowed to optimize.
    #[serde(default)]
    pub waypoint_order: Vec<usize>,
}

impl DirectionsRoute {
    pub fn leg_starts(&self) -> Vec<Coordinates> {
        self.legs.iter().map(|leg| leg.start_location).collect()
    }

    pub fn path(&self) -> Vec<Coordinates> {
        let mut path = self.leg_starts();

        if let Some(last) = self.legs.last() {
            path.push(last.end_location);
        }

        path
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResult {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

impl DirectionsResult {
    pub fn ok(routes: Vec<DirectionsRoute>) -> Self {
        Self {
            status: STATUS_OK.into(),
            routes,
        }
    }

    pub fn failed(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            routes: vec![],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// The route to draw, if the provider reported success and produced one.
    pub fn into_route(self) -> Option<DirectionsRoute> {
        if !self.is_ok() {
            return None;
        }

        self.routes.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(from: (f64, f64), to: (f64, f64)) -> Leg {
        Leg {
            start_location: Coordinates::new(from.0, from.1),
            end_location: Coordinates::new(to.0, to.1),
        }
    }

    #[test]
    fn path_closes_with_last_leg_end() {
        let route = DirectionsRoute {
            legs: vec![leg((0.0, 0.0), (1.0, 1.0)), leg((1.0, 1.0), (2.0, 2.0))],
            waypoint_order: vec![0],
        };

        assert_eq!(route.leg_starts().len(), 2);
        assert_eq!(route.path().last(), Some(&Coordinates::new(2.0, 2.0)));
    }

    #[test]
    fn only_ok_status_yields_route() {
        let failed = DirectionsResult {
            status: "ZERO_RESULTS".into(),
            routes: vec![DirectionsRoute::default()],
        };

        assert!(failed.into_route().is_none());
        assert!(DirectionsResult::ok(vec![]).into_route().is_none());
        assert!(DirectionsResult::ok(vec![DirectionsRoute::default()])
            .into_route()
            .is_some());
    }
}
